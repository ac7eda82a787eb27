//! Lenient parsing of model tag replies.
//!
//! Models are asked for a bare JSON array of strings but often wrap it in
//! prose or code fences, or answer with a plain comma list. When the reply
//! has a `[` ... `]` span, that span must decode as a JSON array; a span that
//! does not decode yields no tags. Only a reply without brackets is split on
//! commas. Parsing never fails.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use memo_core::defaults::MAX_SUGGESTED_TAGS;

fn array_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\[.*\]").expect("static regex"))
}

const QUOTE_CHARS: &[char] = &['"', '\'', '[', ']'];

/// Extract at most [`MAX_SUGGESTED_TAGS`] clean tags from a model reply.
pub fn parse_tag_reply(reply: &str) -> Vec<String> {
    let reply = reply.trim();
    let raw = match array_regex().find(reply) {
        Some(span) => parse_json_array(span.as_str()).unwrap_or_else(|| {
            debug!(
                subsystem = "inference",
                component = "tags",
                response_len = reply.len(),
                "Bracketed tag reply is not a JSON array, using no tags"
            );
            Vec::new()
        }),
        None => {
            debug!(
                subsystem = "inference",
                component = "tags",
                response_len = reply.len(),
                "No JSON array in tag reply, splitting on commas"
            );
            split_comma_list(reply)
        }
    };
    normalize_tags(raw)
}

/// Decode a bracketed span as a JSON array.
///
/// Strings are kept, numbers and booleans are stringified, anything else is
/// dropped. Returns `None` when the span is not a valid JSON array.
fn parse_json_array(span: &str) -> Option<Vec<String>> {
    let Value::Array(items) = serde_json::from_str::<Value>(span).ok()? else {
        return None;
    };
    Some(
        items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => None,
            })
            .collect(),
    )
}

/// Split on commas, stripping one leading and one trailing quote or bracket.
fn split_comma_list(reply: &str) -> Vec<String> {
    reply
        .split(',')
        .map(|piece| {
            let piece = piece.trim();
            let piece = piece.strip_prefix(QUOTE_CHARS).unwrap_or(piece);
            let piece = piece.strip_suffix(QUOTE_CHARS).unwrap_or(piece);
            piece.to_string()
        })
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Trim, drop leading `#`s, drop empties and keep the first five.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.iter()
        .map(|tag| tag.trim().trim_start_matches('#').trim().to_string())
        .filter(|tag| !tag.is_empty())
        .take(MAX_SUGGESTED_TAGS)
        .collect()
}
