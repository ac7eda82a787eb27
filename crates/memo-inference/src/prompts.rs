//! Prompt templates for tag suggestion and summarization.

use memo_core::defaults::TAG_PROMPT_CONTENT_CHARS;

/// First `max_chars` characters of `s`, never splitting a character.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Prompt asking for 3-5 single-word tags as a JSON array of strings.
///
/// Only the first [`TAG_PROMPT_CONTENT_CHARS`] characters of `content` are
/// included.
pub fn tag_prompt(title: &str, content: &str) -> String {
    format!(
        "Analyze the title and content of the following note and suggest suitable tags.\n\
         Suggest single words only. Do not include the # symbol. Suggest 3-5 tags.\n\
         Reply with a JSON array only, with no other explanation.\n\
         \n\
         Title: {}\n\
         Content: {}\n\
         \n\
         Response format: [\"tag1\", \"tag2\", \"tag3\"]",
        title,
        truncate_chars(content, TAG_PROMPT_CONTENT_CHARS)
    )
}

/// Prompt asking for a 2-3 sentence summary of the full content.
pub fn summary_prompt(title: Option<&str>, content: &str) -> String {
    let title_line = match title.filter(|t| !t.is_empty()) {
        Some(t) => format!("Title: {}\n", t),
        None => String::new(),
    };
    format!(
        "Summarize the following note concisely and clearly. \
         Capture only the key points in 2-3 sentences.\n\
         \n\
         {}Content:\n\
         {}\n\
         \n\
         Summary:",
        title_line, content
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_short_input_unchanged() {
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 10), "");
    }

    #[test]
    fn test_truncate_chars_exact_boundary() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("abc", 3), "abc");
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        let s = "서울여행계획";
        assert_eq!(truncate_chars(s, 2), "서울");
    }

    #[test]
    fn test_tag_prompt_truncates_content() {
        let content = format!("{}{}", "a".repeat(1000), "§".repeat(200));
        let prompt = tag_prompt("Title", &content);
        assert!(prompt.contains(&"a".repeat(1000)));
        assert!(!prompt.contains('§'));
    }

    #[test]
    fn test_tag_prompt_includes_title_and_format() {
        let prompt = tag_prompt("Trip", "Seoul palaces");
        assert!(prompt.contains("Title: Trip"));
        assert!(prompt.contains("Content: Seoul palaces"));
        assert!(prompt.contains("JSON array"));
    }

    #[test]
    fn test_summary_prompt_with_title() {
        let prompt = summary_prompt(Some("Trip"), "Seoul palaces");
        assert!(prompt.contains("Title: Trip\nContent:\nSeoul palaces"));
        assert!(prompt.ends_with("Summary:"));
    }

    #[test]
    fn test_summary_prompt_without_title_keeps_full_content() {
        let content = "x".repeat(5000);
        let prompt = summary_prompt(None, &content);
        assert!(!prompt.contains("Title:"));
        assert!(prompt.contains(&content));
    }
}
