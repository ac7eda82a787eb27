//! Plain-text rendering of notes and stats.

use std::fmt::Write;

use memo_core::{Category, Note, NoteStats};

/// One-line summary: id, category, title and tags.
pub fn note_line(note: &Note) -> String {
    let mut line = format!("{}  [{}]  {}", note.id, note.category, note.title);
    if !note.tags.is_empty() {
        line.push_str("  ");
        line.push_str(&format_tags(&note.tags));
    }
    line
}

/// Full note with content and summary.
pub fn note_detail(note: &Note) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", note.title);
    let _ = writeln!(out, "id:       {}", note.id);
    let _ = writeln!(out, "category: {}", note.category);
    if !note.tags.is_empty() {
        let _ = writeln!(out, "tags:     {}", format_tags(&note.tags));
    }
    let _ = writeln!(out, "created:  {}", note.created_at.to_rfc3339());
    let _ = writeln!(out, "updated:  {}", note.updated_at.to_rfc3339());
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", note.content);
    if let Some(summary) = &note.ai_summary {
        let _ = writeln!(out);
        let _ = writeln!(out, "AI summary: {}", summary);
    }
    out
}

/// Totals per category, every category listed even when zero.
pub fn stats_text(stats: &NoteStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "total:    {}", stats.total);
    let _ = writeln!(out, "filtered: {}", stats.filtered);
    for category in Category::ALL {
        let count = stats.by_category.get(&category).copied().unwrap_or(0);
        let _ = writeln!(out, "  {:<9} {}", category.as_str(), count);
    }
    out
}

fn format_tags(tags: &[String]) -> String {
    tags.iter()
        .map(|t| format!("#{}", t))
        .collect::<Vec<_>>()
        .join(" ")
}
