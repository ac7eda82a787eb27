//! Data models for memo.
//!
//! Two shapes describe a note: [`Note`] is the application shape
//! (camelCase on the wire), [`NoteRow`] is the persisted shape of the
//! `memos` table (snake_case columns). The [`crate::mapping`] module
//! converts between them.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::defaults::CATEGORY_FILTER_ALL;
use crate::{Error, Result};

// =============================================================================
// CATEGORY
// =============================================================================

/// Fixed set of note categories.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Personal,
    Work,
    Study,
    Idea,
    #[default]
    Other,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 5] = [
        Category::Personal,
        Category::Work,
        Category::Study,
        Category::Idea,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Personal => "personal",
            Category::Work => "work",
            Category::Study => "study",
            Category::Idea => "idea",
            Category::Other => "other",
        }
    }

    /// Parse a stored category, falling back to [`Category::Other`] for
    /// text outside the enumeration.
    pub fn from_str_lossy(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| {
            tracing::debug!(
                subsystem = "core",
                component = "models",
                category = s,
                "Unknown category, treating as other"
            );
            Category::Other
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "personal" => Ok(Category::Personal),
            "work" => Ok(Category::Work),
            "study" => Ok(Category::Study),
            "idea" => Ok(Category::Idea),
            "other" => Ok(Category::Other),
            other => Err(Error::InvalidInput(format!("Unknown category: {}", other))),
        }
    }
}

/// Category filter applied to the cached notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// No category filtering.
    #[default]
    All,
    /// Exact category match.
    Only(Category),
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(CATEGORY_FILTER_ALL),
            CategoryFilter::Only(category) => category.fmt(f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case(CATEGORY_FILTER_ALL) {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

// =============================================================================
// NOTE
// =============================================================================

/// A note in application shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Build a new note from user-editable fields with a fresh identifier
    /// and both timestamps set to now.
    pub fn from_form(form: NoteForm) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: form.title,
            content: form.content,
            category: form.category,
            tags: form.tags,
            ai_summary: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge user-editable fields into this note and refresh `updated_at`.
    ///
    /// `updated_at` never moves backwards, even if the clock does.
    pub fn apply_form(&mut self, form: NoteForm) {
        self.title = form.title;
        self.content = form.content;
        self.category = form.category;
        self.tags = form.tags;
        self.updated_at = Utc::now().max(self.updated_at);
    }
}

/// User-editable note fields accepted by create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteForm {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NoteForm {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

impl From<&Note> for NoteForm {
    fn from(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            category: note.category,
            tags: note.tags.clone(),
        }
    }
}

// =============================================================================
// PERSISTED SHAPE
// =============================================================================

/// A note as stored in the `memos` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct NoteRow {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub ai_summary: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column values written by an update.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteUpdate {
    pub title: String,
    pub content: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Note> for NoteUpdate {
    fn from(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            category: note.category,
            tags: note.tags.clone(),
            updated_at: note.updated_at,
        }
    }
}

// =============================================================================
// STATS
// =============================================================================

/// Derived counts over the cached notes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteStats {
    /// Number of cached notes.
    pub total: usize,
    /// Number of cached notes per category; categories with no notes are absent.
    pub by_category: BTreeMap<Category, usize>,
    /// Size of the current filtered view.
    pub filtered: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_default_is_other() {
        assert_eq!(Category::default(), Category::Other);
    }

    #[test]
    fn test_category_parse_roundtrip() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_category_parse_case_insensitive() {
        assert_eq!("WORK".parse::<Category>().unwrap(), Category::Work);
        assert_eq!(" Idea ".parse::<Category>().unwrap(), Category::Idea);
    }

    #[test]
    fn test_category_parse_unknown_fails() {
        assert!("recipes".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_lossy_falls_back_to_other() {
        assert_eq!(Category::from_str_lossy("recipes"), Category::Other);
        assert_eq!(Category::from_str_lossy("study"), Category::Study);
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&Category::Personal).unwrap();
        assert_eq!(json, "\"personal\"");
    }

    #[test]
    fn test_category_filter_parse() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!("ALL".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "work".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Work)
        );
        assert!("nope".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn test_category_filter_display() {
        assert_eq!(CategoryFilter::All.to_string(), "all");
        assert_eq!(CategoryFilter::Only(Category::Idea).to_string(), "idea");
    }

    #[test]
    fn test_note_from_form_sets_equal_timestamps() {
        let note = Note::from_form(NoteForm::new("Trip", "Seoul").with_tags(["travel"]));
        assert_eq!(note.created_at, note.updated_at);
        assert_eq!(note.category, Category::Other);
        assert_eq!(note.tags, vec!["travel".to_string()]);
        assert!(note.ai_summary.is_none());
    }

    #[test]
    fn test_note_from_form_generates_unique_ids() {
        let a = Note::from_form(NoteForm::new("a", "a"));
        let b = Note::from_form(NoteForm::new("a", "a"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_apply_form_keeps_identity_and_refreshes_updated_at() {
        let mut note = Note::from_form(NoteForm::new("old", "old"));
        let id = note.id;
        let created = note.created_at;
        let before = note.updated_at;

        note.apply_form(NoteForm::new("new", "body").with_category(Category::Work));

        assert_eq!(note.id, id);
        assert_eq!(note.created_at, created);
        assert!(note.updated_at >= before);
        assert_eq!(note.title, "new");
        assert_eq!(note.category, Category::Work);
    }

    #[test]
    fn test_apply_form_never_moves_updated_at_backwards() {
        let mut note = Note::from_form(NoteForm::new("t", "c"));
        let future = Utc::now() + chrono::Duration::hours(1);
        note.updated_at = future;

        note.apply_form(NoteForm::new("t2", "c2"));
        assert_eq!(note.updated_at, future);
    }

    #[test]
    fn test_note_serializes_camel_case() {
        let mut note = Note::from_form(NoteForm::new("t", "c"));
        note.ai_summary = Some("short".to_string());
        let value = serde_json::to_value(&note).unwrap();
        assert!(value.get("aiSummary").is_some());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("ai_summary").is_none());
    }

    #[test]
    fn test_note_omits_absent_summary() {
        let note = Note::from_form(NoteForm::new("t", "c"));
        let value = serde_json::to_value(&note).unwrap();
        assert!(value.get("aiSummary").is_none());
    }

    #[test]
    fn test_stats_serializes_by_category() {
        let mut stats = NoteStats {
            total: 2,
            filtered: 1,
            ..Default::default()
        };
        stats.by_category.insert(Category::Work, 2);
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["byCategory"]["work"], 2);
        assert_eq!(value["filtered"], 1);
    }
}
