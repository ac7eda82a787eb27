//! Row mapper between the persisted and application note shapes.

use crate::models::{Category, Note, NoteRow};

impl From<NoteRow> for Note {
    fn from(row: NoteRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            category: Category::from_str_lossy(&row.category),
            tags: row.tags.unwrap_or_default(),
            ai_summary: row.ai_summary.filter(|s| !s.is_empty()),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<&Note> for NoteRow {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id,
            title: note.title.clone(),
            content: note.content.clone(),
            category: note.category.as_str().to_string(),
            tags: Some(note.tags.clone()),
            ai_summary: note.ai_summary.clone().filter(|s| !s.is_empty()),
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }
}

impl NoteRow {
    /// Row written when a note is first created; any summary is left unset.
    pub fn for_insert(note: &Note) -> Self {
        Self {
            ai_summary: None,
            ..Self::from(note)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoteForm;
    use chrono::Utc;
    use uuid::Uuid;

    fn row() -> NoteRow {
        let now = Utc::now();
        NoteRow {
            id: Uuid::new_v4(),
            title: "Trip".to_string(),
            content: "Seoul".to_string(),
            category: "personal".to_string(),
            tags: Some(vec!["travel".to_string()]),
            ai_summary: Some("A trip.".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_row_to_note_copies_fields() {
        let r = row();
        let note = Note::from(r.clone());
        assert_eq!(note.id, r.id);
        assert_eq!(note.title, "Trip");
        assert_eq!(note.category, Category::Personal);
        assert_eq!(note.tags, vec!["travel".to_string()]);
        assert_eq!(note.ai_summary.as_deref(), Some("A trip."));
        assert_eq!(note.created_at, r.created_at);
    }

    #[test]
    fn test_missing_tags_become_empty() {
        let mut r = row();
        r.tags = None;
        assert!(Note::from(r).tags.is_empty());
    }

    #[test]
    fn test_null_or_empty_summary_becomes_none() {
        let mut r = row();
        r.ai_summary = None;
        assert!(Note::from(r.clone()).ai_summary.is_none());

        r.ai_summary = Some(String::new());
        assert!(Note::from(r).ai_summary.is_none());
    }

    #[test]
    fn test_unknown_category_maps_to_other() {
        let mut r = row();
        r.category = "groceries".to_string();
        assert_eq!(Note::from(r).category, Category::Other);
    }

    #[test]
    fn test_note_to_row_uses_lowercase_category() {
        let note = Note::from_form(NoteForm::new("t", "c").with_category(Category::Study));
        let r = NoteRow::from(&note);
        assert_eq!(r.category, "study");
        assert_eq!(r.tags, Some(vec![]));
    }

    #[test]
    fn test_for_insert_drops_summary() {
        let mut note = Note::from_form(NoteForm::new("t", "c"));
        note.ai_summary = Some("kept elsewhere".to_string());
        assert!(NoteRow::for_insert(&note).ai_summary.is_none());
        assert!(NoteRow::from(&note).ai_summary.is_some());
    }

    #[test]
    fn test_row_serializes_snake_case() {
        let value = serde_json::to_value(row()).unwrap();
        assert!(value.get("ai_summary").is_some());
        assert!(value.get("created_at").is_some());
        assert!(value.get("createdAt").is_none());
    }
}
