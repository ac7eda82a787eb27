//! Filtered view and statistics over cached notes.
//!
//! The category filter is applied first, then the search filter; both are
//! conjunctive. Search is a case-insensitive substring match against title,
//! content or any tag, and is skipped when the query is blank after trimming.
//! The query itself is matched untrimmed.

use crate::models::{CategoryFilter, Note, NoteStats};

/// True when `note` passes the category filter.
pub fn matches_category(note: &Note, filter: CategoryFilter) -> bool {
    match filter {
        CategoryFilter::All => true,
        CategoryFilter::Only(category) => note.category == category,
    }
}

/// True when `note` passes the search filter for `query`.
pub fn matches_query(note: &Note, query: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    note.title.to_lowercase().contains(&needle)
        || note.content.to_lowercase().contains(&needle)
        || note
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle))
}

/// Compute the filtered view, preserving cache order.
pub fn filter_notes<'a>(notes: &'a [Note], category: CategoryFilter, query: &str) -> Vec<&'a Note> {
    notes
        .iter()
        .filter(|note| matches_category(note, category))
        .filter(|note| matches_query(note, query))
        .collect()
}

/// Compute counts over all cached notes plus the size of the filtered view.
pub fn compute_stats(notes: &[Note], filtered: usize) -> NoteStats {
    let mut stats = NoteStats {
        total: notes.len(),
        filtered,
        ..Default::default()
    };
    for note in notes {
        *stats.by_category.entry(note.category).or_insert(0) += 1;
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, NoteForm};

    fn note(title: &str, content: &str, category: Category, tags: &[&str]) -> Note {
        Note::from_form(
            NoteForm::new(title, content)
                .with_category(category)
                .with_tags(tags.iter().copied()),
        )
    }

    fn sample() -> Vec<Note> {
        vec![
            note("Trip", "Seoul palaces", Category::Personal, &["travel"]),
            note("Standup", "Sprint planning", Category::Work, &["Meeting"]),
            note("Rust", "Ownership notes", Category::Study, &["lang"]),
            note("App idea", "Trip planner", Category::Idea, &[]),
            note("Groceries", "milk", Category::Other, &["home"]),
        ]
    }

    fn titles(notes: &[&Note]) -> Vec<String> {
        notes.iter().map(|n| n.title.clone()).collect()
    }

    #[test]
    fn test_no_filters_returns_everything_in_order() {
        let notes = sample();
        let view = filter_notes(&notes, CategoryFilter::All, "");
        assert_eq!(view.len(), 5);
        assert_eq!(view[0].title, "Trip");
        assert_eq!(view[4].title, "Groceries");
    }

    #[test]
    fn test_category_filter_exact_match() {
        let notes = sample();
        let view = filter_notes(&notes, CategoryFilter::Only(Category::Work), "");
        assert_eq!(titles(&view), vec!["Standup"]);
    }

    #[test]
    fn test_search_matches_title_content_and_tags() {
        let notes = sample();
        assert_eq!(
            titles(&filter_notes(&notes, CategoryFilter::All, "trip")),
            vec!["Trip", "App idea"]
        );
        assert_eq!(
            titles(&filter_notes(&notes, CategoryFilter::All, "OWNERSHIP")),
            vec!["Rust"]
        );
        assert_eq!(
            titles(&filter_notes(&notes, CategoryFilter::All, "meet")),
            vec!["Standup"]
        );
    }

    #[test]
    fn test_blank_query_is_ignored() {
        let notes = sample();
        assert_eq!(filter_notes(&notes, CategoryFilter::All, "   ").len(), 5);
    }

    #[test]
    fn test_category_and_search_are_conjunctive() {
        let notes = sample();
        let view = filter_notes(&notes, CategoryFilter::Only(Category::Idea), "trip");
        assert_eq!(titles(&view), vec!["App idea"]);
    }

    #[test]
    fn test_filter_order_is_commutative() {
        let notes = sample();
        let queries = ["", "trip", "PLAN", "home", "zzz", " "];
        let mut filters = vec![CategoryFilter::All];
        filters.extend(Category::ALL.iter().map(|c| CategoryFilter::Only(*c)));

        for filter in &filters {
            for query in &queries {
                let category_first: Vec<_> = notes
                    .iter()
                    .filter(|n| matches_category(n, *filter))
                    .filter(|n| matches_query(n, query))
                    .map(|n| n.id)
                    .collect();
                let search_first: Vec<_> = notes
                    .iter()
                    .filter(|n| matches_query(n, query))
                    .filter(|n| matches_category(n, *filter))
                    .map(|n| n.id)
                    .collect();
                assert_eq!(category_first, search_first, "{:?} / {:?}", filter, query);
            }
        }
    }

    #[test]
    fn test_stats_counts_by_category() {
        let mut notes = sample();
        notes.push(note("Retro", "Sprint retro", Category::Work, &[]));
        let view_len = filter_notes(&notes, CategoryFilter::Only(Category::Work), "").len();
        let stats = compute_stats(&notes, view_len);

        assert_eq!(stats.total, 6);
        assert_eq!(stats.filtered, 2);
        assert_eq!(stats.by_category[&Category::Work], 2);
        assert_eq!(stats.by_category[&Category::Personal], 1);
    }

    #[test]
    fn test_stats_empty() {
        let stats = compute_stats(&[], 0);
        assert_eq!(stats.total, 0);
        assert!(stats.by_category.is_empty());
    }
}
