//! Note domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A study note, optionally tagged with a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Service-assigned identifier.
    pub id: i64,
    pub title: String,
    pub content: String,
    /// Subject this note is tagged with, if any.
    #[serde(default)]
    pub subject_id: Option<i64>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for creating or updating a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub subject_id: Option<i64>,
}

impl Note {
    /// Case-insensitive substring match over title and content.
    ///
    /// This is the search-box filter; it runs over the already-fetched
    /// list, the service is not consulted.
    pub fn matches(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.content.to_lowercase().contains(&needle)
    }
}

/// Filters notes by the search-box text.
pub fn filter_by_text<'a>(notes: &'a [Note], needle: &str) -> Vec<&'a Note> {
    notes.iter().filter(|note| note.matches(needle)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: i64, title: &str, content: &str) -> Note {
        Note {
            id,
            title: title.to_string(),
            content: content.to_string(),
            subject_id: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_filter_matches_title_and_content() {
        let notes = vec![
            note(1, "Krebs cycle", "citrate, isocitrate"),
            note(2, "Cardiac output", "stroke volume times heart rate"),
            note(3, "Glycolysis", "ends in pyruvate and the Krebs cycle"),
        ];

        let hits = filter_by_text(&notes, "krebs");
        assert_eq!(hits.iter().map(|n| n.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let notes = vec![note(1, "Anatomy", "")];
        assert_eq!(filter_by_text(&notes, "aNaToMy").len(), 1);
    }

    #[test]
    fn test_empty_needle_matches_everything() {
        let notes = vec![note(1, "a", ""), note(2, "b", "")];
        assert_eq!(filter_by_text(&notes, "").len(), 2);
    }
}
