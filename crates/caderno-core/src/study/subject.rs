//! Subject domain model.
//!
//! A subject is a course the student is enrolled in, tagged with the
//! academic period it belongs to and a display color for the calendar and
//! note lists.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Highest academic period the organizer shows (1º through 10º).
pub const MAX_ACADEMIC_PERIOD: u8 = 10;

/// A course the student is enrolled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Service-assigned identifier.
    pub id: i64,
    /// Course name.
    pub name: String,
    /// Academic period this subject belongs to (1..=10).
    pub period: u8,
    /// Display color in hex notation, e.g. `#3B82F6`.
    #[serde(default)]
    pub color: Option<String>,
}

/// Payload for creating or updating a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectDraft {
    pub name: String,
    pub period: u8,
    #[serde(default)]
    pub color: Option<String>,
}

/// Whether a period number is one the organizer accepts.
pub fn is_valid_period(period: u8) -> bool {
    (1..=MAX_ACADEMIC_PERIOD).contains(&period)
}

/// Groups subjects by academic period, ordered by period number.
///
/// The dashboard renders one section per period; subjects keep their
/// fetched order within each group.
pub fn group_by_period(subjects: &[Subject]) -> BTreeMap<u8, Vec<Subject>> {
    let mut groups: BTreeMap<u8, Vec<Subject>> = BTreeMap::new();
    for subject in subjects {
        groups.entry(subject.period).or_default().push(subject.clone());
    }
    groups
}
