//! Calendar domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A category of study event (exam, assignment due, appointment, ...).
///
/// The set of types is service-defined; the client only displays them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventType {
    pub id: i64,
    pub name: String,
}

/// A dated study event shown on the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Service-assigned identifier.
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// When the event happens.
    pub starts_at: DateTime<Utc>,
    #[serde(default)]
    pub event_type_id: Option<i64>,
    #[serde(default)]
    pub subject_id: Option<i64>,
}

/// Payload for creating or updating an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    #[serde(default)]
    pub event_type_id: Option<i64>,
    #[serde(default)]
    pub subject_id: Option<i64>,
}
