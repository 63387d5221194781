//! Calendar endpoints.

use chrono::NaiveDate;

use caderno_core::remote::RemoteResult;
use caderno_core::study::{CalendarEvent, EventDraft, EventType};

use crate::client::ApiClient;

/// Optional filters for the event listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub event_type_id: Option<i64>,
}

/// Typed wrapper over the calendar resource.
#[derive(Clone)]
pub struct CalendarApi {
    client: ApiClient,
}

impl CalendarApi {
    /// Creates the binding over a shared client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Lists events matching the filter.
    pub async fn list_events(&self, filter: &EventFilter) -> RemoteResult<Vec<CalendarEvent>> {
        let mut query = Vec::new();
        if let Some(start) = filter.start_date {
            query.push(("start_date", start.to_string()));
        }
        if let Some(end) = filter.end_date {
            query.push(("end_date", end.to_string()));
        }
        if let Some(event_type_id) = filter.event_type_id {
            query.push(("event_type_id", event_type_id.to_string()));
        }
        self.client.get("/calendar/", &query).await
    }

    /// Fetches one event.
    pub async fn get_event(&self, event_id: i64) -> RemoteResult<CalendarEvent> {
        self.client.get(&format!("/calendar/{event_id}"), &[]).await
    }

    /// Creates an event.
    pub async fn create_event(&self, draft: &EventDraft) -> RemoteResult<CalendarEvent> {
        self.client.post("/calendar/", draft).await
    }

    /// Updates an event.
    pub async fn update_event(
        &self,
        event_id: i64,
        draft: &EventDraft,
    ) -> RemoteResult<CalendarEvent> {
        self.client
            .put(&format!("/calendar/{event_id}"), draft)
            .await
    }

    /// Deletes an event.
    pub async fn delete_event(&self, event_id: i64) -> RemoteResult<()> {
        self.client.delete(&format!("/calendar/{event_id}")).await
    }

    /// Lists the service-defined event types.
    pub async fn list_event_types(&self) -> RemoteResult<Vec<EventType>> {
        self.client.get("/calendar/event-types/", &[]).await
    }
}
