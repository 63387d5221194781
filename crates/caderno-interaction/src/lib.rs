//! Remote REST bindings for the Caderno service.
//!
//! Every module here is a thin, typed wrapper over one resource of the API.
//! Failures are reduced to [`caderno_core::remote::RemoteError`] so callers
//! apply the detail-else-fallback rule uniformly.

pub mod auth_api;
pub mod calendar_api;
pub mod client;
pub mod config;
pub mod flashcards_api;
pub mod notes_api;

pub use auth_api::AuthApi;
pub use calendar_api::{CalendarApi, EventFilter};
pub use client::ApiClient;
pub use config::ApiConfig;
pub use flashcards_api::FlashcardsApi;
pub use notes_api::NotesApi;
