//! Notes and subjects endpoints.

use caderno_core::remote::RemoteResult;
use caderno_core::study::{Note, NoteDraft, Subject, SubjectDraft};

use crate::client::ApiClient;

/// Typed wrapper over the notes and subjects resources.
///
/// Each method is a ready-made producer for a `Query` or `Mutation` site.
#[derive(Clone)]
pub struct NotesApi {
    client: ApiClient,
}

impl NotesApi {
    /// Creates the binding over a shared client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Lists notes, optionally restricted to one subject.
    pub async fn list_notes(&self, subject_id: Option<i64>) -> RemoteResult<Vec<Note>> {
        let mut query = Vec::new();
        if let Some(subject_id) = subject_id {
            query.push(("subject_id", subject_id.to_string()));
        }
        self.client.get("/notes/", &query).await
    }

    /// Fetches one note.
    pub async fn get_note(&self, note_id: i64) -> RemoteResult<Note> {
        self.client.get(&format!("/notes/{note_id}"), &[]).await
    }

    /// Creates a note.
    pub async fn create_note(&self, draft: &NoteDraft) -> RemoteResult<Note> {
        self.client.post("/notes/", draft).await
    }

    /// Updates a note.
    pub async fn update_note(&self, note_id: i64, draft: &NoteDraft) -> RemoteResult<Note> {
        self.client.put(&format!("/notes/{note_id}"), draft).await
    }

    /// Deletes a note.
    pub async fn delete_note(&self, note_id: i64) -> RemoteResult<()> {
        self.client.delete(&format!("/notes/{note_id}")).await
    }

    /// Lists subjects, optionally restricted to one academic period.
    pub async fn list_subjects(&self, period: Option<u8>) -> RemoteResult<Vec<Subject>> {
        let mut query = Vec::new();
        if let Some(period) = period {
            query.push(("period", period.to_string()));
        }
        self.client.get("/subjects/", &query).await
    }

    /// Creates a subject.
    pub async fn create_subject(&self, draft: &SubjectDraft) -> RemoteResult<Subject> {
        self.client.post("/subjects/", draft).await
    }

    /// Updates a subject.
    pub async fn update_subject(
        &self,
        subject_id: i64,
        draft: &SubjectDraft,
    ) -> RemoteResult<Subject> {
        self.client
            .put(&format!("/subjects/{subject_id}"), draft)
            .await
    }

    /// Deletes a subject.
    pub async fn delete_subject(&self, subject_id: i64) -> RemoteResult<()> {
        self.client.delete(&format!("/subjects/{subject_id}")).await
    }
}
