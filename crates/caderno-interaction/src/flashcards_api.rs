//! Flashcard generation endpoint.

use caderno_core::remote::RemoteResult;
use caderno_core::study::{Flashcard, FlashcardRequest};

use crate::client::ApiClient;

/// Typed wrapper over the AI flashcard generator.
#[derive(Clone)]
pub struct FlashcardsApi {
    client: ApiClient,
}

impl FlashcardsApi {
    /// Creates the binding over a shared client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Asks the service to generate flashcards for a topic.
    ///
    /// Generation runs on the server and can take a while; the shared
    /// request timeout still applies.
    pub async fn generate(&self, request: &FlashcardRequest) -> RemoteResult<Vec<Flashcard>> {
        self.client.post("/flashcards/generate", request).await
    }
}
