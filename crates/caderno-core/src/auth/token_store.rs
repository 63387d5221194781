//! Persisted token slot contract.

use anyhow::Result;
use async_trait::async_trait;

/// The single durable key-value slot holding the raw access token.
///
/// This trait decouples the session manager from the storage mechanism
/// (a JSON file on desktop, an in-memory slot in tests). The session
/// manager is the only writer; every other component treats the slot as
/// opaque.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Returns the stored token, or `None` when the slot is empty.
    async fn load(&self) -> Result<Option<String>>;

    /// Replaces the slot content with the given token.
    async fn save(&self, token: &str) -> Result<()>;

    /// Empties the slot. Clearing an already empty slot succeeds.
    async fn clear(&self) -> Result<()>;
}
