//! In-memory token slot.
//!
//! Used by tests and by hosts without durable storage; the slot lives and
//! dies with the process.

use anyhow::Result;
use async_trait::async_trait;
use caderno_core::auth::TokenStore;
use tokio::sync::RwLock;

/// Process-local implementation of [`TokenStore`].
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with a token, as if a previous run had
    /// persisted one.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: RwLock::new(Some(token.into())),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<Option<String>> {
        Ok(self.slot.read().await.clone())
    }

    async fn save(&self, token: &str) -> Result<()> {
        *self.slot.write().await = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.slot.write().await = None;
        Ok(())
    }
}
