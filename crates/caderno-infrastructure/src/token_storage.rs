//! Durable storage for the access-token slot.
//!
//! The slot is a single JSON object with one well-known key:
//!
//! ```json
//! { "token": "<raw access token>" }
//! ```
//!
//! Writes go through a temp file, an fsync, and an atomic rename so a crash
//! never leaves a half-written slot behind.

use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;
use caderno_core::auth::TokenStore;
use caderno_core::error::CadernoError;
use serde::{Deserialize, Serialize};

use crate::paths::{CadernoPaths, PathError};

/// On-disk layout of the slot.
#[derive(Debug, Serialize, Deserialize)]
struct TokenSlot {
    token: String,
}

/// File-backed implementation of [`TokenStore`].
///
/// Responsibilities:
/// - Read, replace, and erase `token.json` under the config directory
/// - Keep writes atomic (temp file + rename)
/// - Restrict permissions to the owning user on Unix
///
/// Does NOT:
/// - Inspect or validate the token (that is the session manager's job)
/// - Cache the value in memory (the file is tiny and rarely read)
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store over the default slot path
    /// (`<config dir>/caderno/token.json`).
    pub fn new() -> Result<Self, PathError> {
        Ok(Self {
            path: CadernoPaths::token_file()?,
        })
    }

    /// Creates a store over a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the path of the slot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_slot(&self) -> Result<Option<TokenSlot>, CadernoError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let slot: TokenSlot = serde_json::from_str(&content)?;
        Ok(Some(slot))
    }

    fn write_slot(&self, slot: &TokenSlot) -> Result<(), CadernoError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(slot)?;

        // Write to a temp file in the same directory, then rename over the
        // slot so readers only ever see a complete file.
        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(json.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp_path, fs::Permissions::from_mode(0o600))?;
        }

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn remove_slot(&self) -> Result<(), CadernoError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn temp_path(&self) -> Result<PathBuf, CadernoError> {
        let parent = self.path.parent().ok_or_else(|| {
            CadernoError::storage("token path has no parent directory")
        })?;
        let file_name = self.path.file_name().ok_or_else(|| {
            CadernoError::storage("token path has no file name")
        })?;
        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(parent.join(tmp_name))
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<String>> {
        Ok(self.read_slot()?.map(|slot| slot.token))
    }

    async fn save(&self, token: &str) -> Result<()> {
        self.write_slot(&TokenSlot {
            token: token.to_string(),
        })?;
        tracing::debug!("token slot written");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.remove_slot()?;
        tracing::debug!("token slot cleared");
        Ok(())
    }
}
