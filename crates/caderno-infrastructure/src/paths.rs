//! Unified path management for Caderno's local files.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// The platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => {
                write!(f, "Could not determine the platform config directory")
            }
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for Caderno.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/caderno/           # Config directory (platform-specific)
/// └── token.json               # The persisted access-token slot
/// ```
pub struct CadernoPaths;

impl CadernoPaths {
    /// Returns the Caderno configuration directory.
    ///
    /// Platform-specific: `~/.config/caderno` on Linux, the equivalent
    /// application-support directory elsewhere.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("caderno"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to the persisted token slot.
    ///
    /// # Security Note
    ///
    /// The file holds a live credential; the storage layer creates it with
    /// user-only permissions on Unix.
    pub fn token_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("token.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir() {
        let config_dir = CadernoPaths::config_dir().unwrap();
        assert!(config_dir.ends_with("caderno"));
    }

    #[test]
    fn test_token_file_is_under_config_dir() {
        let token_file = CadernoPaths::token_file().unwrap();
        assert!(token_file.ends_with("token.json"));
        let config_dir = CadernoPaths::config_dir().unwrap();
        assert!(token_file.starts_with(&config_dir));
    }
}
