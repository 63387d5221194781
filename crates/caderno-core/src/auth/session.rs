//! Process-local session state.
//!
//! The session is derived state: it is rebuilt from the persisted token at
//! startup and from login results after that. It is owned by the session
//! manager; everything else reads snapshots.

use serde::{Deserialize, Serialize};

use super::claims::Claims;

/// Who the user is, as the UI needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Account subject (e-mail address).
    pub subject: String,
    /// Name shown in the header and greetings.
    pub display_name: String,
}

impl Identity {
    /// Derives an identity from decoded token claims.
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            subject: claims.sub.clone(),
            display_name: claims.display_name(),
        }
    }
}

/// Whether the session has finished resolving.
///
/// `Loading` exists only between process start and the end of
/// `initialize()`; the manager guarantees every path through initialization
/// ends in `Resolved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Initialization has not finished yet.
    #[default]
    Loading,
    /// The session is settled, authenticated or not.
    Resolved,
}

/// A snapshot of the current session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    /// The signed-in identity, absent when unauthenticated.
    pub identity: Option<Identity>,
    /// Resolution state.
    pub status: SessionStatus,
}

impl Session {
    /// The pristine pre-initialization state.
    pub fn unresolved() -> Self {
        Self::default()
    }

    /// A settled session, authenticated when `identity` is present.
    pub fn resolved(identity: Option<Identity>) -> Self {
        Self {
            identity,
            status: SessionStatus::Resolved,
        }
    }

    /// Whether a user is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// Whether initialization has finished.
    pub fn is_resolved(&self) -> bool {
        self.status == SessionStatus::Resolved
    }
}
