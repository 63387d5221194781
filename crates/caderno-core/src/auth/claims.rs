//! Access-token claims and the one place they are decoded.
//!
//! The service issues a compact three-part signed token
//! (`header.claims.signature`). The client never verifies the signature
//! (that is the server's job on every request); it only inspects the claims
//! segment to know who is signed in and until when.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// URL-safe alphabet, accepting both padded and unpadded claims segments.
const CLAIMS_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Why a token could not be decoded.
///
/// Callers treat every variant the same way ("not a valid token"); the
/// variants exist so logs can say what was wrong.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The token does not have exactly three `.`-separated segments.
    #[error("token does not have three segments")]
    MalformedToken,

    /// The claims segment is not valid URL-safe base64.
    #[error("claims segment is not valid base64")]
    InvalidBase64,

    /// The decoded claims bytes are not valid UTF-8.
    #[error("claims segment is not valid UTF-8")]
    InvalidUtf8,

    /// The claims JSON is missing required fields or is not JSON at all.
    #[error("claims segment is not valid claims JSON: {0}")]
    InvalidClaims(String),
}

/// The claims segment of an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the account's e-mail address.
    pub sub: String,
    /// Expiry as Unix seconds. A token is valid strictly before this instant.
    pub exp: i64,
    /// Optional display name.
    #[serde(default)]
    pub name: Option<String>,
}

impl Claims {
    /// The expiry as a UTC instant, when it is representable.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Whether the token has expired at the given instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Whether the token has expired right now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// The name to show in the UI: the `name` claim when present, else the
    /// local part of the subject's e-mail address.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => self
                .sub
                .split('@')
                .next()
                .unwrap_or(&self.sub)
                .to_string(),
        }
    }
}

/// Decodes the claims segment of a compact three-part token.
///
/// Splits on `.`, base64-decodes the middle segment with the URL-safe
/// alphabet, and parses the result as claims JSON. Every failure maps to a
/// [`DecodeError`]; this function never panics. It is the only token
/// inspection routine in the codebase; session restore and login both go
/// through here.
pub fn decode_claims(token: &str) -> Result<Claims, DecodeError> {
    let mut segments = token.split('.');
    let (Some(_header), Some(claims), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(DecodeError::MalformedToken);
    };

    let bytes = CLAIMS_ENGINE
        .decode(claims)
        .map_err(|_| DecodeError::InvalidBase64)?;
    let json = String::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8)?;
    serde_json::from_str(&json).map_err(|err| DecodeError::InvalidClaims(err.to_string()))
}
