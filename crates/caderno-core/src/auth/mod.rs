//! Credential and session domain: claims decoding, session state, and the
//! contracts the session manager is composed from.

pub mod claims;
pub mod gateway;
pub mod session;
pub mod token_store;

pub use claims::{Claims, DecodeError, decode_claims};
pub use gateway::AuthGateway;
pub use session::{Identity, Session, SessionStatus};
pub use token_store::TokenStore;
