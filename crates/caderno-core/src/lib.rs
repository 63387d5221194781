pub mod auth;
pub mod error;
pub mod remote;
pub mod study;
pub mod validate;

// Re-export common error type
pub use error::CadernoError;
pub use remote::{RemoteError, RemoteResult};
