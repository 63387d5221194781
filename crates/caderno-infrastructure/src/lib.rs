//! Local persistence for the Caderno client.
//!
//! This crate owns the one durable piece of client state: the access-token
//! slot. Everything else the UI shows is fetched from the service.

pub mod memory;
pub mod paths;
pub mod token_storage;

pub use memory::MemoryTokenStore;
pub use paths::{CadernoPaths, PathError};
pub use token_storage::FileTokenStore;
