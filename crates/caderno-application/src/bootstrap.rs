//! Default wiring for host applications.

use std::sync::Arc;

use anyhow::Result;
use caderno_core::auth::TokenStore;
use caderno_infrastructure::FileTokenStore;
use caderno_interaction::{
    ApiClient, ApiConfig, AuthApi, CalendarApi, FlashcardsApi, NotesApi,
};

use crate::session_manager::SessionManager;

/// All the API bindings over one shared client.
#[derive(Clone)]
pub struct Services {
    pub notes: NotesApi,
    pub calendar: CalendarApi,
    pub flashcards: FlashcardsApi,
}

/// Builds the session manager and API bindings over the default file token
/// store and the environment-configured endpoint.
///
/// This is the composition root a desktop host calls once at startup; tests
/// wire their own fakes instead.
pub fn from_env() -> Result<(SessionManager, Services)> {
    let store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new()?);
    let client = ApiClient::new(ApiConfig::from_env(), Arc::clone(&store));

    let manager = SessionManager::new(store, Arc::new(AuthApi::new(client.clone())));
    let services = Services {
        notes: NotesApi::new(client.clone()),
        calendar: CalendarApi::new(client.clone()),
        flashcards: FlashcardsApi::new(client),
    };

    Ok((manager, services))
}

/// Builds only the session manager, for hosts that wire the rest themselves.
pub fn session_manager_from_env() -> Result<SessionManager> {
    let store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new()?);
    let client = ApiClient::new(ApiConfig::from_env(), Arc::clone(&store));
    Ok(SessionManager::new(
        store,
        Arc::new(AuthApi::new(client)),
    ))
}
