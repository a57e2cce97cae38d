//! Shared application state for all routes.

use crate::config::Settings;
use crate::service::UserService;
use crate::store::DocumentCollection;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
}

impl AppState {
    /// State over `collection`, using the request timeout and list policy from `settings`.
    pub fn new(collection: Arc<dyn DocumentCollection>, settings: &Settings) -> Self {
        Self {
            users: UserService::new(collection, settings.request_timeout, settings.list_policy),
        }
    }
}
