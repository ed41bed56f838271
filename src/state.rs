//! Shared application state for all routes.

use crate::service::UserService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService>,
}

impl AppState {
    pub fn new(users: UserService) -> Self {
        Self { users: Arc::new(users) }
    }
}
