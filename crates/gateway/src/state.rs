//! Application state for dependency injection.

use std::sync::Arc;

use user_service_lib::infra::Database;
use user_service_lib::service::UserService;
use user_service_lib::UserServiceComponents;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    /// Present when users are stored in PostgreSQL
    pub database: Option<Database>,
}

impl AppState {
    /// Create new app state.
    pub fn new(user_service: Arc<dyn UserService>, database: Option<Database>) -> Self {
        Self {
            user_service,
            database,
        }
    }
}

impl From<UserServiceComponents> for AppState {
    fn from(components: UserServiceComponents) -> Self {
        Self::new(components.service, components.database)
    }
}
