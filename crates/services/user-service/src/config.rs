//! User service configuration.

use std::env;

use common::{DatabaseConfig, StorageBackend};

/// Prefix for service-specific environment variables.
const ENV_PREFIX: &str = "USER_SERVICE";

/// User service configuration.
#[derive(Debug, Clone, Default)]
pub struct UserServiceConfig {
    /// Where users are persisted
    pub storage: StorageBackend,
    /// Database settings (ignored by the in-memory backend)
    pub database: DatabaseConfig,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let storage = match env::var(format!("{}_STORAGE", ENV_PREFIX)) {
            Ok(raw) => raw.parse::<StorageBackend>().unwrap_or_else(|e: String| {
                tracing::warn!("{}; falling back to {}", e, StorageBackend::default());
                StorageBackend::default()
            }),
            Err(_) => StorageBackend::default(),
        };

        Self {
            storage,
            database: DatabaseConfig::from_env(ENV_PREFIX),
        }
    }

    /// Configuration for the in-memory backend.
    pub fn in_memory() -> Self {
        Self {
            storage: StorageBackend::Memory,
            ..Self::default()
        }
    }
}
