//! User Service Library
//!
//! Application core for user management: the use-case service, the
//! repository port, and the persistence adapters behind it. The HTTP adapter
//! lives in the gateway crate and only talks to [`service::UserService`].

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use common::StorageBackend;
use sea_orm::DbErr;
use tracing::info;

use crate::config::UserServiceConfig;
use crate::infra::Database;
use crate::repository::{InMemoryUserStore, UserRepository, UserStore};
use crate::service::{UserManager, UserService};

/// Wired-up user service plus the database it runs on, if any.
#[derive(Clone)]
pub struct UserServiceComponents {
    pub service: Arc<dyn UserService>,
    pub database: Option<Database>,
}

/// Build the repository and use-case service for the configured backend.
///
/// The PostgreSQL backend connects and applies pending migrations first.
pub async fn build(config: &UserServiceConfig) -> Result<UserServiceComponents, DbErr> {
    let (repo, database) = match config.storage {
        StorageBackend::Postgres => {
            let db = Database::connect(&config.database).await?;
            let repo: Arc<dyn UserRepository> = Arc::new(UserStore::new(db.get_connection()));
            (repo, Some(db))
        }
        StorageBackend::Memory => {
            info!("Using in-memory user storage; data is lost on restart");
            let repo: Arc<dyn UserRepository> = Arc::new(InMemoryUserStore::new());
            (repo, None)
        }
    };

    Ok(UserServiceComponents {
        service: Arc::new(UserManager::new(repo)),
        database,
    })
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = UserServiceConfig::from_env();
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}
