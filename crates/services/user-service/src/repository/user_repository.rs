//! User repository port and its SeaORM adapter.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, SqlErr,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity, Model};
use common::{AppError, AppResult};
use domain::{Email, User, UserId, EMAIL_FIELD, USER_ENTITY};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Persistence contract the use cases depend on.
///
/// Implementations must keep email addresses unique: saving a user whose
/// email belongs to a different identity fails with `AppError::Conflict`.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert or update a user, returning the stored state
    async fn save(&self, user: &User) -> AppResult<User>;

    /// Find user by identity
    async fn find_by_id(&self, id: &UserId) -> AppResult<Option<User>>;

    /// Find user by (normalized) email address
    async fn find_by_email(&self, email: &Email) -> AppResult<Option<User>>;

    /// List every user, oldest first
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// List active users, oldest first
    async fn find_all_active(&self) -> AppResult<Vec<User>>;

    /// Remove a user; removing an unknown id is a no-op
    async fn delete_by_id(&self, id: &UserId) -> AppResult<()>;

    /// Whether any user already owns the email address
    async fn exists_by_email(&self, email: &Email) -> AppResult<bool>;
}

/// SeaORM-backed implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn save(&self, user: &User) -> AppResult<User> {
        let exists = UserEntity::find_by_id(user.id().to_string())
            .one(&self.db)
            .await?
            .is_some();

        let active = ActiveModel::from(user);
        let result = if exists {
            active.update(&self.db).await
        } else {
            active.insert(&self.db).await
        };

        let model = result.map_err(map_write_error)?;
        tracing::debug!(user_id = %model.id, inserted = !exists, "User saved");
        to_domain(model)
    }

    async fn find_by_id(&self, id: &UserId) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        result.map(to_domain).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email.as_str()))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        result.map(to_domain).transpose()
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        models.into_iter().map(to_domain).collect()
    }

    async fn find_all_active(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .filter(user::Column::Active.eq(true))
            .order_by_asc(user::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        models.into_iter().map(to_domain).collect()
    }

    async fn delete_by_id(&self, id: &UserId) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        tracing::debug!(user_id = %id, rows = result.rows_affected, "User deleted");
        Ok(())
    }

    async fn exists_by_email(&self, email: &Email) -> AppResult<bool> {
        let count = UserEntity::find()
            .filter(user::Column::Email.eq(email.as_str()))
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }
}

/// Convert a stored row into the domain entity.
fn to_domain(model: Model) -> AppResult<User> {
    let id = model.id.clone();
    User::try_from(model)
        .map_err(|e| AppError::internal(format!("Corrupt user record {}: {}", id, e)))
}

/// The unique index on `email` is the last line of defence against duplicates.
fn map_write_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) => unique_violation(&message),
        _ => AppError::from(err),
    }
}

/// Name the conflicting field from the violated constraint.
fn unique_violation(message: &str) -> AppError {
    if message.to_lowercase().contains("email") {
        AppError::conflict(EMAIL_FIELD)
    } else {
        AppError::conflict(USER_ENTITY)
    }
}
