//! User service - orchestrates the user management use cases.
//!
//! Each operation loads the aggregate through the repository port, applies
//! domain rules, persists the result and hands back a transport DTO.

use async_trait::async_trait;
use std::sync::Arc;
use validator::{Validate, ValidationErrors};

use common::{AppError, AppResult, OptionExt};
use domain::{Email, User, UserCreatedEvent, UserDomainService, UserId, EMAIL_FIELD, USER_ENTITY};

use super::dto::{UserRequest, UserResponse};
use crate::repository::UserRepository;

/// User management use cases (input port).
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new, active user
    async fn create_user(&self, request: UserRequest) -> AppResult<UserResponse>;

    /// Get user by ID
    async fn get_user_by_id(&self, id: &str) -> AppResult<UserResponse>;

    /// List all users
    async fn get_all_users(&self) -> AppResult<Vec<UserResponse>>;

    /// List active users only
    async fn get_all_active_users(&self) -> AppResult<Vec<UserResponse>>;

    /// Replace names and email
    async fn update_user(&self, id: &str, request: UserRequest) -> AppResult<UserResponse>;

    /// Re-activate a deactivated user
    async fn activate_user(&self, id: &str) -> AppResult<UserResponse>;

    /// Deactivate an active user
    async fn deactivate_user(&self, id: &str) -> AppResult<UserResponse>;

    /// Permanently remove a user
    async fn delete_user(&self, id: &str) -> AppResult<()>;
}

/// Concrete implementation of UserService using the repository port.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    policy: UserDomainService,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self {
            repo,
            policy: UserDomainService::new(),
        }
    }

    async fn find_user_or_fail(&self, id: &str) -> AppResult<User> {
        let user_id = UserId::of(id)?;
        self.repo
            .find_by_id(&user_id)
            .await?
            .ok_or_not_found(USER_ENTITY)
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, request: UserRequest) -> AppResult<UserResponse> {
        request.validate().map_err(validation_error)?;

        let email = Email::of(&request.email)?;
        if self.repo.exists_by_email(&email).await? {
            tracing::warn!(email = %email, "Rejected user creation: email already exists");
            return Err(AppError::conflict(EMAIL_FIELD));
        }

        let user = User::create(
            UserId::generate(),
            &request.first_name,
            &request.last_name,
            email,
        )?;
        let saved = self.repo.save(&user).await?;

        let event = UserCreatedEvent::from(&saved);
        tracing::info!(
            user_id = %event.user_id,
            user_full_name = %event.user_full_name,
            occurred_on = %event.occurred_on,
            "User created"
        );

        Ok(UserResponse::from(saved))
    }

    async fn get_user_by_id(&self, id: &str) -> AppResult<UserResponse> {
        let user = self.find_user_or_fail(id).await?;
        Ok(UserResponse::from(user))
    }

    async fn get_all_users(&self) -> AppResult<Vec<UserResponse>> {
        let users = self.repo.find_all().await?;
        Ok(users.iter().map(UserResponse::from).collect())
    }

    async fn get_all_active_users(&self) -> AppResult<Vec<UserResponse>> {
        let users = self.repo.find_all_active().await?;
        Ok(users.iter().map(UserResponse::from).collect())
    }

    async fn update_user(&self, id: &str, request: UserRequest) -> AppResult<UserResponse> {
        request.validate().map_err(validation_error)?;

        let mut user = self.find_user_or_fail(id).await?;
        let new_email = Email::of(&request.email)?;

        // Updates must move the user to a new address, and only active users may.
        if !self.policy.can_change_email(&user, &new_email) {
            tracing::warn!(user_id = %user.id(), "Rejected update: email change not allowed");
            return Err(AppError::invalid_state("Cannot change email for this user"));
        }
        if self.repo.exists_by_email(&new_email).await? {
            tracing::warn!(user_id = %user.id(), email = %new_email, "Rejected email change: email already exists");
            return Err(AppError::conflict(EMAIL_FIELD));
        }

        user.update_personal_info(&request.first_name, &request.last_name, new_email)?;
        let saved = self.repo.save(&user).await?;
        tracing::info!(user_id = %saved.id(), "User updated");

        Ok(UserResponse::from(saved))
    }

    async fn activate_user(&self, id: &str) -> AppResult<UserResponse> {
        let mut user = self.find_user_or_fail(id).await?;
        user.activate()?;

        let saved = self.repo.save(&user).await?;
        tracing::info!(user_id = %saved.id(), name = %self.policy.display_name(&saved), "User activated");

        Ok(UserResponse::from(saved))
    }

    async fn deactivate_user(&self, id: &str) -> AppResult<UserResponse> {
        let mut user = self.find_user_or_fail(id).await?;

        if !self.policy.can_deactivate_user(&user) {
            return Err(AppError::invalid_state("Cannot deactivate this user"));
        }
        user.deactivate()?;

        let saved = self.repo.save(&user).await?;
        tracing::info!(user_id = %saved.id(), name = %self.policy.display_name(&saved), "User deactivated");

        Ok(UserResponse::from(saved))
    }

    async fn delete_user(&self, id: &str) -> AppResult<()> {
        let user = self.find_user_or_fail(id).await?;
        self.repo.delete_by_id(user.id()).await?;
        tracing::info!(user_id = %user.id(), "User deleted");
        Ok(())
    }
}

/// First validation message, or a generic one.
fn validation_error(errors: ValidationErrors) -> AppError {
    let message = errors
        .field_errors()
        .values()
        .next()
        .and_then(|errors| errors.first())
        .and_then(|error| error.message.as_ref())
        .map(|msg| msg.to_string())
        .unwrap_or_else(|| "Validation failed".to_string());
    AppError::validation(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use tokio_test::{assert_err, assert_ok};

    fn stored_user(id: &str, email: &str) -> User {
        User::create(UserId::of(id).unwrap(), "Ann", "Lee", Email::of(email).unwrap()).unwrap()
    }

    fn manager(repo: MockUserRepository) -> UserManager {
        UserManager::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn create_user_normalizes_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_exists_by_email()
            .withf(|email| email.as_str() == "ann@example.com")
            .returning(|_| Ok(false));
        repo.expect_save()
            .times(1)
            .returning(|user| Ok(user.clone()));

        let response = manager(repo)
            .create_user(UserRequest::new("Ann", "Lee", "Ann@Example.com"))
            .await
            .unwrap();

        assert_eq!(response.email, "ann@example.com");
        assert!(response.active);
        assert!(!response.id.is_empty());
    }

    #[tokio::test]
    async fn create_user_rejects_duplicate_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_exists_by_email().returning(|_| Ok(true));
        repo.expect_save().never();

        let result = manager(repo)
            .create_user(UserRequest::new("Ann", "Lee", "ANN@example.com"))
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn create_user_rejects_malformed_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_exists_by_email().never();

        let result = manager(repo)
            .create_user(UserRequest::new("Ann", "Lee", "not-an-email"))
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn create_user_rejects_blank_name() {
        let mut repo = MockUserRepository::new();
        repo.expect_exists_by_email().returning(|_| Ok(false));
        repo.expect_save().never();

        let result = manager(repo)
            .create_user(UserRequest::new("   ", "Lee", "ann@example.com"))
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn get_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let result = manager(repo).get_user_by_id("missing").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn blank_id_is_rejected_before_lookup() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().never();

        let result = manager(repo).get_user_by_id("  ").await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn list_active_users() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_all_active().returning(|| {
            Ok(vec![
                stored_user("u-1", "a@example.com"),
                stored_user("u-2", "b@example.com"),
            ])
        });

        let users = assert_ok!(manager(repo).get_all_active_users().await);
        assert_eq!(users.len(), 2);
    }

    #[tokio::test]
    async fn update_keeping_same_email_is_invalid_state() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(stored_user(id.as_str(), "ann@example.com"))));
        repo.expect_exists_by_email().never();
        repo.expect_save().never();

        let result = manager(repo)
            .update_user("u-1", UserRequest::new("Anna", "Lee", "Ann@Example.com"))
            .await;

        assert!(matches!(result, Err(AppError::InvalidState(_))));
    }

    #[tokio::test]
    async fn update_to_new_email_saves() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(stored_user(id.as_str(), "ann@example.com"))));
        repo.expect_exists_by_email()
            .withf(|email| email.as_str() == "anna@example.com")
            .returning(|_| Ok(false));
        repo.expect_save()
            .times(1)
            .returning(|user| Ok(user.clone()));

        let response = manager(repo)
            .update_user("u-1", UserRequest::new("Anna", "Lee", "Anna@Example.com"))
            .await
            .unwrap();

        assert_eq!(response.first_name, "Anna");
        assert_eq!(response.email, "anna@example.com");
    }

    #[tokio::test]
    async fn update_to_taken_email_conflicts() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(stored_user(id.as_str(), "ann@example.com"))));
        repo.expect_exists_by_email()
            .withf(|email| email.as_str() == "bob@example.com")
            .returning(|_| Ok(true));
        repo.expect_save().never();

        let result = manager(repo)
            .update_user("u-1", UserRequest::new("Ann", "Lee", "bob@example.com"))
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn inactive_user_cannot_change_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|id| {
            let mut user = stored_user(id.as_str(), "ann@example.com");
            user.deactivate().unwrap();
            Ok(Some(user))
        });
        repo.expect_save().never();

        let result = manager(repo)
            .update_user("u-1", UserRequest::new("Ann", "Lee", "new@example.com"))
            .await;

        assert!(matches!(result, Err(AppError::InvalidState(_))));
    }

    #[tokio::test]
    async fn inactive_user_cannot_rename() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|id| {
            let mut user = stored_user(id.as_str(), "ann@example.com");
            user.deactivate().unwrap();
            Ok(Some(user))
        });
        repo.expect_save().never();

        let result = manager(repo)
            .update_user("u-1", UserRequest::new("Zed", "Lee", "ann@example.com"))
            .await;

        assert!(matches!(result, Err(AppError::InvalidState(_))));
    }

    #[tokio::test]
    async fn activate_active_user_fails() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(stored_user(id.as_str(), "ann@example.com"))));
        repo.expect_save().never();

        let result = manager(repo).activate_user("u-1").await;
        assert!(matches!(result, Err(AppError::InvalidState(_))));
    }

    #[tokio::test]
    async fn deactivate_then_deactivate_again() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(stored_user(id.as_str(), "ann@example.com"))));
        repo.expect_save().returning(|user| Ok(user.clone()));

        let response = manager(repo).deactivate_user("u-1").await.unwrap();
        assert!(!response.active);

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|id| {
            let mut user = stored_user(id.as_str(), "ann@example.com");
            user.deactivate().unwrap();
            Ok(Some(user))
        });
        repo.expect_save().never();

        let result = manager(repo).deactivate_user("u-1").await;
        assert!(matches!(result, Err(AppError::InvalidState(_))));
    }

    #[tokio::test]
    async fn delete_missing_user_is_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_delete_by_id().never();

        let result = manager(repo).delete_user("missing").await;
        assert!(matches!(assert_err!(result), AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_existing_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(stored_user(id.as_str(), "ann@example.com"))));
        repo.expect_delete_by_id()
            .withf(|id| id.as_str() == "u-1")
            .times(1)
            .returning(|_| Ok(()));

        assert_ok!(manager(repo).delete_user("u-1").await);
    }
}
