//! In-memory implementation of UserRepository (for development/testing).

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use common::{AppError, AppResult};
use domain::{Email, User, UserId, EMAIL_FIELD};

use super::UserRepository;

#[derive(Debug, Default, Clone)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

fn sorted_by_creation(mut users: Vec<User>) -> Vec<User> {
    users.sort_by(|a, b| {
        a.created_at()
            .cmp(&b.created_at())
            .then_with(|| a.id().as_str().cmp(b.id().as_str()))
    });
    users
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn save(&self, user: &User) -> AppResult<User> {
        let mut users = self.users.write().await;

        // Same check the unique index performs in the database
        let taken = users
            .values()
            .any(|u| u.email() == user.email() && u.id() != user.id());
        if taken {
            return Err(AppError::conflict(EMAIL_FIELD));
        }

        users.insert(user.id().clone(), user.clone());
        Ok(user.clone())
    }

    async fn find_by_id(&self, id: &UserId) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email() == email).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(sorted_by_creation(users.values().cloned().collect()))
    }

    async fn find_all_active(&self) -> AppResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(sorted_by_creation(
            users.values().filter(|u| u.is_active()).cloned().collect(),
        ))
    }

    async fn delete_by_id(&self, id: &UserId) -> AppResult<()> {
        self.users.write().await.remove(id);
        Ok(())
    }

    async fn exists_by_email(&self, email: &Email) -> AppResult<bool> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.email() == email))
    }
}
