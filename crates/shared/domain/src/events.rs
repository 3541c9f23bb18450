//! Domain events.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::user::User;
use crate::user_id::UserId;

/// Raised once a new user has been persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreatedEvent {
    pub user_id: UserId,
    pub user_full_name: String,
    pub occurred_on: DateTime<Utc>,
}

impl UserCreatedEvent {
    pub fn new(user_id: UserId, user_full_name: impl Into<String>) -> Self {
        Self {
            user_id,
            user_full_name: user_full_name.into(),
            occurred_on: Utc::now(),
        }
    }
}

impl From<&User> for UserCreatedEvent {
    fn from(user: &User) -> Self {
        Self::new(user.id().clone(), user.full_name())
    }
}
