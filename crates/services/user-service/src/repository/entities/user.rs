//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::{DomainResult, Email, User, UserId};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Rebuild the domain entity, keeping the stored activity flag and timestamps.
impl TryFrom<Model> for User {
    type Error = domain::DomainError;

    fn try_from(model: Model) -> DomainResult<Self> {
        User::restore(
            UserId::of(&model.id)?,
            &model.first_name,
            &model.last_name,
            Email::of(&model.email)?,
            model.active,
            model.created_at,
            model.updated_at,
        )
    }
}

impl From<&User> for ActiveModel {
    fn from(user: &User) -> Self {
        ActiveModel {
            id: Set(user.id().to_string()),
            first_name: Set(user.first_name().to_string()),
            last_name: Set(user.last_name().to_string()),
            email: Set(user.email().to_string()),
            active: Set(user.is_active()),
            created_at: Set(user.created_at()),
            updated_at: Set(user.updated_at()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn model() -> Model {
        Model {
            id: "u-1".to_string(),
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "ann@example.com".to_string(),
            active: false,
            created_at: Utc::now() - Duration::days(10),
            updated_at: Utc::now() - Duration::days(2),
        }
    }

    #[test]
    fn model_to_domain_keeps_full_state() {
        let m = model();
        let user = User::try_from(m.clone()).unwrap();

        assert_eq!(user.id().as_str(), "u-1");
        assert!(!user.is_active());
        assert_eq!(user.created_at(), m.created_at);
        assert_eq!(user.updated_at(), m.updated_at);
    }

    #[test]
    fn corrupt_record_is_rejected() {
        let mut m = model();
        m.email = "broken".to_string();
        assert!(User::try_from(m).is_err());
    }

    #[test]
    fn domain_to_active_model() {
        let user = User::try_from(model()).unwrap();
        let active = ActiveModel::from(&user);

        assert_eq!(active.id, Set("u-1".to_string()));
        assert_eq!(active.email, Set("ann@example.com".to_string()));
        assert_eq!(active.active, Set(false));
    }
}
