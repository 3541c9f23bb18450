//! User domain entity.

use chrono::{DateTime, Utc};

use crate::email::Email;
use crate::error::{DomainError, DomainResult};
use crate::user_id::UserId;

/// User aggregate.
///
/// Fields are private so that every mutation goes through a method that
/// upholds the invariants: names are non-blank and trimmed, the identity never
/// changes, and activation only flips from the opposite state.
#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    first_name: String,
    last_name: String,
    email: Email,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new, active user.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidArgument` if either name is blank.
    pub fn create(id: UserId, first_name: &str, last_name: &str, email: Email) -> DomainResult<Self> {
        let first_name = validate_name(first_name, "First name")?;
        let last_name = validate_name(last_name, "Last name")?;
        let now = Utc::now();

        Ok(Self {
            id,
            first_name,
            last_name,
            email,
            active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuild a user from persisted state.
    ///
    /// Names are validated again so a corrupted record cannot produce an
    /// entity that violates the invariants.
    pub fn restore(
        id: UserId,
        first_name: &str,
        last_name: &str,
        email: Email,
        active: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        Ok(Self {
            id,
            first_name: validate_name(first_name, "First name")?,
            last_name: validate_name(last_name, "Last name")?,
            email,
            active,
            created_at,
            updated_at,
        })
    }

    /// Replace names and email.
    pub fn update_personal_info(
        &mut self,
        first_name: &str,
        last_name: &str,
        email: Email,
    ) -> DomainResult<()> {
        let first_name = validate_name(first_name, "First name")?;
        let last_name = validate_name(last_name, "Last name")?;

        self.first_name = first_name;
        self.last_name = last_name;
        self.email = email;
        self.touch();
        Ok(())
    }

    /// Activate an inactive user.
    pub fn activate(&mut self) -> DomainResult<()> {
        if self.active {
            return Err(DomainError::invalid_state("User is already active"));
        }
        self.active = true;
        self.touch();
        Ok(())
    }

    /// Deactivate an active user.
    pub fn deactivate(&mut self) -> DomainResult<()> {
        if !self.active {
            return Err(DomainError::invalid_state("User is already inactive"));
        }
        self.active = false;
        self.touch();
        Ok(())
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Users are the same entity when their identities match.
impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}

fn validate_name(name: &str, field: &str) -> DomainResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::invalid_argument(format!(
            "{} cannot be empty",
            field
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann() -> User {
        User::create(
            UserId::of("u-1").unwrap(),
            "Ann",
            "Lee",
            Email::of("Ann@Example.com").unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn create_sets_defaults() {
        let user = ann();
        assert!(user.is_active());
        assert_eq!(user.email().as_str(), "ann@example.com");
        assert_eq!(user.created_at(), user.updated_at());
        assert_eq!(user.full_name(), "Ann Lee");
    }

    #[test]
    fn create_trims_names() {
        let user = User::create(
            UserId::of("u-2").unwrap(),
            "  Bob ",
            "\tStone ",
            Email::of("bob@example.com").unwrap(),
        )
        .unwrap();
        assert_eq!(user.first_name(), "Bob");
        assert_eq!(user.last_name(), "Stone");
    }

    #[test]
    fn create_rejects_blank_names() {
        let email = Email::of("x@example.com").unwrap();
        let first = User::create(UserId::of("u").unwrap(), " ", "Lee", email.clone());
        let last = User::create(UserId::of("u").unwrap(), "Ann", "", email);
        assert!(matches!(first, Err(DomainError::InvalidArgument(_))));
        assert!(matches!(last, Err(DomainError::InvalidArgument(_))));
    }

    #[test]
    fn activate_requires_inactive_user() {
        let mut user = ann();
        assert!(matches!(user.activate(), Err(DomainError::InvalidState(_))));

        user.deactivate().unwrap();
        assert!(!user.is_active());
        user.activate().unwrap();
        assert!(user.is_active());
    }

    #[test]
    fn deactivate_requires_active_user() {
        let mut user = ann();
        user.deactivate().unwrap();
        assert!(matches!(user.deactivate(), Err(DomainError::InvalidState(_))));
    }

    #[test]
    fn update_personal_info_bumps_updated_at() {
        let mut user = ann();
        let before = user.updated_at();
        user.update_personal_info(" Anna ", "Lee-Smith", Email::of("anna@example.com").unwrap())
            .unwrap();

        assert_eq!(user.first_name(), "Anna");
        assert_eq!(user.last_name(), "Lee-Smith");
        assert_eq!(user.email().as_str(), "anna@example.com");
        assert!(user.updated_at() >= before);
        assert_eq!(user.id().as_str(), "u-1");
    }

    #[test]
    fn failed_update_leaves_user_untouched() {
        let mut user = ann();
        let result = user.update_personal_info("", "Lee", Email::of("new@example.com").unwrap());
        assert!(result.is_err());
        assert_eq!(user.first_name(), "Ann");
        assert_eq!(user.email().as_str(), "ann@example.com");
    }

    #[test]
    fn restore_keeps_persisted_state() {
        let created = Utc::now() - chrono::Duration::days(3);
        let updated = Utc::now() - chrono::Duration::days(1);
        let user = User::restore(
            UserId::of("u-9").unwrap(),
            "Ann",
            "Lee",
            Email::of("ann@example.com").unwrap(),
            false,
            created,
            updated,
        )
        .unwrap();

        assert!(!user.is_active());
        assert_eq!(user.created_at(), created);
        assert_eq!(user.updated_at(), updated);
    }

    #[test]
    fn equality_is_by_identity() {
        let a = ann();
        let mut b = ann();
        b.update_personal_info("Other", "Name", Email::of("other@example.com").unwrap())
            .unwrap();
        assert_eq!(a, b);
    }
}
