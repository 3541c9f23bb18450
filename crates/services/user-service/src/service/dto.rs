//! Transport DTOs exchanged with the use cases.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use domain::User;

/// Create/update payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    /// Given name
    #[validate(length(min = 1, max = 50, message = "First name must be 1-50 characters"))]
    #[cfg_attr(feature = "openapi", schema(example = "Ann"))]
    pub first_name: String,
    /// Family name
    #[validate(length(min = 1, max = 50, message = "Last name must be 1-50 characters"))]
    #[cfg_attr(feature = "openapi", schema(example = "Lee"))]
    pub last_name: String,
    /// Email address, stored lowercased
    #[validate(length(min = 1, max = 255, message = "Email must be 1-255 characters"))]
    #[cfg_attr(feature = "openapi", schema(example = "ann@example.com"))]
    pub email: String,
}

impl UserRequest {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }
}

/// User representation returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Unique user identifier
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Whether the account is active
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            first_name: user.first_name().to_string(),
            last_name: user.last_name().to_string(),
            email: user.email().to_string(),
            active: user.is_active(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse::from(&user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{Email, UserId};

    #[test]
    fn request_uses_camel_case() {
        let request: UserRequest = serde_json::from_str(
            r#"{"firstName":"Ann","lastName":"Lee","email":"Ann@Example.com"}"#,
        )
        .unwrap();
        assert_eq!(request.first_name, "Ann");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn request_validation_limits() {
        assert!(UserRequest::new("", "Lee", "a@example.com").validate().is_err());
        assert!(UserRequest::new("A".repeat(51), "Lee", "a@example.com")
            .validate()
            .is_err());
        assert!(UserRequest::new("Ann", "Lee", "").validate().is_err());
    }

    #[test]
    fn response_from_user() {
        let user = User::create(
            UserId::of("u-1").unwrap(),
            "Ann",
            "Lee",
            Email::of("Ann@Example.com").unwrap(),
        )
        .unwrap();

        let json = serde_json::to_value(UserResponse::from(&user)).unwrap();
        assert_eq!(json["id"], "u-1");
        assert_eq!(json["firstName"], "Ann");
        assert_eq!(json["email"], "ann@example.com");
        assert_eq!(json["active"], true);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
    }
}
