//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Validation
// =============================================================================

/// Maximum length of a first or last name (matches the storage column width)
pub const MAX_NAME_LENGTH: usize = 50;

/// Maximum length of an email address
pub const MAX_EMAIL_LENGTH: usize = 255;

/// Pattern a normalized email address must match
pub const EMAIL_PATTERN: &str = r"^[A-Za-z0-9+_.-]+@([A-Za-z0-9.-]+\.[A-Za-z]{2,})$";

// =============================================================================
// Presentation
// =============================================================================

/// Prefix applied to the display name of deactivated users
pub const INACTIVE_DISPLAY_PREFIX: &str = "[Inactive] ";

// =============================================================================
// Messages
// =============================================================================

/// Entity label used in not-found errors
pub const USER_ENTITY: &str = "User";

/// Field label used in duplicate-email errors
pub const EMAIL_FIELD: &str = "Email";
