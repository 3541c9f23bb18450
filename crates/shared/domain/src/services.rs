//! Domain service - user policies that don't belong to a single entity method.

use crate::constants::INACTIVE_DISPLAY_PREFIX;
use crate::email::Email;
use crate::user::User;

/// Stateless policy checks over users.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserDomainService;

impl UserDomainService {
    pub fn new() -> Self {
        Self
    }

    /// Whether the user may be deactivated.
    pub fn can_deactivate_user(&self, user: &User) -> bool {
        user.is_active()
    }

    /// Whether the user may switch to `new_email`.
    ///
    /// Inactive users keep their address, and switching to the current
    /// address is not a change.
    pub fn can_change_email(&self, user: &User, new_email: &Email) -> bool {
        user.is_active() && user.email() != new_email
    }

    /// Name shown for the user in listings and logs.
    pub fn display_name(&self, user: &User) -> String {
        if user.is_active() {
            user.full_name()
        } else {
            format!("{}{}", INACTIVE_DISPLAY_PREFIX, user.full_name())
        }
    }
}
