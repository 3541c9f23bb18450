//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the `User` aggregate, its value objects, the user domain service and the
//! events raised by the use cases.

pub mod constants;
pub mod email;
pub mod error;
pub mod events;
pub mod services;
pub mod user;
pub mod user_id;

pub use constants::*;
pub use email::Email;
pub use error::{DomainError, DomainResult};
pub use events::UserCreatedEvent;
pub use services::UserDomainService;
pub use user::User;
pub use user_id::UserId;
