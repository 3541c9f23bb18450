//! Application layer - use cases and transport DTOs.

pub mod dto;
mod user_service;

pub use dto::{UserRequest, UserResponse};
pub use user_service::{UserManager, UserService};
