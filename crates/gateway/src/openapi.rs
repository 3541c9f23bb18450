//! OpenAPI documentation.

use utoipa::OpenApi;

use user_service_lib::service::{UserRequest, UserResponse};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::user_handler::create_user,
        crate::handlers::user_handler::get_user_by_id,
        crate::handlers::user_handler::get_all_users,
        crate::handlers::user_handler::get_all_active_users,
        crate::handlers::user_handler::update_user,
        crate::handlers::user_handler::activate_user,
        crate::handlers::user_handler::deactivate_user,
        crate::handlers::user_handler::delete_user,
    ),
    components(schemas(UserRequest, UserResponse)),
    tags(
        (name = "Users", description = "User management endpoints"),
    )
)]
pub struct ApiDoc;
