use utoipa::OpenApi;

use crate::models::{
    CreateUserRequest, ErrorResponse, EventResponse, EventSummaryResponse, ExistsResponse,
    FieldUpdateRequest, FieldValueRequest, HealthResponse, RegisterUserRequest, UserField,
    UserResponse, UserWithEventsResponse,
};

/// OpenAPI documentation for the user service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Event Coordination Users API",
        version = "0.1.0",
        description = "Create, look up, update, delete, and search users, and list the events they created or take part in.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Users", description = "User CRUD and search"),
        (name = "Events", description = "Events related to a user")
    ),
    paths(
        crate::handlers::create_user,
        crate::handlers::register_user,
        crate::handlers::search_users,
        crate::handlers::get_user,
        crate::handlers::get_raw_user,
        crate::handlers::user_exists,
        crate::handlers::update_user_fields,
        crate::handlers::update_user_field,
        crate::handlers::delete_user,
        crate::handlers::get_participating_events,
        crate::handlers::get_created_events,
        crate::routes::health_check
    ),
    components(
        schemas(
            CreateUserRequest,
            RegisterUserRequest,
            FieldUpdateRequest,
            FieldValueRequest,
            UserField,
            UserResponse,
            UserWithEventsResponse,
            EventResponse,
            EventSummaryResponse,
            ExistsResponse,
            ErrorResponse,
            HealthResponse
        )
    )
)]
pub struct ApiDoc;
