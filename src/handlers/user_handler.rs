//! User handlers: thin translation between HTTP and the user repository.

use actix_web::{web, HttpResponse};
use log::debug;

use crate::constants::{
    MSG_USERS_MATCHED, MSG_USER_CREATED, MSG_USER_DELETED, MSG_USER_EXISTS, MSG_USER_FOUND,
    MSG_USER_UPDATED,
};
use crate::errors::{ApiError, RepoResult};
use crate::models::{
    ApiResponse, CreateUserRequest, ExistsResponse, FieldUpdateRequest, FieldValueRequest,
    RegisterUserRequest, UserResponse, UserSearchQuery, UserUpdate, UserWithEventsResponse,
};
use crate::repositories::UserRepository;

/// Create a user from a full document
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation error", body = crate::models::ErrorResponse),
        (status = 409, description = "Username already taken", body = crate::models::ErrorResponse)
    )
)]
pub async fn create_user(
    repository: web::Data<UserRepository>,
    body: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, ApiError> {
    let new_user = body.into_inner().into_new_user()?;
    let user = repository.create_full(new_user).await?;

    let user_response: UserResponse = user.into();
    Ok(HttpResponse::Created().json(ApiResponse::success(MSG_USER_CREATED, user_response)))
}

/// Create a user from the mandatory fields only
#[utoipa::path(
    post,
    path = "/api/users/register",
    tag = "Users",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation error", body = crate::models::ErrorResponse),
        (status = 409, description = "Username already taken", body = crate::models::ErrorResponse)
    )
)]
pub async fn register_user(
    repository: web::Data<UserRepository>,
    body: web::Json<RegisterUserRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = body.into_inner();
    let user = repository
        .create_basic(&req.firstname, &req.lastname, &req.username, &req.email)
        .await?;

    let user_response: UserResponse = user.into();
    Ok(HttpResponse::Created().json(ApiResponse::success(MSG_USER_CREATED, user_response)))
}

/// Search users by username
///
/// `q` is a case-insensitive regular expression unless `literal=true`.
/// At most 10 users are returned.
#[utoipa::path(
    get,
    path = "/api/users/search",
    tag = "Users",
    params(UserSearchQuery),
    responses(
        (status = 200, description = "Matching users", body = [UserWithEventsResponse]),
        (status = 400, description = "Invalid pattern", body = crate::models::ErrorResponse)
    )
)]
pub async fn search_users(
    repository: web::Data<UserRepository>,
    query: web::Query<UserSearchQuery>,
) -> Result<HttpResponse, ApiError> {
    let users = if query.literal {
        repository.find_matching_users_literal(&query.q).await?
    } else {
        repository.find_matching_users(&query.q).await?
    };

    let data: Vec<UserWithEventsResponse> = users.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_USERS_MATCHED, data)))
}

/// Get a user with the events they participate in
#[utoipa::path(
    get,
    path = "/api/users/{username}",
    tag = "Users",
    params(
        ("username" = String, Path, description = "Exact username")
    ),
    responses(
        (status = 200, description = "User found", body = UserWithEventsResponse),
        (status = 404, description = "User not found", body = crate::models::ErrorResponse)
    )
)]
pub async fn get_user(
    repository: web::Data<UserRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let username = path.into_inner();
    let user = repository
        .get_user(&username)
        .await?
        .ok_or_else(|| ApiError::user_not_found(&username))?;

    let user_response: UserWithEventsResponse = user.into();
    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_USER_FOUND, user_response)))
}

/// Get a user without expanding event references
#[utoipa::path(
    get,
    path = "/api/users/{username}/raw",
    tag = "Users",
    params(
        ("username" = String, Path, description = "Exact username")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found", body = crate::models::ErrorResponse)
    )
)]
pub async fn get_raw_user(
    repository: web::Data<UserRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let username = path.into_inner();
    let user = repository
        .get_raw_user(&username)
        .await?
        .ok_or_else(|| ApiError::user_not_found(&username))?;

    let user_response: UserResponse = user.into();
    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_USER_FOUND, user_response)))
}

/// Check whether a username is taken
#[utoipa::path(
    get,
    path = "/api/users/{username}/exists",
    tag = "Users",
    params(
        ("username" = String, Path, description = "Exact username")
    ),
    responses(
        (status = 200, description = "Existence flag", body = ExistsResponse)
    )
)]
pub async fn user_exists(
    repository: web::Data<UserRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let username = path.into_inner();
    let exists = repository.user_exists(&username).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        MSG_USER_EXISTS,
        ExistsResponse { username, exists },
    )))
}

/// Apply several field updates in order
///
/// Later entries for the same field win. Unknown fields reject the whole request.
#[utoipa::path(
    patch,
    path = "/api/users/{username}",
    tag = "Users",
    params(
        ("username" = String, Path, description = "Exact username")
    ),
    request_body = [FieldUpdateRequest],
    responses(
        (status = 200, description = "User updated", body = UserWithEventsResponse),
        (status = 400, description = "Unknown field or invalid value", body = crate::models::ErrorResponse),
        (status = 404, description = "User not found", body = crate::models::ErrorResponse),
        (status = 409, description = "Username already taken", body = crate::models::ErrorResponse)
    )
)]
pub async fn update_user_fields(
    repository: web::Data<UserRepository>,
    path: web::Path<String>,
    body: web::Json<Vec<FieldUpdateRequest>>,
) -> Result<HttpResponse, ApiError> {
    let username = path.into_inner();
    let updates = body
        .into_inner()
        .into_iter()
        .map(FieldUpdateRequest::into_update)
        .collect::<RepoResult<Vec<UserUpdate>>>()?;

    debug!("Applying {} update(s)", updates.len());
    let user = repository.update_fields(&username, updates).await?;

    let user_response: UserWithEventsResponse = user.into();
    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_USER_UPDATED, user_response)))
}

/// Set one field
#[utoipa::path(
    put,
    path = "/api/users/{username}/fields/{field}",
    tag = "Users",
    params(
        ("username" = String, Path, description = "Exact username"),
        ("field" = crate::models::UserField, Path, description = "Field to set")
    ),
    request_body = FieldValueRequest,
    responses(
        (status = 200, description = "User updated", body = UserWithEventsResponse),
        (status = 400, description = "Unknown field or invalid value", body = crate::models::ErrorResponse),
        (status = 404, description = "User not found", body = crate::models::ErrorResponse),
        (status = 409, description = "Username already taken", body = crate::models::ErrorResponse)
    )
)]
pub async fn update_user_field(
    repository: web::Data<UserRepository>,
    path: web::Path<(String, String)>,
    body: web::Json<FieldValueRequest>,
) -> Result<HttpResponse, ApiError> {
    let (username, field) = path.into_inner();
    let update = UserUpdate::parse(&field, body.into_inner().value)?;
    let user = repository.update_field(&username, update).await?;

    let user_response: UserWithEventsResponse = user.into();
    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_USER_UPDATED, user_response)))
}

/// Delete a user
///
/// Succeeds even when no such user exists.
#[utoipa::path(
    delete,
    path = "/api/users/{username}",
    tag = "Users",
    params(
        ("username" = String, Path, description = "Exact username")
    ),
    responses(
        (status = 200, description = "User deleted (or already absent)")
    )
)]
pub async fn delete_user(
    repository: web::Data<UserRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let username = path.into_inner();
    repository.delete_user(&username).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::message(MSG_USER_DELETED)))
}
