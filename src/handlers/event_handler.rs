//! Handlers listing the events related to a user.

use actix_web::{web, HttpResponse};
use log::debug;

use crate::constants::{MSG_CREATED_EVENTS, MSG_PARTICIPATING_EVENTS};
use crate::errors::ApiError;
use crate::models::{ApiResponse, EventResponse, EventSummaryResponse};
use crate::repositories::UserRepository;

/// List the events a user participates in
#[utoipa::path(
    get,
    path = "/api/users/{username}/events/participating",
    tag = "Events",
    params(
        ("username" = String, Path, description = "Exact username")
    ),
    responses(
        (status = 200, description = "Joined events, participants omitted", body = [EventSummaryResponse]),
        (status = 404, description = "User not found", body = crate::models::ErrorResponse)
    )
)]
pub async fn get_participating_events(
    repository: web::Data<UserRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let username = path.into_inner();
    debug!("Fetching participating events");

    let events: Vec<EventSummaryResponse> = repository
        .get_participating_events(&username)
        .await?
        .ok_or_else(|| ApiError::user_not_found(&username))?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_PARTICIPATING_EVENTS, events)))
}

/// List the events a user created
#[utoipa::path(
    get,
    path = "/api/users/{username}/events/created",
    tag = "Events",
    params(
        ("username" = String, Path, description = "Exact username")
    ),
    responses(
        (status = 200, description = "Events created by the user (possibly empty)", body = [EventResponse]),
        (status = 404, description = "User not found", body = crate::models::ErrorResponse)
    )
)]
pub async fn get_created_events(
    repository: web::Data<UserRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let username = path.into_inner();
    debug!("Fetching created events");

    let events: Vec<EventResponse> = repository
        .get_created_events(&username)
        .await?
        .ok_or_else(|| ApiError::user_not_found(&username))?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_CREATED_EVENTS, events)))
}
