//! User-related response models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{EventSummaryResponse, User, UserWithEvents};

/// User with event references as ids
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = "507f1f77bcf86cd799439011")]
    pub id: String,
    #[schema(example = "Ada")]
    pub firstname: String,
    #[schema(example = "Lovelace")]
    pub lastname: String,
    #[schema(example = "ada")]
    pub username: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub participating_in: Vec<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            firstname: user.firstname,
            lastname: user.lastname,
            username: user.username,
            email: user.email,
            participating_in: user.participating_in.iter().map(|id| id.to_hex()).collect(),
        }
    }
}

/// User with `participatingIn` expanded
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserWithEventsResponse {
    #[schema(example = "507f1f77bcf86cd799439011")]
    pub id: String,
    #[schema(example = "Ada")]
    pub firstname: String,
    #[schema(example = "Lovelace")]
    pub lastname: String,
    #[schema(example = "ada")]
    pub username: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub participating_in: Vec<EventSummaryResponse>,
}

impl From<UserWithEvents> for UserWithEventsResponse {
    fn from(user: UserWithEvents) -> Self {
        Self {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            firstname: user.firstname,
            lastname: user.lastname,
            username: user.username,
            email: user.email,
            participating_in: user.participating_in.into_iter().map(Into::into).collect(),
        }
    }
}
