//! User-related request models.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::errors::RepoResult;
use crate::models::{NewUser, UserUpdate};
use crate::validators::parse_object_ids;

/// Request payload for creating a user from a full document
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[schema(example = "Ada")]
    pub firstname: String,
    #[schema(example = "Lovelace")]
    pub lastname: String,
    #[schema(example = "ada")]
    pub username: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Ids of events the user already takes part in
    #[serde(default)]
    #[schema(example = json!(["507f1f77bcf86cd799439011"]))]
    pub participating_in: Vec<String>,
}

impl CreateUserRequest {
    pub fn into_new_user(self) -> RepoResult<NewUser> {
        Ok(NewUser {
            participating_in: parse_object_ids(&self.participating_in)?,
            firstname: self.firstname,
            lastname: self.lastname,
            username: self.username,
            email: self.email,
        })
    }
}

/// Request payload for creating a user from the mandatory fields only
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterUserRequest {
    #[schema(example = "Ada")]
    pub firstname: String,
    #[schema(example = "Lovelace")]
    pub lastname: String,
    #[schema(example = "ada")]
    pub username: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
}

/// One `{field, value}` assignment
#[derive(Debug, Deserialize, ToSchema)]
pub struct FieldUpdateRequest {
    /// One of: firstname, lastname, username, email, participatingIn
    #[schema(example = "email")]
    pub field: String,
    #[schema(value_type = Object, example = "new@example.com")]
    pub value: serde_json::Value,
}

impl FieldUpdateRequest {
    pub fn into_update(self) -> RepoResult<UserUpdate> {
        UserUpdate::parse(&self.field, self.value)
    }
}

/// Request payload for setting a single field named in the path
#[derive(Debug, Deserialize, ToSchema)]
pub struct FieldValueRequest {
    #[schema(value_type = Object, example = "new@example.com")]
    pub value: serde_json::Value,
}

/// Query parameters for the username search
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserSearchQuery {
    /// Case-insensitive pattern matched against usernames
    pub q: String,
    /// Match `q` as a literal substring instead of a regular expression
    #[serde(default)]
    pub literal: bool,
}
