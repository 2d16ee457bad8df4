use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use validator::Validate;

use crate::constants::{ERR_FIRSTNAME_LENGTH, ERR_LASTNAME_LENGTH, ERR_USERNAME_LENGTH};
use crate::errors::{RepoResult, RepositoryError};
use crate::models::EventSummary;
use crate::validators::{
    parse_object_ids, validate_email_address, validate_firstname, validate_lastname, validate_name,
    validate_username,
};

/// User document stored in MongoDB
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub firstname: String,
    pub lastname: String,
    /// Unique, case-sensitive lookup key.
    pub username: String,
    pub email: String,
    /// Weak references to the events this user takes part in.
    #[serde(rename = "participatingIn", default)]
    pub participating_in: Vec<ObjectId>,
}

/// Input for user creation. Persisting it goes through `Validate`.
#[derive(Debug, Clone, Validate)]
pub struct NewUser {
    #[validate(custom(function = "validate_firstname"))]
    pub firstname: String,
    #[validate(custom(function = "validate_lastname"))]
    pub lastname: String,
    #[validate(custom(function = "validate_username"))]
    pub username: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub participating_in: Vec<ObjectId>,
}

impl NewUser {
    pub fn basic(firstname: &str, lastname: &str, username: &str, email: &str) -> Self {
        Self {
            firstname: firstname.to_string(),
            lastname: lastname.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            participating_in: Vec::new(),
        }
    }

    pub fn into_user(self) -> User {
        User {
            id: None,
            firstname: self.firstname,
            lastname: self.lastname,
            username: self.username,
            email: self.email,
            participating_in: self.participating_in,
        }
    }
}

/// The closed set of user fields that may be updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum UserField {
    #[serde(rename = "firstname")]
    Firstname,
    #[serde(rename = "lastname")]
    Lastname,
    #[serde(rename = "username")]
    Username,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "participatingIn")]
    ParticipatingIn,
}

impl UserField {
    pub const ALL: [UserField; 5] = [
        UserField::Firstname,
        UserField::Lastname,
        UserField::Username,
        UserField::Email,
        UserField::ParticipatingIn,
    ];

    /// Name of the field in the stored document.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserField::Firstname => "firstname",
            UserField::Lastname => "lastname",
            UserField::Username => "username",
            UserField::Email => "email",
            UserField::ParticipatingIn => "participatingIn",
        }
    }
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserField {
    type Err = RepositoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| {
                let allowed: Vec<&str> = UserField::ALL.iter().map(UserField::as_str).collect();
                RepositoryError::validation(format!(
                    "Unknown field '{}'; updatable fields are: {}",
                    s,
                    allowed.join(", ")
                ))
            })
    }
}

/// One typed assignment to a user field.
#[derive(Debug, Clone, PartialEq)]
pub enum UserUpdate {
    Firstname(String),
    Lastname(String),
    Username(String),
    Email(String),
    ParticipatingIn(Vec<ObjectId>),
}

impl UserUpdate {
    /// Build an update from an untyped field name and JSON value.
    pub fn parse(field: &str, value: serde_json::Value) -> RepoResult<Self> {
        let field = field.parse::<UserField>()?;
        let update = match field {
            UserField::Firstname => UserUpdate::Firstname(expect_string(field, value)?),
            UserField::Lastname => UserUpdate::Lastname(expect_string(field, value)?),
            UserField::Username => UserUpdate::Username(expect_string(field, value)?),
            UserField::Email => UserUpdate::Email(expect_string(field, value)?),
            UserField::ParticipatingIn => {
                let ids: Vec<String> = serde_json::from_value(value).map_err(|_| {
                    RepositoryError::validation(format!(
                        "Field '{}' expects an array of event ids",
                        field
                    ))
                })?;
                UserUpdate::ParticipatingIn(parse_object_ids(&ids)?)
            }
        };
        Ok(update)
    }

    pub fn field(&self) -> UserField {
        match self {
            UserUpdate::Firstname(_) => UserField::Firstname,
            UserUpdate::Lastname(_) => UserField::Lastname,
            UserUpdate::Username(_) => UserField::Username,
            UserUpdate::Email(_) => UserField::Email,
            UserUpdate::ParticipatingIn(_) => UserField::ParticipatingIn,
        }
    }

    pub fn validate(&self) -> RepoResult<()> {
        match self {
            UserUpdate::Firstname(value) => validate_name(value, ERR_FIRSTNAME_LENGTH),
            UserUpdate::Lastname(value) => validate_name(value, ERR_LASTNAME_LENGTH),
            UserUpdate::Username(value) => validate_name(value, ERR_USERNAME_LENGTH),
            UserUpdate::Email(value) => validate_email_address(value),
            UserUpdate::ParticipatingIn(_) => Ok(()),
        }
    }

    pub fn apply(self, user: &mut User) {
        match self {
            UserUpdate::Firstname(value) => user.firstname = value,
            UserUpdate::Lastname(value) => user.lastname = value,
            UserUpdate::Username(value) => user.username = value,
            UserUpdate::Email(value) => user.email = value,
            UserUpdate::ParticipatingIn(ids) => user.participating_in = ids,
        }
    }
}

fn expect_string(field: UserField, value: serde_json::Value) -> RepoResult<String> {
    match value {
        serde_json::Value::String(s) => Ok(s),
        _ => Err(RepositoryError::validation(format!(
            "Field '{}' expects a string",
            field
        ))),
    }
}

/// A user with `participatingIn` expanded into event summaries.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UserWithEvents {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub firstname: String,
    pub lastname: String,
    pub username: String,
    pub email: String,
    #[serde(rename = "participatingIn", default)]
    pub participating_in: Vec<EventSummary>,
}

impl UserWithEvents {
    pub fn new(user: User, participating_in: Vec<EventSummary>) -> Self {
        Self {
            id: user.id,
            firstname: user.firstname,
            lastname: user.lastname,
            username: user.username,
            email: user.email,
            participating_in,
        }
    }
}
