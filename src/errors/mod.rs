use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use log::{error, warn};
use mongodb::error::{ErrorKind, WriteFailure};
use std::fmt;
use validator::ValidationErrors;

use crate::constants::{
    CODE_BAD_REQUEST, CODE_INTERNAL_ERROR, CODE_USERNAME_EXISTS,
    CODE_USER_NOT_FOUND, CODE_VALIDATION_FAILED, ERR_INVALID_SEARCH_PATTERN,
    ERR_USERNAME_EXISTS,
};
use crate::models::ErrorResponse;

/// MongoDB duplicate key error code.
const MONGO_DUPLICATE_KEY: i32 = 11000;
/// MongoDB "Regular expression is invalid" error code.
const MONGO_INVALID_REGEX: i32 = 51091;
/// MongoDB BadValue, returned by older servers for malformed `$regex` values.
const MONGO_BAD_VALUE: i32 = 2;

pub type RepoResult<T> = Result<T, RepositoryError>;

/// Failure taxonomy of the user repository.
///
/// Absence on a read is not an error (reads return `Ok(None)`); `NotFound`
/// is only produced by operations that need the user to exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    NotFound { username: String },
    Validation { errors: Vec<String> },
    Conflict { message: String },
    Store { message: String },
}

impl RepositoryError {
    pub fn not_found(username: &str) -> Self {
        RepositoryError::NotFound {
            username: username.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        RepositoryError::Validation {
            errors: vec![message.into()],
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        RepositoryError::Store {
            message: message.into(),
        }
    }

    /// Short machine-readable name of the failure class, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RepositoryError::NotFound { .. } => "not_found",
            RepositoryError::Validation { .. } => "validation",
            RepositoryError::Conflict { .. } => "conflict",
            RepositoryError::Store { .. } => "store",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound { .. })
    }

    /// Classify a failed username search. A rejected `$regex` becomes a
    /// validation error; anything else converts as usual.
    pub fn from_search(err: mongodb::error::Error) -> Self {
        match err.kind.as_ref() {
            ErrorKind::Command(command_error) if is_invalid_pattern_code(command_error.code) => {
                warn!("Store rejected search pattern: {}", command_error.message);
                RepositoryError::validation(format!(
                    "{}: {}",
                    ERR_INVALID_SEARCH_PATTERN, command_error.message
                ))
            }
            _ => err.into(),
        }
    }
}

fn is_invalid_pattern_code(code: i32) -> bool {
    code == MONGO_INVALID_REGEX || code == MONGO_BAD_VALUE
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryError::NotFound { username } => write!(f, "User '{}' not found", username),
            RepositoryError::Validation { errors } => {
                write!(f, "Validation failed: {}", errors.join("; "))
            }
            RepositoryError::Conflict { message } => write!(f, "Conflict: {}", message),
            RepositoryError::Store { message } => write!(f, "Store failure: {}", message),
        }
    }
}

impl std::error::Error for RepositoryError {}

impl From<mongodb::error::Error> for RepositoryError {
    fn from(err: mongodb::error::Error) -> Self {
        match err.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(write_error))
                if write_error.code == MONGO_DUPLICATE_KEY =>
            {
                warn!("Duplicate key rejected by the store: {}", write_error.message);
                RepositoryError::Conflict {
                    message: ERR_USERNAME_EXISTS.to_string(),
                }
            }
            _ => {
                error!("MongoDB operation failed: {}", err);
                RepositoryError::Store {
                    message: err.to_string(),
                }
            }
        }
    }
}

impl From<mongodb::bson::ser::Error> for RepositoryError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        error!("BSON serialization failed: {}", err);
        RepositoryError::store(err.to_string())
    }
}

impl From<ValidationErrors> for RepositoryError {
    fn from(e: ValidationErrors) -> Self {
        let errors: Vec<String> = e
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("Invalid value for '{}'", field),
                })
            })
            .collect();
        RepositoryError::Validation { errors }
    }
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    NotFound { code: String, message: String },
    Conflict { code: String, message: String },
    InternalServerError { code: String, message: String },
    ValidationError { code: String, errors: Vec<String> },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            code: CODE_BAD_REQUEST.to_string(),
            message: message.into(),
        }
    }

    pub fn user_not_found(username: &str) -> Self {
        RepositoryError::not_found(username).into()
    }

    fn code(&self) -> &str {
        match self {
            ApiError::BadRequest { code, .. }
            | ApiError::NotFound { code, .. }
            | ApiError::Conflict { code, .. }
            | ApiError::InternalServerError { code, .. }
            | ApiError::ValidationError { code, .. } => code,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest { code, message } => {
                write!(f, "Bad Request [{}]: {}", code, message)
            }
            ApiError::NotFound { code, message } => {
                write!(f, "Not Found [{}]: {}", code, message)
            }
            ApiError::Conflict { code, message } => write!(f, "Conflict [{}]: {}", code, message),
            ApiError::InternalServerError { code, message } => {
                write!(f, "Internal Server Error [{}]: {}", code, message)
            }
            ApiError::ValidationError { code, errors } => {
                write!(f, "Validation Error [{}]: {:?}", code, errors)
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } | ApiError::ValidationError { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::InternalServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (message, errors) = match self {
            ApiError::BadRequest { message, .. }
            | ApiError::NotFound { message, .. }
            | ApiError::Conflict { message, .. }
            | ApiError::InternalServerError { message, .. } => (message.clone(), None),
            ApiError::ValidationError { errors, .. } => {
                ("Validation failed".to_string(), Some(errors.clone()))
            }
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            success: false,
            code: self.code().to_string(),
            message,
            errors,
        })
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { .. } => ApiError::NotFound {
                code: CODE_USER_NOT_FOUND.to_string(),
                message: err.to_string(),
            },
            RepositoryError::Validation { errors } => ApiError::ValidationError {
                code: CODE_VALIDATION_FAILED.to_string(),
                errors,
            },
            RepositoryError::Conflict { message } => ApiError::Conflict {
                code: CODE_USERNAME_EXISTS.to_string(),
                message,
            },
            // Store details stay in the server log.
            RepositoryError::Store { .. } => ApiError::InternalServerError {
                code: CODE_INTERNAL_ERROR.to_string(),
                message: "The document store could not complete the request".to_string(),
            },
        }
    }
}
