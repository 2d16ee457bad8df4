//! User-related custom validators.

use validator::{ValidateEmail, ValidationError};

use crate::constants::{
    ERR_FIRSTNAME_LENGTH, ERR_INVALID_EMAIL, ERR_LASTNAME_LENGTH, ERR_USERNAME_LENGTH,
    MAX_NAME_LENGTH,
};
use crate::errors::{RepoResult, RepositoryError};

/// Names and usernames must be non-blank and at most `MAX_NAME_LENGTH` characters.
fn is_valid_name(value: &str) -> bool {
    !value.trim().is_empty() && value.chars().count() as u64 <= MAX_NAME_LENGTH
}

pub fn validate_name(value: &str, message: &str) -> RepoResult<()> {
    if !is_valid_name(value) {
        return Err(RepositoryError::validation(message));
    }
    Ok(())
}

fn name_field(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if is_valid_name(value) {
        return Ok(());
    }
    let mut error = ValidationError::new("invalid_name");
    error.message = Some(message.into());
    Err(error)
}

pub fn validate_firstname(value: &str) -> Result<(), ValidationError> {
    name_field(value, ERR_FIRSTNAME_LENGTH)
}

pub fn validate_lastname(value: &str) -> Result<(), ValidationError> {
    name_field(value, ERR_LASTNAME_LENGTH)
}

pub fn validate_username(value: &str) -> Result<(), ValidationError> {
    name_field(value, ERR_USERNAME_LENGTH)
}

pub fn validate_email_address(value: &str) -> RepoResult<()> {
    if !value.validate_email() {
        return Err(RepositoryError::validation(ERR_INVALID_EMAIL));
    }
    Ok(())
}
