//! Error message constants used throughout the application.

// User errors
pub const ERR_USERNAME_EXISTS: &str = "Username already taken";
pub const ERR_USER_MISSING_ID: &str = "Stored user has no _id";
pub const ERR_INSERT_NO_ID: &str = "Insert did not return an ObjectId";

// Validation errors
pub const ERR_FIRSTNAME_LENGTH: &str = "First name must be between 1 and 50 characters";
pub const ERR_LASTNAME_LENGTH: &str = "Last name must be between 1 and 50 characters";
pub const ERR_USERNAME_LENGTH: &str = "Username must be between 1 and 50 characters";
pub const ERR_INVALID_EMAIL: &str = "Invalid email format";
pub const ERR_INVALID_EVENT_ID: &str = "Event references must be 24-character hex ObjectIds";
pub const ERR_INVALID_SEARCH_PATTERN: &str = "Search pattern is not a valid regular expression";
pub const ERR_MALFORMED_BODY: &str = "Malformed JSON body";
