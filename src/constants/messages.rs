//! Success message constants used throughout the application.

pub const MSG_USER_CREATED: &str = "User created successfully";
pub const MSG_USER_FOUND: &str = "User found";
pub const MSG_USER_UPDATED: &str = "User updated successfully";
pub const MSG_USER_DELETED: &str = "User deleted successfully";
pub const MSG_USER_EXISTS: &str = "User existence checked";
pub const MSG_USERS_MATCHED: &str = "Matching users";
pub const MSG_PARTICIPATING_EVENTS: &str = "Events the user participates in";
pub const MSG_CREATED_EVENTS: &str = "Events created by the user";
