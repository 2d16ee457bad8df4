//! Limits applied to repository queries and input values.

/// Maximum number of users returned by a username search.
pub const MAX_SEARCH_RESULTS: i64 = 10;

/// Maximum length of a first name, last name, or username.
pub const MAX_NAME_LENGTH: u64 = 50;
