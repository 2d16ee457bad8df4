//! Log sanitization utilities for masking personal data.
//!
//! Usernames and emails are masked before logging so that log files do not
//! carry full identities.

const VISIBLE_CHARS: usize = 3;

fn visible_prefix(value: &str) -> &str {
    match value.char_indices().nth(VISIBLE_CHARS) {
        Some((end, _)) => &value[..end],
        None => value,
    }
}

/// Mask an email address for safe logging.
///
/// Keeps the first 3 characters of the local part and the whole domain.
///
/// # Examples
/// ```ignore
/// assert_eq!(mask_email("user@example.com"), "use***@example.com");
/// ```
pub fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) => format!(
            "{}***{}",
            visible_prefix(&email[..at_pos]),
            &email[at_pos..]
        ),
        None => mask_username(email),
    }
}

/// Mask a username for safe logging.
///
/// # Examples
/// ```ignore
/// assert_eq!(mask_username("johndoe"), "joh***");
/// ```
pub fn mask_username(username: &str) -> String {
    format!("{}***", visible_prefix(username))
}
