//! Common validation utilities and helpers.

use mongodb::bson::oid::ObjectId;

use crate::constants::ERR_INVALID_EVENT_ID;
use crate::errors::{RepoResult, RepositoryError};

/// Parse hex ObjectId strings, failing on the first malformed one.
pub fn parse_object_ids<S: AsRef<str>>(values: &[S]) -> RepoResult<Vec<ObjectId>> {
    values
        .iter()
        .map(|value| {
            ObjectId::parse_str(value.as_ref()).map_err(|_| {
                RepositoryError::validation(format!(
                    "{} (got '{}')",
                    ERR_INVALID_EVENT_ID,
                    value.as_ref()
                ))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_ids_valid() {
        let ids = parse_object_ids(&["507f1f77bcf86cd799439011", "507f1f77bcf86cd799439012"])
            .unwrap();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0].to_hex(), "507f1f77bcf86cd799439011");
    }

    #[test]
    fn test_parse_object_ids_rejects_garbage() {
        let err = parse_object_ids(&["507f1f77bcf86cd799439011", "nope"]).unwrap_err();
        assert!(matches!(err, RepositoryError::Validation { .. }));
        assert!(err.to_string().contains("nope"));
    }
}
