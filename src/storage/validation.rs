//! Key validation
//!
//! Keys become file names in the directory backend, so they are restricted
//! to a small safe alphabet.

use crate::error::StorageError;

/// Maximum key length accepted by any backend.
pub const MAX_KEY_LENGTH: usize = 64;

/// Validate that a key is safe to use as a file name (no traversal, no separators).
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let well_formed = !key.is_empty()
        && key.len() <= MAX_KEY_LENGTH
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if well_formed {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_session_keys() {
        assert!(validate_key("token").is_ok());
        assert!(validate_key("user").is_ok());
        assert!(validate_key("draft-1_a").is_ok());
    }

    #[test]
    fn test_rejects_traversal_and_separators() {
        assert!(validate_key("").is_err());
        assert!(validate_key("..").is_err());
        assert!(validate_key("../token").is_err());
        assert!(validate_key("a/b").is_err());
        assert!(validate_key("a\\b").is_err());
        assert!(validate_key(&"k".repeat(MAX_KEY_LENGTH + 1)).is_err());
    }
}
