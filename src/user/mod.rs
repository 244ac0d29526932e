//! User records.
//!
//! Users are an external collaborator: the store keeps only enough of a
//! record for an episode's owning reference to be checked on create and
//! listed by owner.

use serde::{Deserialize, Serialize};

use crate::error::{EpisodeDBError, ValidationError};
use crate::storage::schema::MAX_USER_NAME_LENGTH;
use crate::types::{Timestamp, UserId};

/// An episode owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned primary key.
    pub id: UserId,

    /// Display name.
    pub name: String,

    /// When this user was registered.
    pub created_at: Timestamp,
}

impl User {
    /// Creates a user record with the current time.
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            created_at: Timestamp::now(),
        }
    }
}

/// Validates a user name: non-blank, max 255 bytes.
pub(crate) fn validate_user_name(name: &str) -> Result<(), EpisodeDBError> {
    if name.trim().is_empty() {
        return Err(ValidationError::required_field("name").into());
    }

    if name.len() > MAX_USER_NAME_LENGTH {
        return Err(ValidationError::too_long("name", name.len(), MAX_USER_NAME_LENGTH).into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_user_name() {
        assert!(validate_user_name("ryan").is_ok());
        assert!(validate_user_name("").unwrap_err().is_validation());
        assert!(validate_user_name("   ").unwrap_err().is_validation());
        assert!(validate_user_name(&"x".repeat(MAX_USER_NAME_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_user_bincode_roundtrip() {
        let user = User::new(UserId::from_u64(3), "ryan");
        let bytes = bincode::serialize(&user).unwrap();
        let restored: User = bincode::deserialize(&bytes).unwrap();
        assert_eq!(user, restored);
    }
}
