//! Database schema definitions and versioning.
//!
//! This module defines the table structure for the redb storage engine.
//! All table definitions are compile-time constants to ensure consistency.
//!
//! # Schema Versioning
//!
//! The schema version is stored in the metadata table. When opening an
//! existing database, we check the version and fail if it doesn't match.
//!
//! # Table Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │ METADATA_TABLE      &str -> &[u8]   "db_metadata"            │
//! │ SEQUENCES_TABLE     &str -> u64     last allocated value     │
//! ├─────────────────────────────────────────────────────────────┤
//! │ EPISODES_TABLE      u64 (EpisodeId) -> bincode Episode       │
//! │ TAGS_TABLE          u64 (TagId)     -> bincode Tag           │
//! │ USERS_TABLE         u64 (UserId)    -> bincode User          │
//! ├─────────────────────────────────────────────────────────────┤
//! │ TAG_NAMES_TABLE     multimap &str -> u64 (TagId)             │
//! │ TAG_EPISODES_TABLE  multimap u64 (TagId) -> u64 (EpisodeId)  │
//! │ EPISODES_BY_USER    multimap u64 (UserId) -> u64 (EpisodeId) │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use redb::{MultimapTableDefinition, TableDefinition};
use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Current schema version.
///
/// Increment this when making breaking changes to the schema.
/// The database will refuse to open if versions don't match.
pub const SCHEMA_VERSION: u32 = 1;

/// Maximum episode name length in bytes.
pub const MAX_NAME_LENGTH: usize = 255;

/// Maximum permalink length in bytes.
pub const MAX_PERMALINK_LENGTH: usize = 255;

/// Maximum description size in bytes (10 KB).
pub const MAX_DESCRIPTION_SIZE: usize = 10 * 1024;

/// Maximum show notes size in bytes (100 KB).
pub const MAX_NOTES_SIZE: usize = 100 * 1024;

/// Maximum length of a single tag name.
pub const MAX_TAG_LENGTH: usize = 100;

/// Maximum user name length in bytes.
pub const MAX_USER_NAME_LENGTH: usize = 255;

// ============================================================================
// Sequence names
// ============================================================================

/// Sequence for [`EpisodeId`](crate::EpisodeId) allocation.
pub const EPISODE_ID_SEQUENCE: &str = "episode_id";

/// Sequence for [`TagId`](crate::TagId) allocation.
pub const TAG_ID_SEQUENCE: &str = "tag_id";

/// Sequence for [`UserId`](crate::UserId) allocation.
pub const USER_ID_SEQUENCE: &str = "user_id";

/// Sequence for episode positions.
///
/// Kept apart from the id sequence so positions stay dense even if id
/// allocation ever changes.
pub const POSITION_SEQUENCE: &str = "position";

// ============================================================================
// Table Definitions
// ============================================================================

/// Metadata table for database-level information.
pub const METADATA_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("metadata");

/// Monotonic counters: sequence name -> last allocated value.
pub const SEQUENCES_TABLE: TableDefinition<&str, u64> = TableDefinition::new("sequences");

/// Episodes table.
///
/// Key: EpisodeId
/// Value: bincode-serialized Episode struct (without resolved tags)
pub const EPISODES_TABLE: TableDefinition<u64, &[u8]> = TableDefinition::new("episodes");

/// Tags table.
///
/// Key: TagId
/// Value: bincode-serialized Tag struct
pub const TAGS_TABLE: TableDefinition<u64, &[u8]> = TableDefinition::new("tags");

/// Users table.
///
/// Key: UserId
/// Value: bincode-serialized User struct
pub const USERS_TABLE: TableDefinition<u64, &[u8]> = TableDefinition::new("users");

/// Index: tag name -> tag ids.
///
/// A multimap because tag names are not globally unique. Values iterate in
/// ascending id order, so the first value is the oldest tag with that name.
pub const TAG_NAMES_TABLE: MultimapTableDefinition<&str, u64> =
    MultimapTableDefinition::new("tag_names");

/// Index: tag id -> episodes carrying it.
pub const TAG_EPISODES_TABLE: MultimapTableDefinition<u64, u64> =
    MultimapTableDefinition::new("tag_episodes");

/// Index: user id -> episodes owned.
pub const EPISODES_BY_USER_TABLE: MultimapTableDefinition<u64, u64> =
    MultimapTableDefinition::new("episodes_by_user");

// ============================================================================
// Database Metadata
// ============================================================================

/// Database metadata stored in the metadata table.
///
/// This is serialized with bincode and stored under the key "db_metadata".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DatabaseMetadata {
    /// Schema version for compatibility checking.
    pub schema_version: u32,

    /// Timestamp when the database was created.
    pub created_at: Timestamp,

    /// Last time the database was opened (updated on each open).
    pub last_opened_at: Timestamp,
}

impl DatabaseMetadata {
    /// Creates new metadata for a fresh database.
    pub fn new() -> Self {
        let now = Timestamp::now();
        Self {
            schema_version: SCHEMA_VERSION,
            created_at: now,
            last_opened_at: now,
        }
    }

    /// Updates the last_opened_at timestamp.
    pub fn touch(&mut self) {
        self.last_opened_at = Timestamp::now();
    }

    /// Checks if this metadata is compatible with the current schema.
    pub fn is_compatible(&self) -> bool {
        self.schema_version == SCHEMA_VERSION
    }
}

impl Default for DatabaseMetadata {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_version() {
        assert_eq!(SCHEMA_VERSION, 1);
    }

    #[test]
    fn test_database_metadata_new() {
        let meta = DatabaseMetadata::new();
        assert_eq!(meta.schema_version, SCHEMA_VERSION);
        assert_eq!(meta.created_at, meta.last_opened_at);
        assert!(meta.is_compatible());
    }

    #[test]
    fn test_database_metadata_touch() {
        let mut meta = DatabaseMetadata::new();
        let original = meta.last_opened_at;
        std::thread::sleep(std::time::Duration::from_millis(2));
        meta.touch();
        assert!(meta.last_opened_at > original);
    }

    #[test]
    fn test_incompatible_version() {
        let meta = DatabaseMetadata {
            schema_version: SCHEMA_VERSION + 1,
            ..DatabaseMetadata::new()
        };
        assert!(!meta.is_compatible());
    }

    #[test]
    fn test_database_metadata_serialization() {
        let meta = DatabaseMetadata::new();
        let bytes = bincode::serialize(&meta).unwrap();
        let restored: DatabaseMetadata = bincode::deserialize(&bytes).unwrap();
        assert_eq!(meta.schema_version, restored.schema_version);
        assert_eq!(meta.created_at, restored.created_at);
    }
}
