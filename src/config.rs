//! Configuration types for EpisodeDB.
//!
//! The [`Config`] struct controls database behavior including:
//! - Cache size and durability settings
//! - The per-episode tag limit
//!
//! # Example
//! ```rust
//! use episodedb::{Config, SyncMode};
//!
//! // Use defaults
//! let config = Config::default();
//!
//! // Customize for a bulk import
//! let config = Config {
//!     cache_size_mb: 128,
//!     sync_mode: SyncMode::Fast,
//!     ..Default::default()
//! };
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Upper bound accepted for [`Config::max_tags_per_episode`].
const MAX_TAGS_LIMIT: usize = 1000;

/// Database configuration options.
///
/// All fields have sensible defaults. Use struct update syntax to override
/// specific settings:
///
/// ```rust
/// use episodedb::Config;
///
/// let config = Config {
///     max_tags_per_episode: 10,
///     ..Default::default()
/// };
/// ```
#[derive(Clone, Debug)]
pub struct Config {
    /// Cache size in megabytes for the storage engine.
    ///
    /// Default: 64 MB
    pub cache_size_mb: usize,

    /// Durability mode for write operations.
    pub sync_mode: SyncMode,

    /// Maximum number of tags attached to one episode.
    ///
    /// Tag-list assignments and attaches beyond this limit are rejected with
    /// a validation error. Default: 50
    pub max_tags_per_episode: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_size_mb: 64,
            sync_mode: SyncMode::Normal,
            max_tags_per_episode: 50,
        }
    }
}

impl Config {
    /// Validates the configuration.
    ///
    /// Called automatically by `EpisodeDB::open()`.
    ///
    /// # Errors
    /// Returns `ValidationError` if:
    /// - `cache_size_mb` is 0
    /// - `max_tags_per_episode` is 0 or above 1000
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.cache_size_mb == 0 {
            return Err(ValidationError::invalid_field(
                "cache_size_mb",
                "must be greater than 0",
            ));
        }

        if self.max_tags_per_episode == 0 {
            return Err(ValidationError::invalid_field(
                "max_tags_per_episode",
                "must be greater than 0",
            ));
        }

        if self.max_tags_per_episode > MAX_TAGS_LIMIT {
            return Err(ValidationError::invalid_field(
                "max_tags_per_episode",
                format!("must not exceed {}", MAX_TAGS_LIMIT),
            ));
        }

        Ok(())
    }

    /// Returns the cache size in bytes, as handed to the storage engine.
    pub fn cache_size_bytes(&self) -> usize {
        self.cache_size_mb.saturating_mul(1024 * 1024)
    }
}

/// Durability mode for write operations.
///
/// Controls the trade-off between write performance and crash safety.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncMode {
    /// Sync to disk on transaction commit.
    ///
    /// This is the default and recommended setting.
    #[default]
    Normal,

    /// Async sync (faster writes, may lose recent data on crash).
    ///
    /// Committed data is persisted by a later durable commit. Use for bulk
    /// imports that can be replayed.
    Fast,

    /// Two-phase commit on every write (slowest, maximum durability).
    Paranoid,
}

impl SyncMode {
    /// Returns true if this mode uses two-phase commit.
    pub fn is_paranoid(&self) -> bool {
        matches!(self, Self::Paranoid)
    }

    /// Returns true if this mode is async (may lose data on crash).
    pub fn is_fast(&self) -> bool {
        matches!(self, Self::Fast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.cache_size_mb, 64);
        assert_eq!(config.sync_mode, SyncMode::Normal);
        assert_eq!(config.max_tags_per_episode, 50);
    }

    #[test]
    fn test_validate_success() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_cache_size_zero() {
        let config = Config {
            cache_size_mb: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ValidationError::InvalidField { field, .. } if field == "cache_size_mb")
        );
    }

    #[test]
    fn test_validate_max_tags_zero() {
        let config = Config {
            max_tags_per_episode: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_max_tags_too_large() {
        let config = Config {
            max_tags_per_episode: 5000,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cache_size_bytes() {
        let config = Config {
            cache_size_mb: 2,
            ..Default::default()
        };
        assert_eq!(config.cache_size_bytes(), 2 * 1024 * 1024);
    }

    #[test]
    fn test_sync_mode_checks() {
        assert!(!SyncMode::Normal.is_fast());
        assert!(!SyncMode::Normal.is_paranoid());
        assert!(SyncMode::Fast.is_fast());
        assert!(SyncMode::Paranoid.is_paranoid());
    }

    #[test]
    fn test_sync_mode_serialization() {
        let mode = SyncMode::Paranoid;
        let bytes = bincode::serialize(&mode).unwrap();
        let restored: SyncMode = bincode::deserialize(&bytes).unwrap();
        assert_eq!(mode, restored);
    }
}
