//! Error types for EpisodeDB.
//!
//! EpisodeDB uses a hierarchical error system:
//! - `EpisodeDBError` is the top-level error returned by all public APIs
//! - Specific error types (`StorageError`, `ValidationError`, `NotFoundError`)
//!   provide detail
//!
//! # Error Handling Pattern
//! ```rust,ignore
//! use episodedb::{EpisodeDB, Config, Result};
//!
//! fn example() -> Result<()> {
//!     let db = EpisodeDB::open("./episodes.db", Config::default())?;
//!     // ... operations that may fail ...
//!     db.close()?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Result type alias for EpisodeDB operations.
pub type Result<T> = std::result::Result<T, EpisodeDBError>;

/// Top-level error enum for all EpisodeDB operations.
///
/// This is the only error type returned by public APIs.
/// Use pattern matching to handle specific error cases.
#[derive(Debug, Error)]
pub enum EpisodeDBError {
    /// Storage layer error (I/O, corruption, transactions).
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Input validation error. The write was rejected before reaching storage.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Requested entity not found.
    #[error("{0}")]
    NotFound(#[from] NotFoundError),
}

impl EpisodeDBError {
    /// Returns true if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns true if this is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is a storage error.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

/// Storage-related errors.
///
/// These errors indicate problems with the underlying storage layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database file or data is corrupted.
    #[error("Database corrupted: {0}")]
    Corrupted(String),

    /// Database is locked by another process.
    #[error("Database is locked by another writer")]
    DatabaseLocked,

    /// Transaction failed (commit, rollback, etc.).
    #[error("Transaction failed: {0}")]
    Transaction(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Error from the redb storage engine.
    #[error("Storage engine error: {0}")]
    Redb(String),

    /// Database schema version doesn't match expected version.
    #[error("Schema version mismatch: expected {expected}, found {found}")]
    SchemaVersionMismatch {
        /// Expected schema version.
        expected: u32,
        /// Actual schema version found in database.
        found: u32,
    },
}

impl StorageError {
    /// Creates a corruption error with the given message.
    pub fn corrupted(msg: impl Into<String>) -> Self {
        Self::Corrupted(msg.into())
    }

    /// Creates a serialization error with the given message.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Creates a redb error with the given message.
    pub fn redb(msg: impl Into<String>) -> Self {
        Self::Redb(msg.into())
    }
}

// Conversions from redb error types
impl From<redb::Error> for StorageError {
    fn from(err: redb::Error) -> Self {
        StorageError::Redb(err.to_string())
    }
}

impl From<redb::DatabaseError> for StorageError {
    fn from(err: redb::DatabaseError) -> Self {
        StorageError::Redb(err.to_string())
    }
}

impl From<redb::TransactionError> for StorageError {
    fn from(err: redb::TransactionError) -> Self {
        StorageError::Transaction(err.to_string())
    }
}

impl From<redb::CommitError> for StorageError {
    fn from(err: redb::CommitError) -> Self {
        StorageError::Transaction(format!("Commit failed: {}", err))
    }
}

impl From<redb::TableError> for StorageError {
    fn from(err: redb::TableError) -> Self {
        StorageError::Redb(format!("Table error: {}", err))
    }
}

impl From<redb::StorageError> for StorageError {
    fn from(err: redb::StorageError) -> Self {
        StorageError::Redb(format!("Storage error: {}", err))
    }
}

impl From<bincode::Error> for StorageError {
    fn from(err: bincode::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

// Also allow direct conversion to EpisodeDBError for convenience
impl From<redb::Error> for EpisodeDBError {
    fn from(err: redb::Error) -> Self {
        EpisodeDBError::Storage(StorageError::from(err))
    }
}

impl From<redb::DatabaseError> for EpisodeDBError {
    fn from(err: redb::DatabaseError) -> Self {
        EpisodeDBError::Storage(StorageError::from(err))
    }
}

impl From<redb::TransactionError> for EpisodeDBError {
    fn from(err: redb::TransactionError) -> Self {
        EpisodeDBError::Storage(StorageError::from(err))
    }
}

impl From<redb::CommitError> for EpisodeDBError {
    fn from(err: redb::CommitError) -> Self {
        EpisodeDBError::Storage(StorageError::from(err))
    }
}

impl From<redb::TableError> for EpisodeDBError {
    fn from(err: redb::TableError) -> Self {
        EpisodeDBError::Storage(StorageError::from(err))
    }
}

impl From<redb::StorageError> for EpisodeDBError {
    fn from(err: redb::StorageError) -> Self {
        EpisodeDBError::Storage(StorageError::from(err))
    }
}

impl From<bincode::Error> for EpisodeDBError {
    fn from(err: bincode::Error) -> Self {
        EpisodeDBError::Storage(StorageError::from(err))
    }
}

/// Validation errors for input data.
///
/// These errors indicate problems with data provided by the caller. A write
/// that fails validation never reaches storage, so it consumes no id and no
/// position.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("Required field missing: {field}")]
    RequiredField {
        /// Name of the missing field.
        field: String,
    },

    /// A field has an invalid value.
    #[error("Invalid field '{field}': {reason}")]
    InvalidField {
        /// Name of the invalid field.
        field: String,
        /// Why the value is invalid.
        reason: String,
    },

    /// A text field exceeds its maximum length.
    #[error("Field '{field}' too long: {len} bytes (max: {max} bytes)")]
    TooLong {
        /// Name of the field.
        field: String,
        /// Actual length in bytes.
        len: usize,
        /// Maximum allowed length in bytes.
        max: usize,
    },

    /// Too many items in a collection field.
    #[error("Too many items in '{field}': {count} (max: {max})")]
    TooManyItems {
        /// Name of the field.
        field: String,
        /// Actual count.
        count: usize,
        /// Maximum allowed.
        max: usize,
    },

    /// Several fields failed validation in the same write.
    #[error("{}", join_messages(.0))]
    Multiple(Vec<ValidationError>),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Creates a required field error.
    pub fn required_field(field: impl Into<String>) -> Self {
        Self::RequiredField {
            field: field.into(),
        }
    }

    /// Creates an invalid field error.
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a field too long error.
    pub fn too_long(field: impl Into<String>, len: usize, max: usize) -> Self {
        Self::TooLong {
            field: field.into(),
            len,
            max,
        }
    }

    /// Creates a too many items error.
    pub fn too_many_items(field: impl Into<String>, count: usize, max: usize) -> Self {
        Self::TooManyItems {
            field: field.into(),
            count,
            max,
        }
    }

    /// Collapses a list of field errors into one error.
    ///
    /// Returns `None` for an empty list and the single error unwrapped when
    /// there is exactly one.
    pub fn from_errors(mut errors: Vec<ValidationError>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(Self::Multiple(errors)),
        }
    }

    /// Names of every field reported by this error.
    pub fn fields(&self) -> Vec<&str> {
        match self {
            Self::RequiredField { field }
            | Self::InvalidField { field, .. }
            | Self::TooLong { field, .. }
            | Self::TooManyItems { field, .. } => vec![field.as_str()],
            Self::Multiple(errors) => errors.iter().flat_map(|e| e.fields()).collect(),
        }
    }
}

/// Not found errors for specific entity types.
#[derive(Debug, Error)]
pub enum NotFoundError {
    /// Episode with given ID not found.
    #[error("Episode not found: {0}")]
    Episode(String),

    /// Tag with given ID not found.
    #[error("Tag not found: {0}")]
    Tag(String),

    /// User with given ID not found.
    #[error("User not found: {0}")]
    User(String),
}

impl NotFoundError {
    /// Creates an episode not found error.
    pub fn episode(id: impl ToString) -> Self {
        Self::Episode(id.to_string())
    }

    /// Creates a tag not found error.
    pub fn tag(id: impl ToString) -> Self {
        Self::Tag(id.to_string())
    }

    /// Creates a user not found error.
    pub fn user(id: impl ToString) -> Self {
        Self::User(id.to_string())
    }
}
