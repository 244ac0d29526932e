//! Type definitions for tags.

use serde::{Deserialize, Serialize};

use crate::types::{TagId, Timestamp};

/// A short label attached to episodes for categorization.
///
/// Tags are owned by the store and shared between episodes; an episode only
/// references them by [`TagId`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Store-assigned primary key.
    pub id: TagId,

    /// Label text, already trimmed.
    pub name: String,

    /// When this tag was created.
    pub created_at: Timestamp,
}

impl Tag {
    /// Creates a tag record with the current time.
    pub fn new(id: TagId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            created_at: Timestamp::now(),
        }
    }
}
