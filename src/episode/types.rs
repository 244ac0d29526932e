//! Type definitions for episodes.
//!
//! An **episode** is the primary catalogue record: a named piece of content
//! with a permalink, description, show notes, a running time in seconds, and
//! a creation-order position.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tag::{format_tag_list, Tag};
use crate::types::{EpisodeId, TagId, Timestamp, UserId};

// ============================================================================
// Permalink
// ============================================================================

/// External, user-facing identifier of an episode.
///
/// Permalinks may be textual slugs or plain numbers; both are kept in their
/// string form so that [`Episode::to_param`] is a straight copy.
///
/// ```rust
/// use episodedb::Permalink;
///
/// assert_eq!(Permalink::from(13466u64).as_str(), "13466");
/// assert_eq!(Permalink::from("rails-3-routing").as_str(), "rails-3-routing");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permalink(String);

impl Permalink {
    /// Returns the permalink text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the permalink is empty or whitespace only.
    #[inline]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<u64> for Permalink {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for Permalink {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Permalink {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Permalink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Episode: The full stored record
// ============================================================================

/// A stored episode.
///
/// # Serialization Note
///
/// The `tags` field is marked `#[serde(skip)]`. Only `tag_ids` is persisted
/// with the episode; the storage layer resolves the ids against the tags
/// table on every read.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Episode {
    /// Store-assigned primary key.
    pub id: EpisodeId,

    /// The owning user.
    pub user_id: UserId,

    /// Display name. Searched by keyword scopes.
    pub name: String,

    /// External identifier, see [`Episode::to_param`].
    pub permalink: Permalink,

    /// Short description.
    pub description: String,

    /// Show notes.
    pub notes: String,

    /// Running time in seconds.
    pub seconds: u32,

    /// 1-based creation-order position. Assigned once on insert.
    pub position: u64,

    /// Attached tag ids in association order.
    pub tag_ids: Vec<TagId>,

    /// Attached tags, resolved from `tag_ids` by the storage layer.
    #[serde(skip)]
    pub tags: Vec<Tag>,

    /// When this episode was created.
    pub created_at: Timestamp,

    /// When this episode was last modified.
    pub updated_at: Timestamp,
}

impl Episode {
    /// Whole minutes of running time (truncating).
    ///
    /// ```rust,ignore
    /// // seconds = 600
    /// assert_eq!(episode.minutes(), 10);
    /// ```
    #[inline]
    pub fn minutes(&self) -> u32 {
        self.seconds / 60
    }

    /// Running time formatted as `M:SS`.
    ///
    /// Minutes carry no leading zero; seconds are always two digits.
    /// 35 seconds renders as `"0:35"`, 700 seconds as `"11:40"`.
    pub fn duration(&self) -> String {
        format_duration(self.seconds)
    }

    /// The permalink in string form, used in URLs instead of the id.
    pub fn to_param(&self) -> String {
        self.permalink.to_string()
    }

    /// Names of the attached tags in association order.
    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|t| t.name.as_str())
    }

    /// Returns true if a tag with exactly this name is attached.
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }

    /// The attached tags rendered as `"a, b"`.
    pub fn tag_list(&self) -> String {
        format_tag_list(&self.tags)
    }
}

/// Formats a second count as `M:SS`.
pub fn format_duration(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

// ============================================================================
// NewEpisode: Input for create_episode()
// ============================================================================

/// Input for creating a new episode via
/// [`EpisodeDB::create_episode()`](crate::EpisodeDB::create_episode).
///
/// The `id`, `position`, and timestamps are assigned by the store.
#[derive(Clone, Debug, Default)]
pub struct NewEpisode {
    /// The owning user. Must exist.
    pub user_id: UserId,

    /// Display name (required).
    pub name: String,

    /// External identifier (required).
    pub permalink: Permalink,

    /// Short description (required).
    pub description: String,

    /// Show notes (required).
    pub notes: String,

    /// Running time in seconds.
    pub seconds: u32,
}

// ============================================================================
// EpisodeUpdate: Partial update for mutable fields
// ============================================================================

/// Partial update for an episode's mutable fields.
///
/// Only fields set to `Some(...)` will be updated. `position`, `user_id`,
/// and the tag set cannot be changed through an update.
#[derive(Clone, Debug, Default)]
pub struct EpisodeUpdate {
    /// New display name.
    pub name: Option<String>,

    /// New permalink.
    pub permalink: Option<Permalink>,

    /// New description.
    pub description: Option<String>,

    /// New show notes.
    pub notes: Option<String>,

    /// New running time.
    pub seconds: Option<u32>,
}

impl EpisodeUpdate {
    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.permalink.is_none()
            && self.description.is_none()
            && self.notes.is_none()
            && self.seconds.is_none()
    }

    /// Applies the set fields to `episode`.
    pub(crate) fn apply_to(&self, episode: &mut Episode) {
        if let Some(ref name) = self.name {
            episode.name = name.clone();
        }
        if let Some(ref permalink) = self.permalink {
            episode.permalink = permalink.clone();
        }
        if let Some(ref description) = self.description {
            episode.description = description.clone();
        }
        if let Some(ref notes) = self.notes {
            episode.notes = notes.clone();
        }
        if let Some(seconds) = self.seconds {
            episode.seconds = seconds;
        }
    }
}
