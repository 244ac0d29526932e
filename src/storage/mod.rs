//! Storage layer abstractions for EpisodeDB.
//!
//! This module provides a trait-based abstraction over the storage engine,
//! so the facade never talks to redb directly.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      EpisodeDB                               │
//! │         (validation, existence checks, logging)              │
//! │                         │                                    │
//! │                         ▼                                    │
//! │              ┌─────────────────────┐                        │
//! │              │   StorageEngine     │  ← Trait               │
//! │              └─────────────────────┘                        │
//! │                         ▲                                    │
//! │                         │                                    │
//! │                  ┌──────┴──────┐                             │
//! │                  │ RedbStorage │                             │
//! │                  └─────────────┘                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutating operation runs in exactly one write transaction. Ids and
//! positions are allocated inside that transaction, so they are only
//! consumed when the write commits.

pub mod redb;
pub mod schema;

pub use self::redb::RedbStorage;
pub use schema::{DatabaseMetadata, SCHEMA_VERSION};

use std::path::Path;

use crate::config::Config;
use crate::episode::{Episode, EpisodeUpdate, NewEpisode};
use crate::error::Result;
use crate::tag::Tag;
use crate::types::{EpisodeId, TagId, UserId};
use crate::user::User;

/// Storage engine trait for EpisodeDB.
///
/// This trait defines the contract that any storage backend must implement.
/// The primary implementation is [`RedbStorage`].
///
/// Input validation is the caller's job; implementations persist what they
/// are given. Episodes returned by any method have their `tags` resolved.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow the database to be shared
/// across threads. The engine handles internal synchronization.
pub trait StorageEngine: Send + Sync {
    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Returns the database metadata.
    fn metadata(&self) -> &DatabaseMetadata;

    /// Closes the storage engine, flushing any pending writes.
    ///
    /// This method consumes the storage engine.
    fn close(self: Box<Self>) -> Result<()>;

    /// Returns the path to the database file, if applicable.
    fn path(&self) -> Option<&Path>;

    // =========================================================================
    // Users
    // =========================================================================

    /// Allocates an id and stores a new user.
    fn create_user(&self, name: &str) -> Result<User>;

    /// Retrieves a user by ID. Returns `None` if absent.
    fn get_user(&self, id: UserId) -> Result<Option<User>>;

    // =========================================================================
    // Episodes
    // =========================================================================

    /// Inserts a new episode.
    ///
    /// Allocates the id and the next position from their sequences in the
    /// same write transaction as the insert. Because redb admits one writer
    /// at a time, concurrent calls are serialized and never share a position.
    fn create_episode(&self, episode: &NewEpisode) -> Result<Episode>;

    /// Retrieves an episode by ID. Returns `None` if absent.
    fn get_episode(&self, id: EpisodeId) -> Result<Option<Episode>>;

    /// Lists all episodes in position order.
    fn list_episodes(&self) -> Result<Vec<Episode>>;

    /// Lists the episodes owned by a user, in position order.
    fn list_episodes_by_user(&self, user_id: UserId) -> Result<Vec<Episode>>;

    /// Lists the episodes carrying a tag with exactly this name, in position
    /// order. Every tag record sharing the name is consulted.
    fn list_episodes_tagged(&self, tag_name: &str) -> Result<Vec<Episode>>;

    /// Counts stored episodes.
    fn count_episodes(&self) -> Result<u64>;

    /// Applies the `Some` fields of `update`.
    ///
    /// `position`, `user_id` and the tag set are never changed. Returns the
    /// updated episode, or `None` if not found.
    fn update_episode(&self, id: EpisodeId, update: &EpisodeUpdate) -> Result<Option<Episode>>;

    /// Deletes an episode and its index entries. Tags are kept.
    ///
    /// Returns `true` if the episode existed.
    fn delete_episode(&self, id: EpisodeId) -> Result<bool>;

    // =========================================================================
    // Tags
    // =========================================================================

    /// Allocates an id and stores a new tag, even if the name is taken.
    fn create_tag(&self, name: &str) -> Result<Tag>;

    /// Retrieves a tag by ID. Returns `None` if absent.
    fn get_tag(&self, id: TagId) -> Result<Option<Tag>>;

    /// Lists all tags in creation order.
    fn list_tags(&self) -> Result<Vec<Tag>>;

    /// Counts stored tags.
    fn count_tags(&self) -> Result<u64>;

    /// Replaces an episode's whole tag set with tags named `names`.
    ///
    /// Each name reuses the oldest existing tag with that name or creates a
    /// new one. `names` must already be distinct. Returns the updated
    /// episode, or `None` if not found.
    fn replace_episode_tags(&self, id: EpisodeId, names: &[String]) -> Result<Option<Episode>>;

    /// Appends a tag to an episode's tag set.
    ///
    /// Returns `false` without writing if a tag with the same name is
    /// already attached. The tag limit is checked in the same write
    /// transaction as the append.
    ///
    /// # Errors
    ///
    /// - `NotFound` if either the episode or the tag is missing
    /// - `Validation` if the episode already holds `max_tags` tags
    fn attach_tag(&self, episode_id: EpisodeId, tag_id: TagId, max_tags: usize) -> Result<bool>;

    /// Removes a tag from an episode's tag set.
    ///
    /// Returns `false` if the tag was not attached.
    ///
    /// # Errors
    ///
    /// `NotFound` if the episode is missing.
    fn detach_tag(&self, episode_id: EpisodeId, tag_id: TagId) -> Result<bool>;
}

/// Opens a storage engine at the given path.
///
/// This is a convenience function that creates a [`RedbStorage`] instance.
/// For more control, use `RedbStorage::open()` directly.
///
/// # Errors
///
/// Returns an error if:
/// - The database file is corrupted
/// - The database is locked by another process
/// - Schema version doesn't match
pub fn open_storage(path: impl AsRef<Path>, config: &Config) -> Result<Box<dyn StorageEngine>> {
    let storage = RedbStorage::open(path, config)?;
    Ok(Box::new(storage))
}
