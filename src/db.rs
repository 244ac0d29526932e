//! EpisodeDB main struct and lifecycle operations.
//!
//! The [`EpisodeDB`] struct is the primary interface for interacting with
//! the database. It provides methods for:
//!
//! - Opening and closing the database
//! - Creating, updating and deleting episodes
//! - Managing the tags attached to an episode
//! - Filtering episodes by tag and by keyword
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use episodedb::{Config, EpisodeDB, NewEpisode, Permalink};
//!
//! // Open or create a database
//! let db = EpisodeDB::open("./episodes.db", Config::default())?;
//!
//! let ryan = db.create_user("ryan")?;
//! let episode = db.create_episode(NewEpisode {
//!     user_id: ryan.id,
//!     name: "Active Record Queries".into(),
//!     permalink: Permalink::from("active-record-queries"),
//!     description: "Chaining finders.".into(),
//!     notes: "rails 3.0".into(),
//!     seconds: 700,
//! })?;
//!
//! db.set_tag_list(episode.id, "activerecord, 3.0")?;
//! assert_eq!(db.tag_list(episode.id)?, "activerecord, 3.0");
//!
//! // Close when done
//! db.close()?;
//! ```
//!
//! # Thread Safety
//!
//! `EpisodeDB` is `Send + Sync` and can be shared across threads using `Arc`.
//! The underlying storage uses MVCC for concurrent reads with exclusive
//! write locking, which is also what keeps episode positions unique.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use episodedb::EpisodeDB;
//!
//! let db = Arc::new(EpisodeDB::open("./episodes.db", Config::default())?);
//!
//! // Clone Arc for use in another thread
//! let db_clone = Arc::clone(&db);
//! std::thread::spawn(move || {
//!     // Safe to use db_clone here
//! });
//! ```

use std::path::Path;

use tracing::{debug, info, instrument};

use crate::config::Config;
use crate::episode::{validate_episode_update, validate_new_episode};
use crate::episode::{Episode, EpisodeUpdate, NewEpisode};
use crate::error::{EpisodeDBError, NotFoundError, Result};
use crate::search::{by_keywords, SearchFilter};
use crate::storage::{open_storage, DatabaseMetadata, StorageEngine};
use crate::tag::{parse_tag_list, validate_tag_name, validate_tag_names, Tag};
use crate::types::{EpisodeId, TagId, UserId};
use crate::user::{validate_user_name, User};

/// The main EpisodeDB database handle.
///
/// This is the primary interface for all database operations. Create an
/// instance with [`EpisodeDB::open()`] and close it with [`EpisodeDB::close()`].
///
/// # Ownership
///
/// `EpisodeDB` owns its storage. When you call `close()`, the database is
/// consumed and cannot be used afterward. This ensures resources are
/// properly released.
pub struct EpisodeDB {
    /// Storage engine (redb).
    storage: Box<dyn StorageEngine>,

    /// Configuration used to open this database.
    config: Config,
}

impl std::fmt::Debug for EpisodeDB {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EpisodeDB")
            .field("config", &self.config)
            .field("path", &self.storage.path())
            .finish_non_exhaustive()
    }
}

impl EpisodeDB {
    /// Opens or creates an EpisodeDB database at the specified path.
    ///
    /// If the database doesn't exist, it will be created. If it exists, its
    /// stored schema version is checked.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the database file (created if it doesn't exist)
    /// * `config` - Configuration options for the database
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration is invalid (see [`Config::validate`])
    /// - Database file is corrupted
    /// - Database is locked by another process
    /// - Schema version doesn't match (needs migration)
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use episodedb::{EpisodeDB, Config, SyncMode};
    ///
    /// // Open with default configuration
    /// let db = EpisodeDB::open("./episodes.db", Config::default())?;
    ///
    /// // Open with two-phase commits
    /// let db = EpisodeDB::open("./episodes.db", Config {
    ///     sync_mode: SyncMode::Paranoid,
    ///     ..Default::default()
    /// })?;
    /// ```
    #[instrument(skip(config), fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>, config: Config) -> Result<Self> {
        // Validate configuration first
        config.validate().map_err(EpisodeDBError::from)?;

        info!("Opening EpisodeDB");

        let storage = open_storage(&path, &config)?;

        info!(
            cache_size_mb = config.cache_size_mb,
            sync_mode = ?config.sync_mode,
            "EpisodeDB opened successfully"
        );

        Ok(Self { storage, config })
    }

    /// Closes the database, flushing all pending writes.
    ///
    /// This method consumes the `EpisodeDB` instance, ensuring it cannot
    /// be used after closing.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend reports a flush failure.
    /// Note: the current redb backend flushes durably on drop, so this
    /// always returns `Ok(())` in practice.
    #[instrument(skip(self))]
    pub fn close(self) -> Result<()> {
        info!("Closing EpisodeDB");

        self.storage.close()?;

        info!("EpisodeDB closed successfully");
        Ok(())
    }

    /// Returns a reference to the database configuration.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the database metadata.
    ///
    /// Metadata includes the schema version and timestamps for when the
    /// database was created and last opened.
    #[inline]
    pub fn metadata(&self) -> &DatabaseMetadata {
        self.storage.metadata()
    }

    /// Returns a reference to the storage engine.
    #[inline]
    #[allow(dead_code)] // Used by unit tests that bypass the facade
    pub(crate) fn storage(&self) -> &dyn StorageEngine {
        self.storage.as_ref()
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Creates a user that can own episodes.
    ///
    /// # Errors
    ///
    /// - [`ValidationError`](crate::ValidationError) if the name is blank or too long
    #[instrument(skip(self))]
    pub fn create_user(&self, name: &str) -> Result<User> {
        validate_user_name(name)?;

        let user = self.storage.create_user(name)?;
        info!(id = %user.id, "User created");
        Ok(user)
    }

    /// Retrieves a user by ID.
    pub fn get_user(&self, id: UserId) -> Result<Option<User>> {
        self.storage.get_user(id)
    }

    // =========================================================================
    // Episodes
    // =========================================================================

    /// Creates an episode at the end of the global ordering.
    ///
    /// Every field is validated before anything is written; a rejected
    /// episode consumes no id and no position. The new episode has no tags;
    /// use [`set_tag_list`](Self::set_tag_list) afterwards.
    ///
    /// # Errors
    ///
    /// - [`ValidationError`](crate::ValidationError) listing every invalid field
    /// - [`NotFoundError::User`] if `user_id` does not exist
    #[instrument(skip(self, episode), fields(name = %episode.name))]
    pub fn create_episode(&self, episode: NewEpisode) -> Result<Episode> {
        validate_new_episode(&episode)?;

        let episode = self.storage.create_episode(&episode)?;
        info!(id = %episode.id, position = episode.position, "Episode created");
        Ok(episode)
    }

    /// Retrieves an episode by ID, with its tags resolved.
    pub fn get_episode(&self, id: EpisodeId) -> Result<Option<Episode>> {
        self.storage.get_episode(id)
    }

    /// Lists all episodes in position order.
    pub fn list_episodes(&self) -> Result<Vec<Episode>> {
        self.storage.list_episodes()
    }

    /// Lists the episodes owned by a user, in position order.
    pub fn list_episodes_by_user(&self, user_id: UserId) -> Result<Vec<Episode>> {
        self.storage.list_episodes_by_user(user_id)
    }

    /// Counts stored episodes.
    pub fn count_episodes(&self) -> Result<u64> {
        self.storage.count_episodes()
    }

    /// Updates the mutable fields of an episode.
    ///
    /// Only the `Some` fields of `update` change. Position, owner and tags
    /// are left alone. An empty update writes nothing.
    ///
    /// # Errors
    ///
    /// - [`ValidationError`](crate::ValidationError) if a provided field is invalid
    /// - [`NotFoundError::Episode`] if the episode does not exist
    #[instrument(skip(self, update))]
    pub fn update_episode(&self, id: EpisodeId, update: EpisodeUpdate) -> Result<Episode> {
        validate_episode_update(&update)?;

        if update.is_empty() {
            debug!(id = %id, "Empty update, nothing written");
            return self
                .storage
                .get_episode(id)?
                .ok_or_else(|| NotFoundError::episode(id).into());
        }

        let episode = self
            .storage
            .update_episode(id, &update)?
            .ok_or_else(|| NotFoundError::episode(id))?;

        info!(id = %id, "Episode updated");
        Ok(episode)
    }

    /// Deletes an episode. Its position is never handed out again.
    ///
    /// # Errors
    ///
    /// - [`NotFoundError::Episode`] if the episode does not exist
    #[instrument(skip(self))]
    pub fn delete_episode(&self, id: EpisodeId) -> Result<()> {
        if !self.storage.delete_episode(id)? {
            return Err(NotFoundError::episode(id).into());
        }

        info!(id = %id, "Episode deleted");
        Ok(())
    }

    // =========================================================================
    // Tags
    // =========================================================================

    /// Replaces an episode's tags from a comma-separated list.
    ///
    /// The list is parsed with [`parse_tag_list`]. Each distinct name reuses
    /// the oldest tag already carrying it, or creates a new tag. The
    /// previous tag set is replaced entirely; an empty list clears it.
    ///
    /// # Errors
    ///
    /// - [`ValidationError`](crate::ValidationError) if the list has too many names or a
    ///   name is too long
    /// - [`NotFoundError::Episode`] if the episode does not exist
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let episode = db.set_tag_list(id, "activerecord, activerecord, 3.0")?;
    /// assert_eq!(episode.tag_list(), "activerecord, 3.0");
    /// ```
    #[instrument(skip(self, raw))]
    pub fn set_tag_list(&self, id: EpisodeId, raw: &str) -> Result<Episode> {
        let names = parse_tag_list(raw);
        validate_tag_names(&names, self.config.max_tags_per_episode)?;

        let episode = self
            .storage
            .replace_episode_tags(id, &names)?
            .ok_or_else(|| NotFoundError::episode(id))?;

        info!(id = %id, tags = episode.tags.len(), "Tag list set");
        Ok(episode)
    }

    /// Renders an episode's tags as `"a, b"`, in attachment order.
    ///
    /// # Errors
    ///
    /// - [`NotFoundError::Episode`] if the episode does not exist
    pub fn tag_list(&self, id: EpisodeId) -> Result<String> {
        let episode = self
            .storage
            .get_episode(id)?
            .ok_or_else(|| NotFoundError::episode(id))?;
        Ok(episode.tag_list())
    }

    /// Creates a tag.
    ///
    /// Names are not unique: calling this twice with the same name yields
    /// two tags.
    ///
    /// # Errors
    ///
    /// - [`ValidationError`](crate::ValidationError) if the name is blank, too long, untrimmed or
    ///   contains a comma
    #[instrument(skip(self))]
    pub fn create_tag(&self, name: &str) -> Result<Tag> {
        validate_tag_name(name)?;

        let tag = self.storage.create_tag(name)?;
        info!(id = %tag.id, "Tag created");
        Ok(tag)
    }

    /// Retrieves a tag by ID.
    pub fn get_tag(&self, id: TagId) -> Result<Option<Tag>> {
        self.storage.get_tag(id)
    }

    /// Lists all tags in creation order.
    pub fn list_tags(&self) -> Result<Vec<Tag>> {
        self.storage.list_tags()
    }

    /// Counts stored tags.
    pub fn count_tags(&self) -> Result<u64> {
        self.storage.count_tags()
    }

    /// Attaches an existing tag to an episode.
    ///
    /// Returns `false` if a tag with the same name is already attached.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::TooManyItems`](crate::ValidationError::TooManyItems) if the
    ///   episode is at its tag limit
    /// - [`NotFoundError`] if the episode or the tag does not exist
    #[instrument(skip(self))]
    pub fn attach_tag(&self, episode_id: EpisodeId, tag_id: TagId) -> Result<bool> {
        let attached = self
            .storage
            .attach_tag(episode_id, tag_id, self.config.max_tags_per_episode)?;

        if attached {
            info!(episode_id = %episode_id, tag_id = %tag_id, "Tag attached");
        } else {
            debug!(episode_id = %episode_id, tag_id = %tag_id, "Tag name already attached");
        }
        Ok(attached)
    }

    /// Detaches a tag from an episode. Returns `false` if it was not attached.
    ///
    /// # Errors
    ///
    /// - [`NotFoundError::Episode`] if the episode does not exist
    #[instrument(skip(self))]
    pub fn detach_tag(&self, episode_id: EpisodeId, tag_id: TagId) -> Result<bool> {
        self.storage.detach_tag(episode_id, tag_id)
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Episodes carrying a tag named exactly `tag_name`, in position order.
    ///
    /// `None` or a blank name returns every episode. Answered from the tag
    /// name index rather than a scan.
    pub fn episodes_by_tag(&self, tag_name: Option<&str>) -> Result<Vec<Episode>> {
        match tag_name.map(str::trim).filter(|name| !name.is_empty()) {
            Some(name) => self.storage.list_episodes_tagged(name),
            None => self.storage.list_episodes(),
        }
    }

    /// Episodes whose name contains any whitespace-separated keyword of
    /// `query` (case-insensitive), in position order.
    pub fn episodes_by_keywords(&self, query: &str) -> Result<Vec<Episode>> {
        let episodes = self.storage.list_episodes()?;
        Ok(by_keywords(&episodes, query).cloned().collect())
    }

    /// Episodes passing every criterion of `filter`, in position order.
    pub fn search_episodes(&self, filter: &SearchFilter) -> Result<Vec<Episode>> {
        let mut episodes = match (filter.tag_name(), filter.user_id) {
            (Some(name), _) => self.storage.list_episodes_tagged(name)?,
            (None, Some(user_id)) => self.storage.list_episodes_by_user(user_id)?,
            (None, None) => self.storage.list_episodes()?,
        };
        let matches = filter.matcher();
        episodes.retain(|episode| matches(episode));

        debug!(results = episodes.len(), "Search completed");
        Ok(episodes)
    }
}

// EpisodeDB is auto Send + Sync: Box<dyn StorageEngine + Send + Sync> and
// Config are both Send + Sync.
