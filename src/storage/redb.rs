//! redb storage engine implementation.
//!
//! This module provides the primary storage backend for EpisodeDB using
//! [redb](https://docs.rs/redb), a pure Rust embedded key-value store.
//!
//! # Features
//!
//! - ACID transactions with MVCC
//! - Single-writer, multiple-reader concurrency
//! - Automatic crash recovery
//!
//! # Sequences
//!
//! Ids and positions come from counters in `SEQUENCES_TABLE`. A counter is
//! read and advanced inside the caller's write transaction; if that
//! transaction is dropped without commit the advance is rolled back with
//! everything else, so failed writes consume nothing.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use ::redb::{
    Database, Durability, MultimapValue, ReadableMultimapTable, ReadableTable,
    ReadableTableMetadata, WriteTransaction,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::schema::{
    DatabaseMetadata, EPISODES_BY_USER_TABLE, EPISODES_TABLE, EPISODE_ID_SEQUENCE, METADATA_TABLE,
    POSITION_SEQUENCE, SCHEMA_VERSION, SEQUENCES_TABLE, TAGS_TABLE, TAG_EPISODES_TABLE,
    TAG_ID_SEQUENCE, TAG_NAMES_TABLE, USERS_TABLE, USER_ID_SEQUENCE,
};
use super::StorageEngine;
use crate::config::{Config, SyncMode};
use crate::episode::{Episode, EpisodeUpdate, NewEpisode};
use crate::error::{EpisodeDBError, NotFoundError, Result, StorageError, ValidationError};
use crate::tag::Tag;
use crate::types::{EpisodeId, TagId, Timestamp, UserId};
use crate::user::User;

/// Metadata key in the metadata table.
const METADATA_KEY: &str = "db_metadata";

/// redb storage engine wrapper.
///
/// This struct holds the redb database handle and cached metadata.
/// It implements [`StorageEngine`] for use with EpisodeDB.
///
/// # Thread Safety
///
/// `RedbStorage` is `Send + Sync`. redb handles internal synchronization
/// using MVCC for readers and exclusive locking for writers.
#[derive(Debug)]
pub struct RedbStorage {
    /// The redb database handle.
    db: Database,

    /// Cached database metadata.
    metadata: DatabaseMetadata,

    /// Path to the database file.
    path: PathBuf,

    /// Durability applied to every write transaction.
    sync_mode: SyncMode,
}

impl RedbStorage {
    /// Opens or creates a database at the given path.
    ///
    /// If the database doesn't exist, it will be created and initialized.
    /// If it exists, the stored metadata is validated.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The database file is corrupted
    /// - The database is locked by another process
    /// - Schema version doesn't match
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use episodedb::{Config, storage::RedbStorage};
    ///
    /// let storage = RedbStorage::open("./episodes.db", &Config::default())?;
    /// ```
    #[instrument(skip(config), fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>, config: &Config) -> Result<Self> {
        let path = path.as_ref();
        let db_exists = path.exists();

        debug!(db_exists = db_exists, "Opening storage engine");

        let db = Self::create_database(path, config)?;

        let (db, metadata) = if db_exists {
            Self::open_existing(db)?
        } else {
            Self::initialize_new(db)?
        };

        Ok(Self {
            db,
            metadata,
            path: path.to_path_buf(),
            sync_mode: config.sync_mode,
        })
    }

    /// Creates the redb database with appropriate settings.
    fn create_database(path: &Path, config: &Config) -> Result<Database> {
        let mut builder = Database::builder();
        builder.set_cache_size(config.cache_size_bytes());

        // redb doesn't expose a typed error variant for lock conflicts,
        // so we detect them via the error message.
        let db = builder.create(path).map_err(|e| {
            if e.to_string().contains("locked") {
                StorageError::DatabaseLocked
            } else {
                StorageError::Redb(e.to_string())
            }
        })?;

        debug!("Database file opened successfully");
        Ok(db)
    }

    /// Initializes a new database with tables and metadata.
    fn initialize_new(db: Database) -> Result<(Database, DatabaseMetadata)> {
        info!("Initializing new database");

        let metadata = DatabaseMetadata::new();

        // Create all tables and write metadata in a single transaction
        let write_txn = db.begin_write().map_err(StorageError::from)?;
        {
            let mut meta_table = write_txn.open_table(METADATA_TABLE)?;
            let metadata_bytes = encode(&metadata)?;
            meta_table.insert(METADATA_KEY, metadata_bytes.as_slice())?;

            let _ = write_txn.open_table(SEQUENCES_TABLE)?;
            let _ = write_txn.open_table(EPISODES_TABLE)?;
            let _ = write_txn.open_table(TAGS_TABLE)?;
            let _ = write_txn.open_table(USERS_TABLE)?;
            let _ = write_txn.open_multimap_table(TAG_NAMES_TABLE)?;
            let _ = write_txn.open_multimap_table(TAG_EPISODES_TABLE)?;
            let _ = write_txn.open_multimap_table(EPISODES_BY_USER_TABLE)?;
        }
        write_txn.commit().map_err(StorageError::from)?;

        info!(schema_version = SCHEMA_VERSION, "Database initialized");

        Ok((db, metadata))
    }

    /// Opens and validates an existing database.
    fn open_existing(db: Database) -> Result<(Database, DatabaseMetadata)> {
        info!("Opening existing database");

        let read_txn = db.begin_read().map_err(StorageError::from)?;

        let metadata = {
            let meta_table = read_txn.open_table(METADATA_TABLE).map_err(|e| {
                StorageError::corrupted(format!("Cannot open metadata table: {}", e))
            })?;

            let metadata_bytes = meta_table
                .get(METADATA_KEY)
                .map_err(StorageError::from)?
                .ok_or_else(|| StorageError::corrupted("Missing database metadata"))?;

            bincode::deserialize::<DatabaseMetadata>(metadata_bytes.value())
                .map_err(|e| StorageError::corrupted(format!("Invalid metadata format: {}", e)))?
        };

        drop(read_txn);

        if !metadata.is_compatible() {
            warn!(
                expected = SCHEMA_VERSION,
                found = metadata.schema_version,
                "Schema version mismatch"
            );
            return Err(EpisodeDBError::Storage(
                StorageError::SchemaVersionMismatch {
                    expected: SCHEMA_VERSION,
                    found: metadata.schema_version,
                },
            ));
        }

        // Update last_opened_at timestamp
        let mut metadata = metadata;
        metadata.touch();

        let write_txn = db.begin_write().map_err(StorageError::from)?;
        {
            let mut meta_table = write_txn.open_table(METADATA_TABLE)?;
            let metadata_bytes = encode(&metadata)?;
            meta_table.insert(METADATA_KEY, metadata_bytes.as_slice())?;
        }
        write_txn.commit().map_err(StorageError::from)?;

        info!(
            schema_version = metadata.schema_version,
            "Database opened successfully"
        );

        Ok((db, metadata))
    }

    /// Returns a reference to the underlying redb database.
    #[inline]
    #[allow(dead_code)] // Used by tests that write raw transactions
    pub(crate) fn database(&self) -> &Database {
        &self.db
    }

    /// Begins a write transaction with the configured durability.
    fn begin_write(&self) -> Result<WriteTransaction> {
        let mut write_txn = self.db.begin_write().map_err(StorageError::from)?;
        if self.sync_mode.is_fast() {
            write_txn.set_durability(Durability::Eventual);
        } else {
            write_txn.set_durability(Durability::Immediate);
        }
        if self.sync_mode.is_paranoid() {
            write_txn.set_two_phase_commit(true);
        }
        Ok(write_txn)
    }

    /// Loads the given episode ids (hydrated) in one read transaction,
    /// sorted by position.
    fn load_episodes(&self, ids: impl IntoIterator<Item = u64>) -> Result<Vec<Episode>> {
        let read_txn = self.db.begin_read().map_err(StorageError::from)?;
        let episodes_table = read_txn.open_table(EPISODES_TABLE)?;
        let tags_table = read_txn.open_table(TAGS_TABLE)?;

        let mut episodes = Vec::new();
        for id in ids {
            if let Some(episode) = load_episode(&episodes_table, &tags_table, id)? {
                episodes.push(episode);
            }
        }
        episodes.sort_by_key(|e| e.position);
        Ok(episodes)
    }
}

// ============================================================================
// Transaction helpers
// ============================================================================

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    bincode::serialize(value).map_err(|e| StorageError::serialization(e.to_string()).into())
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    bincode::deserialize(bytes).map_err(|e| StorageError::serialization(e.to_string()).into())
}

/// Advances the named sequence and returns the new value (first is 1).
fn next_sequence(txn: &WriteTransaction, name: &str) -> Result<u64> {
    let mut table = txn.open_table(SEQUENCES_TABLE)?;
    let next = table.get(name)?.map(|v| v.value()).unwrap_or(0) + 1;
    table.insert(name, next)?;
    Ok(next)
}

fn collect_ids(values: MultimapValue<'_, u64>) -> Result<Vec<u64>> {
    let mut ids = Vec::new();
    for value in values {
        ids.push(value.map_err(StorageError::from)?.value());
    }
    Ok(ids)
}

/// Reads an episode record without resolving its tags.
fn read_episode<T>(table: &T, id: u64) -> Result<Option<Episode>>
where
    T: ReadableTable<u64, &'static [u8]>,
{
    let episode = match table.get(id)? {
        Some(value) => Some(decode::<Episode>(value.value())?),
        None => None,
    };
    Ok(episode)
}

fn read_tag<T>(table: &T, id: u64) -> Result<Option<Tag>>
where
    T: ReadableTable<u64, &'static [u8]>,
{
    let tag = match table.get(id)? {
        Some(value) => Some(decode::<Tag>(value.value())?),
        None => None,
    };
    Ok(tag)
}

/// Resolves tag ids against the tags table, keeping their order.
///
/// Tags are never deleted, so a dangling id means the file is corrupted.
fn resolve_tags<T>(table: &T, ids: &[TagId]) -> Result<Vec<Tag>>
where
    T: ReadableTable<u64, &'static [u8]>,
{
    let mut tags = Vec::with_capacity(ids.len());
    for id in ids {
        let tag = read_tag(table, id.as_u64())?
            .ok_or_else(|| StorageError::corrupted(format!("Dangling tag reference: {}", id)))?;
        tags.push(tag);
    }
    Ok(tags)
}

/// Reads an episode record and resolves its tags.
fn load_episode<E, T>(episodes: &E, tags: &T, id: u64) -> Result<Option<Episode>>
where
    E: ReadableTable<u64, &'static [u8]>,
    T: ReadableTable<u64, &'static [u8]>,
{
    match read_episode(episodes, id)? {
        Some(mut episode) => {
            episode.tags = resolve_tags(tags, &episode.tag_ids)?;
            Ok(Some(episode))
        }
        None => Ok(None),
    }
}

/// Returns the oldest tag carrying `name`, if any.
fn find_tag_id(txn: &WriteTransaction, name: &str) -> Result<Option<TagId>> {
    let names = txn.open_multimap_table(TAG_NAMES_TABLE)?;
    let first = names
        .get(name)?
        .next()
        .transpose()
        .map_err(StorageError::from)?
        .map(|guard| TagId::from_u64(guard.value()));
    Ok(first)
}

/// Allocates an id and writes a tag plus its name index entry.
fn insert_tag(txn: &WriteTransaction, name: &str) -> Result<Tag> {
    let id = next_sequence(txn, TAG_ID_SEQUENCE)?;
    let tag = Tag::new(TagId::from_u64(id), name);
    let bytes = encode(&tag)?;

    let mut tags = txn.open_table(TAGS_TABLE)?;
    tags.insert(id, bytes.as_slice())?;

    let mut names = txn.open_multimap_table(TAG_NAMES_TABLE)?;
    names.insert(name, id)?;

    Ok(tag)
}

impl StorageEngine for RedbStorage {
    // =========================================================================
    // Lifecycle
    // =========================================================================

    fn metadata(&self) -> &DatabaseMetadata {
        &self.metadata
    }

    #[instrument(skip(self))]
    fn close(self: Box<Self>) -> Result<()> {
        info!("Closing storage engine");

        // redb flushes durably on drop; Database::drop is infallible.
        drop(self.db);

        info!("Storage engine closed");
        Ok(())
    }

    fn path(&self) -> Option<&Path> {
        Some(&self.path)
    }

    // =========================================================================
    // Users
    // =========================================================================

    fn create_user(&self, name: &str) -> Result<User> {
        let write_txn = self.begin_write()?;
        let user = {
            let id = next_sequence(&write_txn, USER_ID_SEQUENCE)?;
            let user = User::new(UserId::from_u64(id), name);
            let bytes = encode(&user)?;
            let mut table = write_txn.open_table(USERS_TABLE)?;
            table.insert(id, bytes.as_slice())?;
            user
        };
        write_txn.commit().map_err(StorageError::from)?;

        debug!(id = %user.id, name = %user.name, "User created");
        Ok(user)
    }

    fn get_user(&self, id: UserId) -> Result<Option<User>> {
        let read_txn = self.db.begin_read().map_err(StorageError::from)?;
        let table = read_txn.open_table(USERS_TABLE)?;

        let user = match table.get(id.as_u64())? {
            Some(value) => Some(decode(value.value())?),
            None => None,
        };
        Ok(user)
    }

    // =========================================================================
    // Episodes
    // =========================================================================

    fn create_episode(&self, new: &NewEpisode) -> Result<Episode> {
        let write_txn = self.begin_write()?;
        let episode = {
            {
                let users = write_txn.open_table(USERS_TABLE)?;
                if users.get(new.user_id.as_u64())?.is_none() {
                    // Dropping the uncommitted txn aborts it
                    return Err(NotFoundError::user(new.user_id).into());
                }
            }

            let id = next_sequence(&write_txn, EPISODE_ID_SEQUENCE)?;
            let position = next_sequence(&write_txn, POSITION_SEQUENCE)?;
            let now = Timestamp::now();

            let episode = Episode {
                id: EpisodeId::from_u64(id),
                user_id: new.user_id,
                name: new.name.clone(),
                permalink: new.permalink.clone(),
                description: new.description.clone(),
                notes: new.notes.clone(),
                seconds: new.seconds,
                position,
                tag_ids: Vec::new(),
                tags: Vec::new(),
                created_at: now,
                updated_at: now,
            };
            let bytes = encode(&episode)?;

            let mut table = write_txn.open_table(EPISODES_TABLE)?;
            table.insert(id, bytes.as_slice())?;

            let mut by_user = write_txn.open_multimap_table(EPISODES_BY_USER_TABLE)?;
            by_user.insert(new.user_id.as_u64(), id)?;

            episode
        };
        write_txn.commit().map_err(StorageError::from)?;

        debug!(
            id = %episode.id,
            position = episode.position,
            permalink = %episode.permalink,
            "Episode created"
        );
        Ok(episode)
    }

    fn get_episode(&self, id: EpisodeId) -> Result<Option<Episode>> {
        let read_txn = self.db.begin_read().map_err(StorageError::from)?;
        let episodes = read_txn.open_table(EPISODES_TABLE)?;
        let tags = read_txn.open_table(TAGS_TABLE)?;

        load_episode(&episodes, &tags, id.as_u64())
    }

    fn list_episodes(&self) -> Result<Vec<Episode>> {
        let read_txn = self.db.begin_read().map_err(StorageError::from)?;
        let table = read_txn.open_table(EPISODES_TABLE)?;
        let tags = read_txn.open_table(TAGS_TABLE)?;

        let mut episodes = Vec::new();
        for result in table.iter()? {
            let (_, value) = result.map_err(StorageError::from)?;
            let mut episode: Episode = decode(value.value())?;
            episode.tags = resolve_tags(&tags, &episode.tag_ids)?;
            episodes.push(episode);
        }
        episodes.sort_by_key(|e| e.position);

        Ok(episodes)
    }

    fn list_episodes_by_user(&self, user_id: UserId) -> Result<Vec<Episode>> {
        let ids = {
            let read_txn = self.db.begin_read().map_err(StorageError::from)?;
            let by_user = read_txn.open_multimap_table(EPISODES_BY_USER_TABLE)?;
            let ids = collect_ids(by_user.get(user_id.as_u64())?)?;
            ids
        };
        self.load_episodes(ids)
    }

    fn list_episodes_tagged(&self, tag_name: &str) -> Result<Vec<Episode>> {
        let ids = {
            let read_txn = self.db.begin_read().map_err(StorageError::from)?;
            let names = read_txn.open_multimap_table(TAG_NAMES_TABLE)?;
            let tag_episodes = read_txn.open_multimap_table(TAG_EPISODES_TABLE)?;

            let mut ids = BTreeSet::new();
            for tag_id in collect_ids(names.get(tag_name)?)? {
                ids.extend(collect_ids(tag_episodes.get(tag_id)?)?);
            }
            ids
        };
        self.load_episodes(ids)
    }

    fn count_episodes(&self) -> Result<u64> {
        let read_txn = self.db.begin_read().map_err(StorageError::from)?;
        let table = read_txn.open_table(EPISODES_TABLE)?;
        let count = table.len()?;
        Ok(count)
    }

    fn update_episode(&self, id: EpisodeId, update: &EpisodeUpdate) -> Result<Option<Episode>> {
        let write_txn = self.begin_write()?;
        let episode = {
            let mut episodes = write_txn.open_table(EPISODES_TABLE)?;
            let tags = write_txn.open_table(TAGS_TABLE)?;

            let Some(mut episode) = load_episode(&episodes, &tags, id.as_u64())? else {
                return Ok(None);
            };

            update.apply_to(&mut episode);
            episode.updated_at = Timestamp::now();

            let bytes = encode(&episode)?;
            episodes.insert(id.as_u64(), bytes.as_slice())?;
            episode
        };
        write_txn.commit().map_err(StorageError::from)?;

        debug!(id = %id, "Episode updated");
        Ok(Some(episode))
    }

    fn delete_episode(&self, id: EpisodeId) -> Result<bool> {
        let write_txn = self.begin_write()?;
        {
            let mut episodes = write_txn.open_table(EPISODES_TABLE)?;
            let Some(episode) = read_episode(&episodes, id.as_u64())? else {
                return Ok(false);
            };
            episodes.remove(id.as_u64())?;

            let mut tag_episodes = write_txn.open_multimap_table(TAG_EPISODES_TABLE)?;
            for tag_id in &episode.tag_ids {
                tag_episodes.remove(tag_id.as_u64(), id.as_u64())?;
            }

            let mut by_user = write_txn.open_multimap_table(EPISODES_BY_USER_TABLE)?;
            by_user.remove(episode.user_id.as_u64(), id.as_u64())?;
        }
        write_txn.commit().map_err(StorageError::from)?;

        debug!(id = %id, "Episode deleted");
        Ok(true)
    }

    // =========================================================================
    // Tags
    // =========================================================================

    fn create_tag(&self, name: &str) -> Result<Tag> {
        let write_txn = self.begin_write()?;
        let tag = insert_tag(&write_txn, name)?;
        write_txn.commit().map_err(StorageError::from)?;

        debug!(id = %tag.id, name = %tag.name, "Tag created");
        Ok(tag)
    }

    fn get_tag(&self, id: TagId) -> Result<Option<Tag>> {
        let read_txn = self.db.begin_read().map_err(StorageError::from)?;
        let table = read_txn.open_table(TAGS_TABLE)?;
        read_tag(&table, id.as_u64())
    }

    fn list_tags(&self) -> Result<Vec<Tag>> {
        let read_txn = self.db.begin_read().map_err(StorageError::from)?;
        let table = read_txn.open_table(TAGS_TABLE)?;

        let mut tags = Vec::new();
        for result in table.iter()? {
            let (_, value) = result.map_err(StorageError::from)?;
            tags.push(decode(value.value())?);
        }
        Ok(tags)
    }

    fn count_tags(&self) -> Result<u64> {
        let read_txn = self.db.begin_read().map_err(StorageError::from)?;
        let table = read_txn.open_table(TAGS_TABLE)?;
        let count = table.len()?;
        Ok(count)
    }

    fn replace_episode_tags(&self, id: EpisodeId, names: &[String]) -> Result<Option<Episode>> {
        let write_txn = self.begin_write()?;
        let (episode, created) = {
            let stored = {
                let episodes = write_txn.open_table(EPISODES_TABLE)?;
                let stored = read_episode(&episodes, id.as_u64())?;
                stored
            };
            let Some(mut episode) = stored else {
                return Ok(None);
            };

            // Find or create each tag; TAGS/TAG_NAMES are opened and closed
            // per name by the helpers.
            let mut created = 0usize;
            let mut tag_ids: Vec<TagId> = Vec::with_capacity(names.len());
            for name in names {
                let tag_id = match find_tag_id(&write_txn, name)? {
                    Some(existing) => existing,
                    None => {
                        created += 1;
                        insert_tag(&write_txn, name)?.id
                    }
                };
                if !tag_ids.contains(&tag_id) {
                    tag_ids.push(tag_id);
                }
            }

            {
                let mut tag_episodes = write_txn.open_multimap_table(TAG_EPISODES_TABLE)?;
                for old in &episode.tag_ids {
                    tag_episodes.remove(old.as_u64(), id.as_u64())?;
                }
                for new in &tag_ids {
                    tag_episodes.insert(new.as_u64(), id.as_u64())?;
                }
            }

            episode.tag_ids = tag_ids;
            episode.updated_at = Timestamp::now();

            let bytes = encode(&episode)?;
            let mut episodes = write_txn.open_table(EPISODES_TABLE)?;
            episodes.insert(id.as_u64(), bytes.as_slice())?;

            let tags = write_txn.open_table(TAGS_TABLE)?;
            episode.tags = resolve_tags(&tags, &episode.tag_ids)?;
            (episode, created)
        };
        write_txn.commit().map_err(StorageError::from)?;

        debug!(
            id = %id,
            tags = episode.tag_ids.len(),
            created = created,
            "Episode tags replaced"
        );
        Ok(Some(episode))
    }

    fn attach_tag(&self, episode_id: EpisodeId, tag_id: TagId, max_tags: usize) -> Result<bool> {
        let write_txn = self.begin_write()?;
        let attached = {
            let mut episodes = write_txn.open_table(EPISODES_TABLE)?;
            let tags = write_txn.open_table(TAGS_TABLE)?;

            let mut episode = read_episode(&episodes, episode_id.as_u64())?
                .ok_or_else(|| NotFoundError::episode(episode_id))?;
            let tag = read_tag(&tags, tag_id.as_u64())?
                .ok_or_else(|| NotFoundError::tag(tag_id))?;

            let current = resolve_tags(&tags, &episode.tag_ids)?;
            if current.iter().any(|t| t.name == tag.name) {
                false
            } else {
                if episode.tag_ids.len() >= max_tags {
                    // Dropping the uncommitted txn aborts it
                    return Err(ValidationError::too_many_items(
                        "tags",
                        episode.tag_ids.len() + 1,
                        max_tags,
                    )
                    .into());
                }

                episode.tag_ids.push(tag.id);
                episode.updated_at = Timestamp::now();

                let bytes = encode(&episode)?;
                episodes.insert(episode_id.as_u64(), bytes.as_slice())?;

                let mut tag_episodes = write_txn.open_multimap_table(TAG_EPISODES_TABLE)?;
                tag_episodes.insert(tag_id.as_u64(), episode_id.as_u64())?;
                true
            }
        };
        write_txn.commit().map_err(StorageError::from)?;

        if attached {
            debug!(episode_id = %episode_id, tag_id = %tag_id, "Tag attached");
        }
        Ok(attached)
    }

    fn detach_tag(&self, episode_id: EpisodeId, tag_id: TagId) -> Result<bool> {
        let write_txn = self.begin_write()?;
        let detached = {
            let mut episodes = write_txn.open_table(EPISODES_TABLE)?;
            let mut episode = read_episode(&episodes, episode_id.as_u64())?
                .ok_or_else(|| NotFoundError::episode(episode_id))?;

            match episode.tag_ids.iter().position(|id| *id == tag_id) {
                Some(index) => {
                    episode.tag_ids.remove(index);
                    episode.updated_at = Timestamp::now();

                    let bytes = encode(&episode)?;
                    episodes.insert(episode_id.as_u64(), bytes.as_slice())?;

                    let mut tag_episodes = write_txn.open_multimap_table(TAG_EPISODES_TABLE)?;
                    tag_episodes.remove(tag_id.as_u64(), episode_id.as_u64())?;
                    true
                }
                None => false,
            }
        };
        write_txn.commit().map_err(StorageError::from)?;

        if detached {
            debug!(episode_id = %episode_id, tag_id = %tag_id, "Tag detached");
        }
        Ok(detached)
    }
}

// RedbStorage is auto Send + Sync: Database, DatabaseMetadata, PathBuf and
// SyncMode are all Send + Sync.
