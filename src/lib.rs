//! # EpisodeDB
//!
//! Embedded store for a screencast/podcast episode catalogue.
//!
//! EpisodeDB keeps episodes, their owners and their tags in a single redb
//! file, and answers the questions a catalogue front end asks: which
//! episodes carry this tag, which names mention these words, and in what
//! order were they published.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use episodedb::{Config, EpisodeDB, NewEpisode, Permalink};
//!
//! let db = EpisodeDB::open("./episodes.db", Config::default())?;
//!
//! let ryan = db.create_user("ryan")?;
//! let episode = db.create_episode(NewEpisode {
//!     user_id: ryan.id,
//!     name: "Rack Middleware".into(),
//!     permalink: Permalink::from("rack-middleware"),
//!     description: "Writing your own middleware.".into(),
//!     notes: "Middleware ordering notes.".into(),
//!     seconds: 35,
//! })?;
//! assert_eq!(episode.position, 1);
//! assert_eq!(episode.duration(), "0:35");
//!
//! db.set_tag_list(episode.id, "rack, rails")?;
//! let tagged = db.episodes_by_tag(Some("rack"))?;
//!
//! db.close()?;
//! ```
//!
//! ## Key Concepts
//!
//! ### Episode
//!
//! An **episode** is one catalogue entry: name, permalink, description,
//! show notes and a running time in seconds. Every episode gets a
//! **position**, one more than the number of episodes created before it.
//! Positions are never reused or changed.
//!
//! ### Tag list
//!
//! Tags are edited as a comma-separated **tag list** (`"activerecord, 3.0"`).
//! Setting the list replaces the episode's whole tag set, reusing existing
//! tags by name.
//!
//! ### Scopes
//!
//! [`by_tag`] and [`by_keywords`] are pure iterator adaptors over episodes
//! and compose by function application. The facade offers the same queries
//! against the store.
//!
//! ## Thread Safety
//!
//! `EpisodeDB` is `Send + Sync` and can be shared across threads using `Arc`.
//! The database uses MVCC for concurrent reads with exclusive write locking.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

// ============================================================================
// Module declarations
// ============================================================================

mod config;
mod db;
mod error;
mod types;

pub mod storage;

// Domain modules
pub mod episode;
pub mod search;
pub mod tag;
pub mod user;

// ============================================================================
// Public API re-exports
// ============================================================================

// Main database interface
pub use db::EpisodeDB;

// Configuration
pub use config::{Config, SyncMode};

// Error handling
pub use error::{EpisodeDBError, NotFoundError, Result, StorageError, ValidationError};

// Core types
pub use types::{EpisodeId, TagId, Timestamp, UserId};

// Domain types
pub use episode::{format_duration, Episode, EpisodeUpdate, NewEpisode, Permalink};
pub use tag::{format_tag_list, parse_tag_list, Tag};
pub use user::User;

// Search
pub use search::{by_keywords, by_tag, SearchFilter};

// Storage (for advanced users)
pub use storage::DatabaseMetadata;

// ============================================================================
// Prelude module for convenient imports
// ============================================================================

/// Convenient imports for common EpisodeDB usage.
///
/// ```rust
/// use episodedb::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{Config, SyncMode};
    pub use crate::db::EpisodeDB;
    pub use crate::episode::{Episode, EpisodeUpdate, NewEpisode, Permalink};
    pub use crate::error::{EpisodeDBError, Result};
    pub use crate::search::{by_keywords, by_tag, SearchFilter};
    pub use crate::types::{EpisodeId, TagId, Timestamp, UserId};
}
