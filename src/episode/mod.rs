//! Episode management module.
//!
//! An **episode** is the core record in EpisodeDB. Besides its stored
//! fields it exposes derived attributes computed on the fly:
//!
//! - [`Episode::minutes`]: whole minutes of running time
//! - [`Episode::duration`]: running time as `M:SS`
//! - [`Episode::to_param`]: the permalink as the external identifier
//!
//! # Operations
//!
//! All episode operations are available on [`EpisodeDB`](crate::EpisodeDB):
//!
//! - [`create_episode(new)`](crate::EpisodeDB::create_episode)
//! - [`get_episode(id)`](crate::EpisodeDB::get_episode)
//! - [`list_episodes()`](crate::EpisodeDB::list_episodes)
//! - [`update_episode(id, update)`](crate::EpisodeDB::update_episode)
//! - [`delete_episode(id)`](crate::EpisodeDB::delete_episode)
//!
//! # Position
//!
//! Every episode receives a 1-based `position` when it is inserted. The
//! value comes from a store-side sequence read and advanced in the same
//! write transaction as the insert, so concurrent creators are serialized
//! and positions are unique and gap-free in creation order. Updates never
//! touch it, and a rejected create consumes nothing.

pub mod types;
pub(crate) mod validation;

pub use types::{format_duration, Episode, EpisodeUpdate, NewEpisode, Permalink};
pub(crate) use validation::{validate_episode_update, validate_new_episode};
