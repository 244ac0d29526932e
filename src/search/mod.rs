//! Search operations for EpisodeDB.
//!
//! This module provides the named scopes ([`by_tag`], [`by_keywords`]) as
//! composable iterator adaptors, and [`SearchFilter`] to bundle them for
//! [`EpisodeDB::search_episodes`](crate::EpisodeDB::search_episodes).

mod filter;
mod scope;

pub use filter::SearchFilter;
pub use scope::{by_keywords, by_tag};
