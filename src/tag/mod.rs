//! Tag management module.
//!
//! Tags are assigned to episodes through a free-text **tag list**: a
//! comma-separated string such as `"activerecord, 3.0"`. This module holds
//! the pure parsing and rendering half of that contract; the storage half
//! (find-or-create, replacing an episode's tag set) lives on
//! [`EpisodeDB::set_tag_list`](crate::EpisodeDB::set_tag_list).
//!
//! # Parsing Rules
//!
//! - split on `,`
//! - trim surrounding whitespace from each token
//! - drop empty tokens
//! - drop repeated names, keeping the first occurrence
//!
//! ```rust
//! use episodedb::tag::parse_tag_list;
//!
//! assert_eq!(parse_tag_list(" rails, ,3.0, rails "), vec!["rails", "3.0"]);
//! ```

pub mod types;

pub use types::Tag;

use std::collections::HashSet;

use crate::error::{EpisodeDBError, ValidationError};
use crate::storage::schema::MAX_TAG_LENGTH;

/// Separator between names in a tag list.
pub const TAG_SEPARATOR: char = ',';

/// Splits a raw tag list into distinct, trimmed, non-empty names.
///
/// Order follows first appearance in `raw`. Deduplication is exact and
/// case-sensitive: `"Ruby, ruby"` yields two names.
pub fn parse_tag_list(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.split(TAG_SEPARATOR)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(*name))
        .map(String::from)
        .collect()
}

/// Renders tags as a tag list string (`"a, b"`), in the given order.
pub fn format_tag_list(tags: &[Tag]) -> String {
    tags.iter()
        .map(|t| t.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validates a single tag name.
///
/// The name must be non-blank, at most 100 bytes, free of the list
/// separator, and already trimmed.
pub(crate) fn validate_tag_name(name: &str) -> Result<(), EpisodeDBError> {
    if name.trim().is_empty() {
        return Err(ValidationError::required_field("tag name").into());
    }

    if name.len() > MAX_TAG_LENGTH {
        return Err(ValidationError::too_long("tag name", name.len(), MAX_TAG_LENGTH).into());
    }

    if name.contains(TAG_SEPARATOR) {
        return Err(ValidationError::invalid_field(
            "tag name",
            format!("must not contain '{}'", TAG_SEPARATOR),
        )
        .into());
    }

    if name.trim() != name {
        return Err(ValidationError::invalid_field(
            "tag name",
            "must not have leading or trailing whitespace",
        )
        .into());
    }

    Ok(())
}

/// Validates the parsed names of a tag list against the per-episode limit.
pub(crate) fn validate_tag_names(names: &[String], max_tags: usize) -> Result<(), EpisodeDBError> {
    if names.len() > max_tags {
        return Err(ValidationError::too_many_items("tags", names.len(), max_tags).into());
    }

    for (i, name) in names.iter().enumerate() {
        if name.len() > MAX_TAG_LENGTH {
            return Err(ValidationError::invalid_field(
                "tags",
                format!(
                    "tag at index {} exceeds max length of {} bytes (got {})",
                    i,
                    MAX_TAG_LENGTH,
                    name.len()
                ),
            )
            .into());
        }
    }

    Ok(())
}
