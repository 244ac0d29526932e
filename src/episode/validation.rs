//! Input validation for episodes.
//!
//! Validates [`NewEpisode`] and [`EpisodeUpdate`] fields before they reach
//! the storage layer. All size constraints are defined as constants in
//! [`crate::storage::schema`].
//!
//! Unlike a fail-fast check, every field is inspected and all failures are
//! reported together, so callers can show per-field messages.
//!
//! # Validation Layers
//!
//! ```text
//! EpisodeDB::create_episode()
//!     ├── validate_new_episode()       ← field presence and sizes
//!     └── storage.create_episode()     ← only reached if valid; checks the
//!                                        owning user, allocates id and position
//! ```

use crate::episode::types::{EpisodeUpdate, NewEpisode};
use crate::error::{EpisodeDBError, ValidationError};
use crate::storage::schema::{
    MAX_DESCRIPTION_SIZE, MAX_NAME_LENGTH, MAX_NOTES_SIZE, MAX_PERMALINK_LENGTH,
};

/// Validates a [`NewEpisode`] before storage.
///
/// # Rules
///
/// | Field | Constraint |
/// |-------|------------|
/// | `user_id` | Must be set |
/// | `name` | Non-blank, max 255 bytes |
/// | `permalink` | Non-blank, max 255 bytes |
/// | `description` | Non-blank, max 10 KB |
/// | `notes` | Non-blank, max 100 KB |
pub(crate) fn validate_new_episode(episode: &NewEpisode) -> Result<(), EpisodeDBError> {
    let mut errors = Vec::new();

    if episode.user_id.is_unset() {
        errors.push(ValidationError::required_field("user_id"));
    }

    check_text(&mut errors, "name", &episode.name, MAX_NAME_LENGTH);
    check_text(
        &mut errors,
        "permalink",
        episode.permalink.as_str(),
        MAX_PERMALINK_LENGTH,
    );
    check_text(
        &mut errors,
        "description",
        &episode.description,
        MAX_DESCRIPTION_SIZE,
    );
    check_text(&mut errors, "notes", &episode.notes, MAX_NOTES_SIZE);

    into_result(errors)
}

/// Validates an [`EpisodeUpdate`] before applying.
///
/// Only validates fields that are `Some(...)`. A present field must satisfy
/// the same rules as on create, so an update can never blank a required field.
pub(crate) fn validate_episode_update(update: &EpisodeUpdate) -> Result<(), EpisodeDBError> {
    let mut errors = Vec::new();

    if let Some(ref name) = update.name {
        check_text(&mut errors, "name", name, MAX_NAME_LENGTH);
    }
    if let Some(ref permalink) = update.permalink {
        check_text(
            &mut errors,
            "permalink",
            permalink.as_str(),
            MAX_PERMALINK_LENGTH,
        );
    }
    if let Some(ref description) = update.description {
        check_text(
            &mut errors,
            "description",
            description,
            MAX_DESCRIPTION_SIZE,
        );
    }
    if let Some(ref notes) = update.notes {
        check_text(&mut errors, "notes", notes, MAX_NOTES_SIZE);
    }

    into_result(errors)
}

/// Presence and size check for a required text field.
fn check_text(errors: &mut Vec<ValidationError>, field: &str, value: &str, max: usize) {
    if value.trim().is_empty() {
        errors.push(ValidationError::required_field(field));
    } else if value.len() > max {
        errors.push(ValidationError::too_long(field, value.len(), max));
    }
}

fn into_result(errors: Vec<ValidationError>) -> Result<(), EpisodeDBError> {
    match ValidationError::from_errors(errors) {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}
