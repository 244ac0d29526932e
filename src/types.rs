//! Core type definitions for EpisodeDB identifiers and timestamps.
//!
//! Identifiers are store-assigned integers drawn from per-entity sequences
//! inside the creating write transaction. They are never reused.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Episode identifier (store-assigned primary key).
///
/// Not user-facing; external links use the episode's
/// [`Permalink`](crate::Permalink) via [`Episode::to_param`](crate::Episode::to_param).
///
/// # Example
/// ```
/// use episodedb::EpisodeId;
///
/// let id = EpisodeId::from_u64(7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EpisodeId(pub u64);

impl EpisodeId {
    /// Wraps a raw key.
    #[inline]
    pub const fn from_u64(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw key for storage.
    #[inline]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EpisodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tag identifier (store-assigned primary key).
///
/// Tags are shared between episodes. Several tags may carry the same name;
/// the id is what an episode references.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TagId(pub u64);

impl TagId {
    /// Wraps a raw key.
    #[inline]
    pub const fn from_u64(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw key for storage.
    #[inline]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User identifier (store-assigned primary key).
///
/// Every episode belongs to exactly one user. `UserId(0)` is never
/// allocated and serves as the "unset" sentinel.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct UserId(pub u64);

impl UserId {
    /// Wraps a raw key.
    #[inline]
    pub const fn from_u64(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw key for storage.
    #[inline]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Returns true for the never-allocated sentinel id.
    #[inline]
    pub const fn is_unset(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unix timestamp in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    ///
    /// If the system clock is before the Unix epoch, returns the epoch
    /// rather than panicking.
    #[inline]
    pub fn now() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Self(duration.as_millis() as i64)
    }

    /// Creates a timestamp from Unix milliseconds.
    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the timestamp as Unix milliseconds.
    #[inline]
    pub const fn as_millis(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(EpisodeId::from_u64(42).to_string(), "42");
        assert_eq!(TagId::from_u64(3).to_string(), "3");
        assert_eq!(UserId::from_u64(9).to_string(), "9");
    }

    #[test]
    fn test_id_ordering_follows_allocation() {
        assert!(EpisodeId(1) < EpisodeId(2));
        assert!(TagId(10) > TagId(2));
    }

    #[test]
    fn test_user_id_default_is_unset() {
        assert!(UserId::default().is_unset());
        assert!(!UserId::from_u64(1).is_unset());
    }

    #[test]
    fn test_timestamp_now_is_positive() {
        let ts = Timestamp::now();
        assert!(ts.as_millis() > 0);
    }

    #[test]
    fn test_timestamp_ordering() {
        let t1 = Timestamp::from_millis(1000);
        let t2 = Timestamp::from_millis(2000);
        assert!(t1 < t2);
    }

    #[test]
    fn test_id_bincode_roundtrip() {
        let id = EpisodeId::from_u64(13466);
        let bytes = bincode::serialize(&id).unwrap();
        let restored: EpisodeId = bincode::deserialize(&bytes).unwrap();
        assert_eq!(id, restored);
    }
}
