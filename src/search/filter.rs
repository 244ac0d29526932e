//! Search filtering for episode queries.
//!
//! [`SearchFilter`] bundles the named scopes into one value that can be
//! passed around and applied to a snapshot of episodes. Fields set to `None`
//! are not filtered on.

use crate::episode::Episode;
use crate::search::scope::{keywords, name_matches};
use crate::types::UserId;

/// Filter criteria for episode search operations.
///
/// Used by [`EpisodeDB::search_episodes()`](crate::EpisodeDB::search_episodes).
/// All set criteria must hold (AND across fields); within `keywords` any
/// single token is enough (OR across tokens).
///
/// # Example
///
/// ```rust
/// use episodedb::SearchFilter;
///
/// // Episodes tagged "rails" whose name mentions routing or rack
/// let filter = SearchFilter {
///     tag: Some("rails".into()),
///     keywords: Some("routing rack".into()),
///     ..SearchFilter::default()
/// };
/// ```
#[derive(Clone, Debug, Default)]
pub struct SearchFilter {
    /// Only include episodes carrying a tag with exactly this name.
    ///
    /// `None` or a blank string means no tag filtering.
    pub tag: Option<String>,

    /// Only include episodes whose name contains any of these
    /// whitespace-separated keywords (case-insensitive).
    ///
    /// `None` or a blank string means no keyword filtering.
    pub keywords: Option<String>,

    /// Only include episodes owned by this user.
    pub user_id: Option<UserId>,
}

impl SearchFilter {
    /// Filter on a tag name only.
    pub fn tagged(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..Self::default()
        }
    }

    /// Filter on keywords only.
    pub fn keywords(query: impl Into<String>) -> Self {
        Self {
            keywords: Some(query.into()),
            ..Self::default()
        }
    }

    /// The tag criterion, if it is set and not blank.
    pub fn tag_name(&self) -> Option<&str> {
        self.tag
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Returns `true` if the given episode passes all filter criteria.
    ///
    /// Re-tokenizes the keyword query on every call. Use
    /// [`apply`](Self::apply) to filter many episodes.
    pub fn matches(&self, episode: &Episode) -> bool {
        self.matcher()(episode)
    }

    /// Returns the matching episodes in input order.
    pub fn apply<'a, I>(&self, episodes: I) -> Vec<&'a Episode>
    where
        I: IntoIterator<Item = &'a Episode>,
    {
        let matches = self.matcher();
        episodes.into_iter().filter(|&e| matches(e)).collect()
    }

    /// Predicate over episodes with the keyword tokens computed once.
    pub(crate) fn matcher(&self) -> impl Fn(&Episode) -> bool + '_ {
        let tag = self.tag_name();
        let tokens = self.keywords.as_deref().map(keywords).unwrap_or_default();

        move |episode: &Episode| {
            if self.user_id.is_some_and(|user_id| episode.user_id != user_id) {
                return false;
            }
            if tag.is_some_and(|name| !episode.has_tag(name)) {
                return false;
            }
            tokens.is_empty() || name_matches(&episode.name, &tokens)
        }
    }
}
