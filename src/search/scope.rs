//! Named scopes over episode sequences.
//!
//! A scope takes any iterator of `&Episode` and returns a lazy iterator of
//! the episodes it keeps, in input order. Scopes never mutate their input and
//! compose by plain function application:
//!
//! ```rust,ignore
//! use episodedb::search::{by_keywords, by_tag};
//!
//! let hits: Vec<_> = by_keywords(by_tag(&all, Some("rails")), "routing").collect();
//! ```
//!
//! Blank scope arguments never error; they keep everything.

use crate::episode::Episode;

/// Keeps episodes carrying a tag named exactly `tag_name`.
///
/// Matching is case-sensitive. `None` or a blank name keeps every episode.
/// Surrounding whitespace in `tag_name` is ignored, since stored tag names
/// are always trimmed.
pub fn by_tag<'a, I>(episodes: I, tag_name: Option<&'a str>) -> impl Iterator<Item = &'a Episode>
where
    I: IntoIterator<Item = &'a Episode>,
{
    let tag_name = tag_name.map(str::trim).filter(|name| !name.is_empty());
    episodes
        .into_iter()
        .filter(move |episode| tag_name.is_none_or(|name| episode.has_tag(name)))
}

/// Keeps episodes whose name contains any keyword of `query`.
///
/// `query` is split on whitespace; each token is matched as a
/// case-insensitive substring of the episode name, and one matching token is
/// enough. Each episode is yielded at most once. A blank query keeps every
/// episode.
pub fn by_keywords<'a, I>(episodes: I, query: &str) -> impl Iterator<Item = &'a Episode>
where
    I: IntoIterator<Item = &'a Episode>,
{
    let keywords = keywords(query);
    episodes
        .into_iter()
        .filter(move |episode| keywords.is_empty() || name_matches(&episode.name, &keywords))
}

/// Lowercased whitespace-separated tokens of a keyword query.
pub(crate) fn keywords(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_lowercase).collect()
}

/// True if `name` contains any of the (already lowercased) keywords.
pub(crate) fn name_matches(name: &str, keywords: &[String]) -> bool {
    let name = name.to_lowercase();
    keywords.iter().any(|k| name.contains(k.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::episode::Permalink;
    use crate::tag::Tag;
    use crate::types::{EpisodeId, TagId, Timestamp, UserId};

    fn episode(id: u64, name: &str, tags: &[&str]) -> Episode {
        let tags: Vec<Tag> = tags
            .iter()
            .enumerate()
            .map(|(i, n)| Tag::new(TagId::from_u64(id * 100 + i as u64), *n))
            .collect();
        Episode {
            id: EpisodeId::from_u64(id),
            user_id: UserId::from_u64(1),
            name: name.into(),
            permalink: Permalink::from(id),
            description: "description".into(),
            notes: "notes".into(),
            seconds: 300,
            position: id,
            tag_ids: tags.iter().map(|t| t.id).collect(),
            tags,
            created_at: Timestamp::now(),
            updated_at: Timestamp::now(),
        }
    }

    fn ids<'a>(iter: impl Iterator<Item = &'a Episode>) -> Vec<u64> {
        iter.map(|e| e.id.as_u64()).collect()
    }

    fn catalogue() -> Vec<Episode> {
        vec![
            episode(1, "this is superman la", &["activerecord"]),
            episode(2, "is that irronman", &["activemodel"]),
            episode(3, "xman", &["activemodel", "rails"]),
        ]
    }

    #[test]
    fn test_by_tag_filters_exact_name() {
        let all = catalogue();
        assert_eq!(ids(by_tag(&all, Some("activemodel"))), vec![2, 3]);
        assert_eq!(ids(by_tag(&all, Some("activerecord"))), vec![1]);
    }

    #[test]
    fn test_by_tag_none_returns_all() {
        let all = catalogue();
        assert_eq!(ids(by_tag(&all, None)), vec![1, 2, 3]);
        assert_eq!(ids(by_tag(&all, Some(""))), vec![1, 2, 3]);
        assert_eq!(ids(by_tag(&all, Some("  "))), vec![1, 2, 3]);
    }

    #[test]
    fn test_by_tag_is_case_sensitive() {
        let all = catalogue();
        assert!(ids(by_tag(&all, Some("ActiveModel"))).is_empty());
    }

    #[test]
    fn test_by_tag_no_match_is_empty() {
        let all = catalogue();
        assert!(ids(by_tag(&all, Some("django"))).is_empty());
    }

    #[test]
    fn test_by_keywords_single() {
        let all = catalogue();
        assert_eq!(ids(by_keywords(&all, "superman")), vec![1]);
    }

    #[test]
    fn test_by_keywords_or_semantics() {
        let all = catalogue();
        assert_eq!(ids(by_keywords(&all, "superman irronman")), vec![1, 2]);
    }

    #[test]
    fn test_by_keywords_each_episode_once() {
        let all = catalogue();
        // "man" and "is" both hit episodes 1 and 2
        assert_eq!(ids(by_keywords(&all, "man is")), vec![1, 2, 3]);
    }

    #[test]
    fn test_by_keywords_ignores_case() {
        let all = catalogue();
        assert_eq!(ids(by_keywords(&all, "IrrOnMaN")), vec![2]);
    }

    #[test]
    fn test_by_keywords_blank_returns_all() {
        let all = catalogue();
        assert_eq!(ids(by_keywords(&all, "")), vec![1, 2, 3]);
        assert_eq!(ids(by_keywords(&all, " \t ")), vec![1, 2, 3]);
    }

    #[test]
    fn test_scopes_compose() {
        let all = catalogue();
        let hits = ids(by_keywords(by_tag(&all, Some("activemodel")), "man"));
        assert_eq!(hits, vec![2, 3]);

        let hits = ids(by_tag(by_keywords(&all, "xman"), Some("rails")));
        assert_eq!(hits, vec![3]);
    }

    #[test]
    fn test_scopes_do_not_mutate_input() {
        let all = catalogue();
        let _ = by_tag(&all, Some("rails")).count();
        let _ = by_keywords(&all, "superman").count();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].name, "this is superman la");
    }
}
