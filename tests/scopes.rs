//! Integration tests for the tag and keyword scopes.
//!
//! The same catalogue is queried through the facade (store-backed) and
//! through the pure iterator scopes over a snapshot; both must agree.

use episodedb::{
    by_keywords, by_tag, Config, Episode, EpisodeDB, NewEpisode, Permalink, SearchFilter,
};
use tempfile::tempdir;

/// Helper: open a DB holding the small catalogue used by every test.
///
/// | position | name                    | tags               |
/// |----------|-------------------------|--------------------|
/// | 1        | Superman Returns        | activemodel        |
/// | 2        | IrronMan and friends    | activemodel, rails |
/// | 3        | xman origins            | rails              |
fn open_catalogue() -> (EpisodeDB, tempfile::TempDir) {
    let dir = tempdir().unwrap();
    let db = EpisodeDB::open(dir.path().join("test.db"), Config::default()).unwrap();
    let user = db.create_user("ryan").unwrap();

    for (name, tags) in [
        ("Superman Returns", "activemodel"),
        ("IrronMan and friends", "activemodel, rails"),
        ("xman origins", "rails"),
    ] {
        let episode = db
            .create_episode(NewEpisode {
                user_id: user.id,
                name: name.into(),
                permalink: Permalink::from(name.to_lowercase().replace(' ', "-")),
                description: "description".into(),
                notes: "notes".into(),
                seconds: 300,
            })
            .unwrap();
        db.set_tag_list(episode.id, tags).unwrap();
    }

    (db, dir)
}

fn names(episodes: &[Episode]) -> Vec<&str> {
    episodes.iter().map(|e| e.name.as_str()).collect()
}

// ============================================================================
// by_tag
// ============================================================================

#[test]
fn test_by_tag_none_returns_all() {
    let (db, _dir) = open_catalogue();

    let all = db.episodes_by_tag(None).unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(db.episodes_by_tag(Some("")).unwrap().len(), 3);

    let snapshot = db.list_episodes().unwrap();
    assert_eq!(by_tag(&snapshot, None).count(), 3);

    db.close().unwrap();
}

#[test]
fn test_by_tag_returns_exactly_tagged() {
    let (db, _dir) = open_catalogue();

    let tagged = db.episodes_by_tag(Some("activemodel")).unwrap();
    assert_eq!(
        names(&tagged),
        vec!["Superman Returns", "IrronMan and friends"]
    );

    let snapshot = db.list_episodes().unwrap();
    let scoped: Vec<&str> = by_tag(&snapshot, Some("activemodel"))
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(scoped, names(&tagged));

    db.close().unwrap();
}

#[test]
fn test_by_tag_is_case_sensitive() {
    let (db, _dir) = open_catalogue();
    assert!(db.episodes_by_tag(Some("ActiveModel")).unwrap().is_empty());
    assert!(db.episodes_by_tag(Some("unknown")).unwrap().is_empty());
    db.close().unwrap();
}

// ============================================================================
// by_keywords
// ============================================================================

#[test]
fn test_by_keywords_blank_returns_all() {
    let (db, _dir) = open_catalogue();
    assert_eq!(db.episodes_by_keywords("").unwrap().len(), 3);
    assert_eq!(db.episodes_by_keywords("   ").unwrap().len(), 3);
    db.close().unwrap();
}

#[test]
fn test_by_keywords_single_token() {
    let (db, _dir) = open_catalogue();
    let hits = db.episodes_by_keywords("superman").unwrap();
    assert_eq!(names(&hits), vec!["Superman Returns"]);
    db.close().unwrap();
}

#[test]
fn test_by_keywords_union_without_duplicates() {
    let (db, _dir) = open_catalogue();

    let hits = db.episodes_by_keywords("superman irronman").unwrap();
    assert_eq!(
        names(&hits),
        vec!["Superman Returns", "IrronMan and friends"]
    );

    // "man" matches all three, each exactly once
    let hits = db.episodes_by_keywords("man MAN").unwrap();
    assert_eq!(hits.len(), 3);

    db.close().unwrap();
}

#[test]
fn test_by_keywords_ignores_case() {
    let (db, _dir) = open_catalogue();
    let hits = db.episodes_by_keywords("IrrOnMaN").unwrap();
    assert_eq!(names(&hits), vec!["IrronMan and friends"]);
    db.close().unwrap();
}

// ============================================================================
// Composition
// ============================================================================

#[test]
fn test_scopes_compose() {
    let (db, _dir) = open_catalogue();
    let snapshot = db.list_episodes().unwrap();

    let hits: Vec<&str> = by_keywords(by_tag(&snapshot, Some("rails")), "man")
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(hits, vec!["IrronMan and friends", "xman origins"]);

    let filter = SearchFilter {
        tag: Some("rails".into()),
        keywords: Some("xman".into()),
        ..SearchFilter::default()
    };
    let searched = db.search_episodes(&filter).unwrap();
    assert_eq!(names(&searched), vec!["xman origins"]);

    db.close().unwrap();
}
