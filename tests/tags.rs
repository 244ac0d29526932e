//! Integration tests for tag list management.
//!
//! Covers the tag list setter/getter on the facade, tag reuse by name and
//! the lower-level attach/detach operations.

use std::sync::{Arc, Barrier};
use std::thread;

use episodedb::{Config, EpisodeDB, EpisodeId, NewEpisode, Permalink, TagId};
use tempfile::tempdir;

/// Helper to open a fresh database with default config.
fn open_db() -> (EpisodeDB, tempfile::TempDir) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = EpisodeDB::open(&path, Config::default()).unwrap();
    (db, dir)
}

/// Helper: open DB and create one untagged episode.
fn open_db_with_episode() -> (EpisodeDB, EpisodeId, tempfile::TempDir) {
    let (db, dir) = open_db();
    let user = db.create_user("ryan").unwrap();
    let episode = db
        .create_episode(NewEpisode {
            user_id: user.id,
            name: "Test".into(),
            permalink: Permalink::from("test"),
            description: "Test description".into(),
            notes: "Test notes".into(),
            seconds: 600,
        })
        .unwrap();
    (db, episode.id, dir)
}

// ============================================================================
// Tag list setter
// ============================================================================

#[test]
fn test_new_tag_increases_tag_count_by_one() {
    let (db, id, _dir) = open_db_with_episode();
    assert_eq!(db.count_tags().unwrap(), 0);

    db.set_tag_list(id, "new").unwrap();

    assert_eq!(db.count_tags().unwrap(), 1);
    db.close().unwrap();
}

#[test]
fn test_tag_list_assigns_named_tags() {
    let (db, id, _dir) = open_db_with_episode();

    let episode = db.set_tag_list(id, "activerecord, 3.0").unwrap();

    let names: Vec<&str> = episode.tag_names().collect();
    assert_eq!(names, vec!["activerecord", "3.0"]);
    assert!(episode.has_tag("activerecord"));
    assert!(episode.has_tag("3.0"));

    db.close().unwrap();
}

#[test]
fn test_repeated_name_attaches_once() {
    let (db, id, _dir) = open_db_with_episode();

    let episode = db.set_tag_list(id, "activerecord, activerecord").unwrap();

    assert_eq!(episode.tags.len(), 1);
    assert_eq!(db.count_tags().unwrap(), 1);
    db.close().unwrap();
}

#[test]
fn test_tag_list_getter_keeps_attachment_order() {
    let (db, id, _dir) = open_db_with_episode();
    let test = db.create_tag("test").unwrap();
    let rspec = db.create_tag("rspec").unwrap();

    db.attach_tag(id, test.id).unwrap();
    db.attach_tag(id, rspec.id).unwrap();

    assert_eq!(db.tag_list(id).unwrap(), "test, rspec");
    db.close().unwrap();
}

#[test]
fn test_setter_replaces_previous_tags() {
    let (db, id, _dir) = open_db_with_episode();

    db.set_tag_list(id, "ruby, rails").unwrap();
    db.set_tag_list(id, "rails, rspec").unwrap();

    assert_eq!(db.tag_list(id).unwrap(), "rails, rspec");
    // "ruby" survives as a tag, just no longer attached
    assert_eq!(db.count_tags().unwrap(), 3);
    assert!(db.episodes_by_tag(Some("ruby")).unwrap().is_empty());

    db.close().unwrap();
}

#[test]
fn test_empty_list_clears_tags() {
    let (db, id, _dir) = open_db_with_episode();

    db.set_tag_list(id, "ruby, rails").unwrap();
    let episode = db.set_tag_list(id, " , ").unwrap();

    assert!(episode.tags.is_empty());
    assert_eq!(db.tag_list(id).unwrap(), "");
    db.close().unwrap();
}

#[test]
fn test_existing_tags_are_reused_across_episodes() {
    let (db, first, _dir) = open_db_with_episode();
    let user = db.create_user("other").unwrap();
    let second = db
        .create_episode(NewEpisode {
            user_id: user.id,
            name: "Second".into(),
            permalink: Permalink::from("second"),
            description: "d".into(),
            notes: "n".into(),
            seconds: 60,
        })
        .unwrap()
        .id;

    let a = db.set_tag_list(first, "rails").unwrap();
    let b = db.set_tag_list(second, "rails, 3.0").unwrap();

    assert_eq!(a.tag_ids[0], b.tag_ids[0]);
    assert_eq!(db.count_tags().unwrap(), 2);
    assert_eq!(db.episodes_by_tag(Some("rails")).unwrap().len(), 2);

    db.close().unwrap();
}

#[test]
fn test_setter_on_missing_episode() {
    let (db, _dir) = open_db();
    let err = db.set_tag_list(EpisodeId::from_u64(9), "new").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(db.count_tags().unwrap(), 0);
    db.close().unwrap();
}

#[test]
fn test_overlong_tag_name_rejected() {
    let (db, id, _dir) = open_db_with_episode();
    let raw = format!("ok, {}", "x".repeat(101));
    let err = db.set_tag_list(id, &raw).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(db.count_tags().unwrap(), 0);
    db.close().unwrap();
}

// ============================================================================
// Tag records
// ============================================================================

#[test]
fn test_create_tag_validates_name() {
    let (db, _dir) = open_db();

    assert!(db.create_tag("").unwrap_err().is_validation());
    assert!(db.create_tag("a,b").unwrap_err().is_validation());
    assert!(db.create_tag(" padded ").unwrap_err().is_validation());

    let tag = db.create_tag("rails").unwrap();
    assert_eq!(db.get_tag(tag.id).unwrap().unwrap().name, "rails");
    assert!(db.get_tag(TagId::from_u64(99)).unwrap().is_none());

    db.close().unwrap();
}

#[test]
fn test_list_tags_in_creation_order() {
    let (db, _dir) = open_db();
    db.create_tag("b").unwrap();
    db.create_tag("a").unwrap();

    let names: Vec<String> = db.list_tags().unwrap().into_iter().map(|t| t.name).collect();
    assert_eq!(names, vec!["b", "a"]);

    db.close().unwrap();
}

#[test]
fn test_detach_tag() {
    let (db, id, _dir) = open_db_with_episode();
    let episode = db.set_tag_list(id, "test, rspec").unwrap();

    assert!(db.detach_tag(id, episode.tag_ids[0]).unwrap());
    assert!(!db.detach_tag(id, episode.tag_ids[0]).unwrap());
    assert_eq!(db.tag_list(id).unwrap(), "rspec");

    db.close().unwrap();
}

#[test]
fn test_attach_missing_tag() {
    let (db, id, _dir) = open_db_with_episode();
    let err = db.attach_tag(id, TagId::from_u64(5)).unwrap_err();
    assert!(err.is_not_found());
    db.close().unwrap();
}

#[test]
fn test_concurrent_attach_respects_tag_limit() {
    const EPISODES: usize = 20;

    let dir = tempdir().unwrap();
    let config = Config {
        max_tags_per_episode: 1,
        ..Default::default()
    };
    let db = Arc::new(EpisodeDB::open(dir.path().join("test.db"), config).unwrap());
    let user = db.create_user("ryan").unwrap();
    let rails = db.create_tag("rails").unwrap();
    let ruby = db.create_tag("ruby").unwrap();

    for i in 0..EPISODES {
        let episode = db
            .create_episode(NewEpisode {
                user_id: user.id,
                name: format!("Episode {}", i),
                permalink: Permalink::from(format!("episode-{}", i)),
                description: "Test description".into(),
                notes: "Test notes".into(),
                seconds: 60,
            })
            .unwrap();

        let barrier = Arc::new(Barrier::new(2));
        let handles: Vec<_> = [rails.id, ruby.id]
            .into_iter()
            .map(|tag_id| {
                let db = Arc::clone(&db);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    db.attach_tag(episode.id, tag_id)
                })
            })
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        let attached = results.iter().filter(|r| matches!(r, Ok(true))).count();
        let rejected = results
            .iter()
            .filter(|r| r.as_ref().is_err_and(|e| e.is_validation()))
            .count();
        assert_eq!(attached, 1, "episode {}: {:?}", i, results);
        assert_eq!(rejected, 1, "episode {}: {:?}", i, results);

        let stored = db.get_episode(episode.id).unwrap().unwrap();
        assert_eq!(stored.tag_ids.len(), 1);
    }

    let db = Arc::try_unwrap(db).unwrap();
    db.close().unwrap();
}
