#![no_main]

use episodedb::{Config, EpisodeDB, NewEpisode, Permalink};
use libfuzzer_sys::fuzz_target;

// Arbitrary tag lists must either be rejected by validation or round-trip
// through the store as their parsed form.
fuzz_target!(|raw: &str| {
    let dir = tempfile::tempdir().unwrap();
    let db = EpisodeDB::open(dir.path().join("fuzz.db"), Config::default()).unwrap();
    let user = db.create_user("fuzz").unwrap();
    let episode = db
        .create_episode(NewEpisode {
            user_id: user.id,
            name: "fuzz".into(),
            permalink: Permalink::from("fuzz"),
            description: "fuzz".into(),
            notes: "fuzz".into(),
            seconds: 1,
        })
        .unwrap();

    match db.set_tag_list(episode.id, raw) {
        Ok(updated) => {
            let expected = episodedb::parse_tag_list(raw).join(", ");
            assert_eq!(updated.tag_list(), expected);
            assert_eq!(db.tag_list(episode.id).unwrap(), expected);
        }
        Err(e) => assert!(e.is_validation()),
    }

    db.close().unwrap();
});
