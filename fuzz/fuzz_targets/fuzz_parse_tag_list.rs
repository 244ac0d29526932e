#![no_main]

use episodedb::parse_tag_list;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|raw: &str| {
    let names = parse_tag_list(raw);

    for (i, name) in names.iter().enumerate() {
        assert!(!name.is_empty());
        assert_eq!(name.trim(), name);
        assert!(!name.contains(','));
        assert!(!names[..i].contains(name));
    }
});
