use mdb_lookup::lookup::query::{KEY_MAX, clamp_key, format_match, query};
use mdb_lookup::lookup::store::{Record, RecordStore};

fn store() -> RecordStore {
    RecordStore::from_records(vec![
        Record {
            name: "alice".to_string(),
            msg: "hello world".to_string(),
        },
        Record {
            name: "bob".to_string(),
            msg: "see you".to_string(),
        },
        Record {
            name: "malice".to_string(),
            msg: "plotting".to_string(),
        },
    ])
}

#[test]
fn test_query_matches_name_field() {
    let store = store();

    let hits: Vec<usize> = query(&store, "bob").map(|(i, _)| i).collect();

    assert_eq!(hits, [2]);
}

#[test]
fn test_query_matches_msg_field() {
    let store = store();

    let hits: Vec<usize> = query(&store, "worl").map(|(i, _)| i).collect();

    assert_eq!(hits, [1]);
}

#[test]
fn test_query_matches_either_field_in_store_order() {
    let store = store();

    // "lice" hits alice and malice by name, nothing by message
    let hits: Vec<(usize, &str)> = query(&store, "lice")
        .map(|(i, r)| (i, r.name.as_str()))
        .collect();

    assert_eq!(hits, [(1, "alice"), (3, "malice")]);
}

#[test]
fn test_query_no_match_is_empty() {
    let store = store();
    assert_eq!(query(&store, "zzz").count(), 0);
}

#[test]
fn test_query_is_case_sensitive() {
    let store = store();
    assert_eq!(query(&store, "Alice").count(), 0);
}

#[test]
fn test_query_empty_key_matches_every_record() {
    let store = store();

    let hits: Vec<usize> = query(&store, "").map(|(i, _)| i).collect();

    assert_eq!(hits, [1, 2, 3]);
}

#[test]
fn test_query_repeats_identically() {
    let store = store();

    let first: Vec<usize> = query(&store, "o").map(|(i, _)| i).collect();
    let second: Vec<usize> = query(&store, "o").map(|(i, _)| i).collect();

    assert_eq!(first, second);
}

#[test]
fn test_clamp_key_strips_one_trailing_newline() {
    assert_eq!(clamp_key("bob\n"), "bob");
    assert_eq!(clamp_key("bob"), "bob");
}

#[test]
fn test_clamp_key_keeps_carriage_return() {
    // only the newline is a terminator; a CR stays part of the key
    assert_eq!(clamp_key("bo\r\n"), "bo\r");
}

#[test]
fn test_clamp_key_truncates_to_key_max() {
    assert_eq!(clamp_key("abcdefgh\n"), "abcde");
    assert_eq!(clamp_key("abcde").len(), KEY_MAX);
}

#[test]
fn test_clamp_key_respects_char_boundaries() {
    // three 2-byte chars; a 5-byte clamp backs off to 4 bytes
    assert_eq!(clamp_key("ééé"), "éé");
}

#[test]
fn test_clamped_key_still_matches() {
    let store = store();

    // "alices" clamps to "alice" and matches
    let key = clamp_key("alices\n");
    let hits: Vec<usize> = query(&store, key).map(|(i, _)| i).collect();

    assert_eq!(hits, [1, 3]);
}

#[test]
fn test_format_match_layout() {
    let rec = Record {
        name: "alice".to_string(),
        msg: "hello world".to_string(),
    };

    assert_eq!(format_match(1, &rec), "   1: {alice} said {hello world}\n");
    assert_eq!(format_match(42, &rec), "  42: {alice} said {hello world}\n");
    assert_eq!(
        format_match(12345, &rec),
        "12345: {alice} said {hello world}\n"
    );
}
