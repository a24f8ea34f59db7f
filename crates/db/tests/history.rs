mod support;

use support::{setup_db, setup_seeded_db};

#[test]
fn history_is_newest_first_and_limited() {
    let mut test_db = setup_seeded_db(200);
    let db = &mut test_db.db;
    for (index, successes) in [3_i64, 5, 2, 7].iter().enumerate() {
        db.insert_history(
            *successes,
            200 - successes,
            Some("3 successes"),
            &format!("2025-03-0{}T10:00:00.000Z", index + 1),
        )
        .expect("insert history");
    }

    let entries = db.history(3).expect("history");
    let successes: Vec<i64> = entries.iter().map(|entry| entry.successes).collect();
    assert_eq!(successes, vec![7, 2, 5]);
    assert_eq!(db.history_count().expect("count"), 4);
    assert!(db.history(0).expect("empty").is_empty());
}

#[test]
fn history_keeps_resulting_level_and_nullable_source() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    let inserted = db
        .insert_history(60, 140, None, "2025-03-05T12:00:00.000Z")
        .expect("insert");

    let entries = db.history(10).expect("history");
    assert_eq!(entries, vec![inserted]);
    assert_eq!(entries[0].resulting_level, 140);
    assert_eq!(entries[0].source_text, None);
}
