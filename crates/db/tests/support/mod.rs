#![allow(dead_code)]

use std::path::PathBuf;

use blood_db::Db;
use tempfile::TempDir;

pub const SEEDED_AT: &str = "2025-03-05T12:00:00.000Z";

pub struct TestDb {
    pub _dir: TempDir,
    pub db: Db,
    pub path: PathBuf,
}

pub fn setup_db() -> TestDb {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("test.sqlite");
    let mut db = Db::open(&path).expect("open db");
    db.migrate().expect("migrate db");
    TestDb {
        _dir: dir,
        db,
        path,
    }
}

pub fn setup_seeded_db(cap: i64) -> TestDb {
    let mut test_db = setup_db();
    test_db
        .db
        .seed_level_if_empty(cap, SEEDED_AT)
        .expect("seed level");
    test_db
}
