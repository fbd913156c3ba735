use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;
use std::path::Path;

mod common;
use common::{init_store_with_data, rhb, setup_test_db, setup_test_store, temp_out};

#[test]
fn test_backup_writes_versioned_snapshot() {
    let db = setup_test_db("bak_snapshot");
    let store = setup_test_store("bak_snapshot");
    init_store_with_data(&db, &store);

    let out = temp_out("bak_snapshot", "json");
    rhb()
        .args(["--db", &db, "--store", &store, "backup", "--file", &out])
        .assert()
        .success()
        .stdout(contains("Backup created"));

    let content = fs::read_to_string(&out).expect("read snapshot");
    let snapshot: serde_json::Value = serde_json::from_str(&content).expect("valid json");

    assert_eq!(snapshot["version"], 1);
    assert!(snapshot["timestamp"].as_i64().expect("timestamp") > 0);
    assert_eq!(snapshot["data"]["workLogs"].as_array().expect("workLogs").len(), 2);
    assert!(snapshot["data"]["settings"]["rentSettings"].is_object());
    assert!(snapshot["data"]["settings"]["timerState"].is_object());

    // stored rows keep the wire field names
    let log = &snapshot["data"]["workLogs"][0];
    assert!(log["break"].is_i64());
    assert!(log.get("break_min").is_none());
}

#[test]
fn test_backup_and_restore_round_trip() {
    let db = setup_test_db("bak_roundtrip_src");
    let store = setup_test_store("bak_roundtrip_src");
    init_store_with_data(&db, &store);

    rhb()
        .args([
            "--db", &db, "--store", &store, "debt", "add", "--person", "maru",
            "--description", "vet bill", "--amount", "1500",
        ])
        .assert()
        .success();

    let out = temp_out("bak_roundtrip", "json");
    rhb()
        .args(["--db", &db, "--store", &store, "backup", "--file", &out])
        .assert()
        .success();

    // restore into a completely fresh store
    let db2 = setup_test_db("bak_roundtrip_dst");
    let store2 = setup_test_store("bak_roundtrip_dst");
    rhb()
        .args(["--db", &db2, "--store", &store2, "--test", "init"])
        .assert()
        .success();

    rhb()
        .args([
            "--db", &db2, "--store", &store2, "restore", "--file", &out, "--yes",
        ])
        .assert()
        .success()
        .stdout(contains("2 work log(s)").and(contains("1 debt(s)")));

    rhb()
        .args(["--db", &db2, "--store", &store2, "list"])
        .assert()
        .success()
        .stdout(contains("2025-09-01").and(contains("2025-09-15")));

    rhb()
        .args(["--db", &db2, "--store", &store2, "debt", "list"])
        .assert()
        .success()
        .stdout(contains("vet bill"));
}

#[test]
fn test_restore_replaces_existing_contents() {
    let db = setup_test_db("bak_replace");
    let store = setup_test_store("bak_replace");
    init_store_with_data(&db, &store);

    let out = temp_out("bak_replace", "json");
    rhb()
        .args(["--db", &db, "--store", &store, "backup", "--file", &out])
        .assert()
        .success();

    // an extra record added after the backup disappears on restore
    rhb()
        .args([
            "--db", &db, "--store", &store, "add", "2025-10-01", "--person", "maru", "--in",
            "08:00", "--out", "09:00", "--activity", "cleaning",
        ])
        .assert()
        .success();

    rhb()
        .args(["--db", &db, "--store", &store, "restore", "--file", &out, "--yes"])
        .assert()
        .success();

    rhb()
        .args(["--db", &db, "--store", &store, "list"])
        .assert()
        .success()
        .stdout(contains("2025-09-01").and(contains("2025-10-01").not()));
}

#[test]
fn test_restore_rejects_snapshot_without_data() {
    let db = setup_test_db("bak_invalid");
    let store = setup_test_store("bak_invalid");
    init_store_with_data(&db, &store);

    let out = temp_out("bak_invalid", "json");
    fs::write(&out, r#"{"timestamp": 1, "version": 1}"#).expect("write bad snapshot");

    rhb()
        .args(["--db", &db, "--store", &store, "restore", "--file", &out, "--yes"])
        .assert()
        .failure();

    // the store is untouched after the failed restore
    rhb()
        .args(["--db", &db, "--store", &store, "list"])
        .assert()
        .success()
        .stdout(contains("2025-09-01").and(contains("2025-09-15")));
}

#[test]
fn test_restore_missing_file_fails() {
    let db = setup_test_db("bak_missing");
    let store = setup_test_store("bak_missing");
    init_store_with_data(&db, &store);

    rhb()
        .args([
            "--db", &db, "--store", &store, "restore", "--file", "/nonexistent/nope.json",
            "--yes",
        ])
        .assert()
        .failure();
}

#[test]
fn test_compressed_backup_round_trip() {
    let db = setup_test_db("bak_zip");
    let store = setup_test_store("bak_zip");
    init_store_with_data(&db, &store);

    let out = temp_out("bak_zip", "json");
    rhb()
        .args([
            "--db", &db, "--store", &store, "backup", "--file", &out, "--compress",
        ])
        .assert()
        .success()
        .stdout(contains("Compressed backup"));

    let zip_path = Path::new(&out).with_extension("zip");
    assert!(zip_path.exists(), "zip archive must exist");
    assert!(!Path::new(&out).exists(), "plain file is removed after compression");

    let db2 = setup_test_db("bak_zip_dst");
    let store2 = setup_test_store("bak_zip_dst");
    rhb()
        .args(["--db", &db2, "--store", &store2, "--test", "init"])
        .assert()
        .success();

    rhb()
        .args([
            "--db",
            &db2,
            "--store",
            &store2,
            "restore",
            "--file",
            &zip_path.to_string_lossy(),
            "--yes",
        ])
        .assert()
        .success();

    rhb()
        .args(["--db", &db2, "--store", &store2, "list"])
        .assert()
        .success()
        .stdout(contains("2025-09-01"));
}

#[test]
fn test_backup_preserves_categories_across_restore() {
    let db = setup_test_db("bak_categories");
    let store = setup_test_store("bak_categories");
    init_store_with_data(&db, &store);

    // "cleaning" and "repairs" were self-registered by the adds
    let out = temp_out("bak_categories", "json");
    rhb()
        .args(["--db", &db, "--store", &store, "backup", "--file", &out])
        .assert()
        .success();

    let db2 = setup_test_db("bak_categories_dst");
    let store2 = setup_test_store("bak_categories_dst");
    rhb()
        .args(["--db", &db2, "--store", &store2, "restore", "--file", &out, "--yes"])
        .assert()
        .success();

    rhb()
        .args(["--db", &db2, "--store", &store2, "category", "task", "list"])
        .assert()
        .success()
        .stdout(contains("cleaning").and(contains("repairs")));
}
