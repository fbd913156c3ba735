#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rhousebook::config::Config;
use rhousebook::store::StorageEngine;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rhb() -> Command {
    cargo_bin_cmd!("rhousebook")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rhousebook.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a unique JSON fallback store path inside the system temp dir
pub fn setup_test_store(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rhousebook.json", name));
    let store_path = path.to_string_lossy().to_string();
    fs::remove_file(&store_path).ok();
    store_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Config pointing at the given store files, with maru as default person
pub fn test_config(db_path: &str, store_path: &str) -> Config {
    Config {
        database: db_path.to_string(),
        fallback: store_path.to_string(),
        default_person: Some("maru".to_string()),
        default_currency: "CZK".to_string(),
    }
}

/// Open a storage engine directly against the given test paths
pub fn open_test_engine(db_path: &str, store_path: &str) -> StorageEngine {
    StorageEngine::open(&test_config(db_path, store_path)).expect("open engine")
}

/// Initialize the store and add a small dataset useful for many tests.
/// Both paths are pinned so nothing leaks in from a real user setup.
pub fn init_store_with_data(db_path: &str, store_path: &str) {
    rhb()
        .args(["--db", db_path, "--store", store_path, "--test", "init"])
        .assert()
        .success();

    rhb()
        .args([
            "--db", db_path, "--store", store_path, "add", "2025-09-01", "--person", "maru",
            "--in", "09:00", "--out", "14:00", "--activity", "cleaning",
        ])
        .assert()
        .success();

    rhb()
        .args([
            "--db", db_path, "--store", store_path, "add", "2025-09-15", "--person", "marty",
            "--in", "10:00", "--out", "12:00", "--activity", "repairs",
        ])
        .assert()
        .success();
}
