use rhousebook::core::events::{DomainEvent, EventBus};
use rhousebook::core::work::WorkLogLogic;
use rhousebook::errors::AppError;
use rhousebook::models::debt::Debt;
use rhousebook::models::person::Person;
use rhousebook::models::work_log::WorkLog;
use rhousebook::store::StorageEngine;
use std::cell::RefCell;
use std::fs;
use std::rc::Rc;

mod common;
use common::{open_test_engine, rhb, setup_test_db, setup_test_store, test_config};

fn sample_log(id: &str, date: &str) -> WorkLog {
    WorkLog {
        id: id.to_string(),
        person: Person::Maru,
        date: date.to_string(),
        start: "09:00".to_string(),
        end: "14:00".to_string(),
        break_min: 0,
        worked: 300,
        earnings: 1375.0,
        deduction: 1375.0 / 3.0,
        activity: "cleaning".to_string(),
        note: String::new(),
    }
}

#[test]
fn test_add_get_roundtrip_sqlite() {
    let db = setup_test_db("roundtrip");
    let store = setup_test_store("roundtrip");
    let mut engine = open_test_engine(&db, &store);

    engine.add(&sample_log("w1", "2025-09-01")).expect("add");

    let loaded: WorkLog = engine.get("w1").expect("get").expect("present");
    assert_eq!(loaded.person, Person::Maru);
    assert_eq!(loaded.worked, 300);
    assert_eq!(loaded.earnings, 1375.0);

    // a second engine reads the same data from disk
    let mut fresh = open_test_engine(&db, &store);
    let all: Vec<WorkLog> = fresh.get_all().expect("get_all");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, "w1");
}

#[test]
fn test_put_replaces_existing_record() {
    let db = setup_test_db("put_replace");
    let store = setup_test_store("put_replace");
    let mut engine = open_test_engine(&db, &store);

    engine.add(&sample_log("w1", "2025-09-01")).expect("add");

    let mut edited = sample_log("w1", "2025-09-02");
    edited.activity = "gardening".to_string();
    engine.put(&edited).expect("put");

    let all: Vec<WorkLog> = engine.get_all().expect("get_all");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].date, "2025-09-02");
    assert_eq!(all[0].activity, "gardening");
}

#[test]
fn test_duplicate_id_rejected_on_sqlite() {
    let db = setup_test_db("dup_sqlite");
    let store = setup_test_store("dup_sqlite");
    let mut engine = open_test_engine(&db, &store);

    engine.add(&sample_log("w1", "2025-09-01")).expect("first add");
    let err = engine.add(&sample_log("w1", "2025-09-02")).unwrap_err();
    assert!(matches!(err, AppError::DuplicateKey(_)));

    // the original record is untouched
    let loaded: WorkLog = engine.get("w1").expect("get").expect("present");
    assert_eq!(loaded.date, "2025-09-01");
}

#[test]
fn test_delete_is_idempotent() {
    let db = setup_test_db("del_idem");
    let store = setup_test_store("del_idem");
    let mut engine = open_test_engine(&db, &store);

    engine.add(&sample_log("w1", "2025-09-01")).expect("add");
    engine.delete::<WorkLog>("w1").expect("first delete");
    engine.delete::<WorkLog>("w1").expect("second delete is a no-op");
    engine.delete::<WorkLog>("never-existed").expect("absent id is a no-op");

    let all: Vec<WorkLog> = engine.get_all().expect("get_all");
    assert!(all.is_empty());
}

#[test]
fn test_fallback_switch_when_sqlite_unavailable() {
    // a directory can never be opened as a SQLite database
    let mut dir = std::env::temp_dir();
    dir.push("fallback_switch_rhousebook_dir");
    fs::create_dir_all(&dir).expect("mkdir");
    let store = setup_test_store("fallback_switch");

    let cfg = test_config(&dir.to_string_lossy(), &store);
    let mut engine = StorageEngine::open(&cfg).expect("fallback open");
    assert_eq!(engine.backend_name(), "json");

    engine.add(&sample_log("w1", "2025-09-01")).expect("add on json");
    let err = engine.add(&sample_log("w1", "2025-09-02")).unwrap_err();
    assert!(matches!(err, AppError::DuplicateKey(_)));

    // data survives a reopen of the fallback store
    let mut fresh = StorageEngine::open(&cfg).expect("reopen");
    assert_eq!(fresh.backend_name(), "json");
    let all: Vec<WorkLog> = fresh.get_all().expect("get_all");
    assert_eq!(all.len(), 1);
}

#[test]
fn test_legacy_store_imported_once() {
    let db = setup_test_db("legacy_import");
    let store = setup_test_store("legacy_import");

    let legacy = serde_json::json!({
        "workLogs": [{
            "id": "legacy-1",
            "person": "marty",
            "date": "2025-08-01",
            "start": "10:00",
            "end": "12:00",
            "break": 0,
            "worked": 120,
            "earnings": 800.0,
            "deduction": 400.0,
            "activity": "repairs"
        }],
        "debts": [{
            "id": "legacy-d1",
            "person": "maru",
            "description": "vet bill",
            "amount": 1000.0,
            "currency": "CZK",
            "paid": 0.0
        }],
        "dbMigrated": false
    });
    fs::write(&store, serde_json::to_string(&legacy).unwrap()).expect("write legacy file");

    let mut engine = open_test_engine(&db, &store);
    let logs: Vec<WorkLog> = engine.get_all().expect("logs");
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].id, "legacy-1");
    assert_eq!(logs[0].note, "");
    let debts: Vec<Debt> = engine.get_all().expect("debts");
    assert_eq!(debts.len(), 1);

    // the legacy file is now flagged as migrated
    let content = fs::read_to_string(&store).expect("read back");
    let flagged: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(flagged["dbMigrated"], true);

    // reopening does not import the same records again
    let mut fresh = open_test_engine(&db, &store);
    let logs: Vec<WorkLog> = fresh.get_all().expect("logs");
    assert_eq!(logs.len(), 1);
}

#[test]
fn test_events_published_on_worklog_add() {
    let db = setup_test_db("events_add");
    let store = setup_test_store("events_add");
    let mut engine = open_test_engine(&db, &store);

    let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut bus = EventBus::new();
    bus.subscribe(move |event| {
        if let DomainEvent::WorkLogAdded { id } = event {
            sink.borrow_mut().push(id.clone());
        }
    });

    let log = WorkLogLogic::add(
        &mut engine,
        &bus,
        Person::Maru,
        "2025-09-01",
        "09:00",
        "14:00",
        0,
        "cleaning",
        "",
    )
    .expect("add");

    assert_eq!(seen.borrow().as_slice(), [log.id.clone()]);
}

#[test]
fn test_settings_seeded_on_open() {
    let db = setup_test_db("seeded");
    let store = setup_test_store("seeded");
    let engine = open_test_engine(&db, &store);

    let rent = engine.rent_settings().expect("rent");
    assert_eq!(rent.day, 1);

    let state = engine.timer_state().expect("timer");
    assert!(state.data.start_time.is_none());
    assert!(!state.data.is_running);
}

#[test]
fn test_oplog_records_operations() {
    let db = setup_test_db("oplog_rows");
    let store = setup_test_store("oplog_rows");
    let mut engine = open_test_engine(&db, &store);

    let bus = EventBus::new();
    WorkLogLogic::add(
        &mut engine,
        &bus,
        Person::Marty,
        "2025-09-01",
        "10:00",
        "12:00",
        0,
        "repairs",
        "",
    )
    .expect("add");

    let entries = engine.log_entries().expect("entries");
    assert!(entries.iter().any(|e| e.operation == "add" && e.target == "worklog"));
    assert!(entries.iter().all(|e| !e.date.is_empty()));
}

#[test]
fn test_log_print_via_cli() {
    let db = setup_test_db("log_cli");
    let store = setup_test_store("log_cli");
    common::init_store_with_data(&db, &store);

    rhb()
        .args(["--db", &db, "--store", &store, "log", "--print"])
        .assert()
        .success()
        .stdout(predicates::str::contains("add"));
}
