use chrono::{Duration, Local};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use rhousebook::core::events::EventBus;
use rhousebook::core::timer::{TimerLogic, TimerPhase};
use rhousebook::errors::AppError;
use rhousebook::models::person::Person;

mod common;
use common::{open_test_engine, rhb, setup_test_db, setup_test_store};

#[test]
fn test_pause_excluded_from_worked_minutes() {
    let db = setup_test_db("timer_pause_excl");
    let store = setup_test_store("timer_pause_excl");
    let mut engine = open_test_engine(&db, &store);
    let bus = EventBus::new();

    let t0 = Local::now();
    TimerLogic::start(&mut engine, &bus, Person::Maru, Some("cleaning"), t0).expect("start");
    TimerLogic::pause(&mut engine, &bus, t0 + Duration::minutes(5)).expect("pause");
    TimerLogic::start(&mut engine, &bus, Person::Maru, None, t0 + Duration::minutes(7))
        .expect("resume");
    let log = TimerLogic::stop(&mut engine, &bus, "", t0 + Duration::minutes(10))
        .expect("stop")
        .expect("recorded");

    // 5 running + 2 paused + 3 running -> 8 worked minutes
    assert_eq!(log.worked, 8);
    assert_eq!(log.break_min, 0);
    assert_eq!(log.activity, "cleaning");
    assert_eq!(log.person, Person::Maru);
    assert!((log.earnings - (8.0 / 60.0) * 275.0).abs() < 1e-9);

    // the timer is reset after stop
    let status = TimerLogic::status(&engine, t0 + Duration::minutes(11)).expect("status");
    assert_eq!(status.phase, TimerPhase::Idle);
}

#[test]
fn test_resume_shifts_start_by_pause_length() {
    let db = setup_test_db("timer_resume_shift");
    let store = setup_test_store("timer_resume_shift");
    let mut engine = open_test_engine(&db, &store);
    let bus = EventBus::new();

    let t0 = Local::now();
    TimerLogic::start(&mut engine, &bus, Person::Marty, Some("repairs"), t0).expect("start");
    TimerLogic::pause(&mut engine, &bus, t0 + Duration::minutes(4)).expect("pause");
    let data = TimerLogic::start(&mut engine, &bus, Person::Marty, None, t0 + Duration::minutes(9))
        .expect("resume");

    assert_eq!(data.start_time, Some(t0.timestamp_millis() + 5 * 60_000));
    assert_eq!(data.pause_time, None);
    assert!(data.is_running);
}

#[test]
fn test_stop_without_start_records_nothing() {
    let db = setup_test_db("timer_stop_idle");
    let store = setup_test_store("timer_stop_idle");
    let mut engine = open_test_engine(&db, &store);
    let bus = EventBus::new();

    let recorded = TimerLogic::stop(&mut engine, &bus, "", Local::now()).expect("stop");
    assert!(recorded.is_none());
}

#[test]
fn test_start_requires_activity_when_idle() {
    let db = setup_test_db("timer_needs_activity");
    let store = setup_test_store("timer_needs_activity");
    let mut engine = open_test_engine(&db, &store);
    let bus = EventBus::new();

    let err = TimerLogic::start(&mut engine, &bus, Person::Maru, None, Local::now()).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err =
        TimerLogic::start(&mut engine, &bus, Person::Maru, Some("  "), Local::now()).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn test_start_while_running_changes_nothing() {
    let db = setup_test_db("timer_double_start");
    let store = setup_test_store("timer_double_start");
    let mut engine = open_test_engine(&db, &store);
    let bus = EventBus::new();

    let t0 = Local::now();
    let first = TimerLogic::start(&mut engine, &bus, Person::Maru, Some("cleaning"), t0)
        .expect("start");
    let second = TimerLogic::start(
        &mut engine,
        &bus,
        Person::Marty,
        Some("other"),
        t0 + Duration::minutes(2),
    )
    .expect("second start");

    assert_eq!(second.start_time, first.start_time);
    assert_eq!(second.activity, "cleaning");
    assert_eq!(second.person, Some(Person::Maru));
}

#[test]
fn test_status_freezes_elapsed_while_paused() {
    let db = setup_test_db("timer_status_paused");
    let store = setup_test_store("timer_status_paused");
    let mut engine = open_test_engine(&db, &store);
    let bus = EventBus::new();

    let t0 = Local::now();
    TimerLogic::start(&mut engine, &bus, Person::Maru, Some("cleaning"), t0).expect("start");

    let status = TimerLogic::status(&engine, t0 + Duration::minutes(3)).expect("running status");
    assert_eq!(status.phase, TimerPhase::Running);
    assert_eq!(status.elapsed_ms, 3 * 60_000);

    TimerLogic::pause(&mut engine, &bus, t0 + Duration::minutes(5)).expect("pause");

    // elapsed stays at the pause point no matter how late status is read
    let status = TimerLogic::status(&engine, t0 + Duration::minutes(45)).expect("paused status");
    assert_eq!(status.phase, TimerPhase::Paused);
    assert_eq!(status.elapsed_ms, 5 * 60_000);
}

#[test]
fn test_pause_when_not_running_is_noop() {
    let db = setup_test_db("timer_pause_idle");
    let store = setup_test_store("timer_pause_idle");
    let mut engine = open_test_engine(&db, &store);
    let bus = EventBus::new();

    let data = TimerLogic::pause(&mut engine, &bus, Local::now()).expect("pause on idle");
    assert!(data.start_time.is_none());
    assert!(!data.is_running);
}

#[test]
fn test_timer_cli_status_and_stop() {
    let db = setup_test_db("timer_cli");
    let store = setup_test_store("timer_cli");

    rhb()
        .args(["--db", &db, "--store", &store, "--test", "init"])
        .assert()
        .success();

    rhb()
        .args(["--db", &db, "--store", &store, "timer", "status"])
        .assert()
        .success()
        .stdout(contains("idle"));

    rhb()
        .args([
            "--db", &db, "--store", &store, "timer", "start", "--person", "maru", "--activity",
            "cleaning",
        ])
        .assert()
        .success()
        .stdout(contains("Timer running"));

    rhb()
        .args(["--db", &db, "--store", &store, "timer", "status"])
        .assert()
        .success()
        .stdout(contains("running").and(contains("cleaning")));

    rhb()
        .args(["--db", &db, "--store", &store, "timer", "stop"])
        .assert()
        .success()
        .stdout(contains("Timer stopped"));

    rhb()
        .args(["--db", &db, "--store", &store, "timer", "status"])
        .assert()
        .success()
        .stdout(contains("idle"));
}

#[test]
fn test_timer_watch_exits_when_not_running() {
    let db = setup_test_db("timer_watch_idle");
    let store = setup_test_store("timer_watch_idle");

    rhb()
        .args(["--db", &db, "--store", &store, "--test", "init"])
        .assert()
        .success();

    // with no running timer the watch loop must return immediately
    rhb()
        .args(["--db", &db, "--store", &store, "timer", "status", "--watch"])
        .assert()
        .success()
        .stdout(contains("idle"));
}
