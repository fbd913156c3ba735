use predicates::str::contains;
use rhousebook::export::WorkLogExport;
use rhousebook::models::debt::Debt;
use rhousebook::models::person::Person;
use rhousebook::models::work_log::WorkLog;
use std::fs;
use std::path::Path;

mod common;
use common::{
    init_store_with_data, open_test_engine, rhb, setup_test_db, setup_test_store, temp_out,
};

#[test]
fn test_export_worklogs_csv_with_bom() {
    let db = setup_test_db("exp_wl_csv");
    let store = setup_test_store("exp_wl_csv");
    init_store_with_data(&db, &store);
    let out = temp_out("exp_wl_csv", "csv");

    rhb()
        .args([
            "--db", &db, "--store", &store, "export", "--what", "worklogs", "--format", "csv",
            "--file", &out,
        ])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let bytes = fs::read(&out).expect("read export");
    assert_eq!(&bytes[..3], [0xEF, 0xBB, 0xBF], "file must start with a UTF-8 BOM");

    let content = String::from_utf8(bytes).expect("utf8");
    let header = content.trim_start_matches('\u{feff}').lines().next().expect("header");
    assert_eq!(
        header,
        "id,person,date,start,end,break,worked,earnings,deduction,activity,note"
    );
    // person and date columns are rendered in display form
    assert!(content.contains("Maru"));
    assert!(content.contains("1.9.2025"));
    assert!(content.contains("Marty"));
    assert!(content.contains("15.9.2025"));
}

#[test]
fn test_export_csv_quotes_embedded_commas_and_quotes() {
    let db = setup_test_db("exp_quotes");
    let store = setup_test_store("exp_quotes");

    rhb()
        .args(["--db", &db, "--store", &store, "--test", "init"])
        .assert()
        .success();

    rhb()
        .args([
            "--db", &db, "--store", &store, "finance", "add", "--kind", "expense",
            "--description", "tools, \"heavy\" duty", "--amount", "250", "--date", "2025-09-08",
            "--category", "hardware",
        ])
        .assert()
        .success();

    let out = temp_out("exp_quotes", "csv");
    rhb()
        .args([
            "--db", &db, "--store", &store, "export", "--what", "finances", "--format", "csv",
            "--file", &out,
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read export");
    // embedded commas and quotes are quoted, quotes doubled
    assert!(content.contains("\"tools, \"\"heavy\"\" duty\""));
}

#[test]
fn test_export_finances_json_round_trips() {
    let db = setup_test_db("exp_fin_json");
    let store = setup_test_store("exp_fin_json");

    rhb()
        .args(["--db", &db, "--store", &store, "--test", "init"])
        .assert()
        .success();

    rhb()
        .args([
            "--db", &db, "--store", &store, "finance", "add", "--kind", "income",
            "--description", "salary", "--amount", "12000", "--date", "2025-09-05",
            "--category", "wages", "--person", "marty",
        ])
        .assert()
        .success();

    let out = temp_out("exp_fin_json", "json");
    rhb()
        .args([
            "--db", &db, "--store", &store, "export", "--what", "finances", "--format", "json",
            "--file", &out,
        ])
        .assert()
        .success()
        .stdout(contains("JSON export completed"));

    let content = fs::read_to_string(&out).expect("read export");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = rows.as_array().expect("array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["type"], "income");
    assert_eq!(rows[0]["description"], "salary");
    assert_eq!(rows[0]["amount"], 12000.0);
    assert_eq!(rows[0]["person"], "Marty");
    assert_eq!(rows[0]["date"], "5.9.2025");
}

#[test]
fn test_export_deductions_summary() {
    let db = setup_test_db("exp_deductions");
    let store = setup_test_store("exp_deductions");
    init_store_with_data(&db, &store);

    let out = temp_out("exp_deductions", "json");
    rhb()
        .args([
            "--db", &db, "--store", &store, "export", "--what", "deductions", "--format",
            "json", "--file", &out,
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read export");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = rows.as_array().expect("array");
    // one row per person for 2025-09
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r["month"] == "2025-09"));

    let maru = rows.iter().find(|r| r["person"] == "maru").expect("maru row");
    assert_eq!(maru["worked_minutes"], 300);
    assert_eq!(maru["earnings"], 1375.0);
}

#[test]
fn test_export_person_filter() {
    let db = setup_test_db("exp_person");
    let store = setup_test_store("exp_person");
    init_store_with_data(&db, &store);

    let out = temp_out("exp_person", "csv");
    rhb()
        .args([
            "--db", &db, "--store", &store, "export", "--what", "worklogs", "--format", "csv",
            "--file", &out, "--person", "marty",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read export");
    assert!(content.contains("Marty"));
    assert!(!content.contains("Maru"));
}

#[test]
fn test_export_debts_includes_remaining() {
    let db = setup_test_db("exp_debts");
    let store = setup_test_store("exp_debts");

    rhb()
        .args(["--db", &db, "--store", &store, "--test", "init"])
        .assert()
        .success();

    rhb()
        .args([
            "--db", &db, "--store", &store, "debt", "add", "--person", "maru",
            "--description", "washing machine", "--amount", "1000",
        ])
        .assert()
        .success();

    let mut engine = open_test_engine(&db, &store);
    let debts: Vec<Debt> = engine.get_all().expect("debts");
    let debt_id = debts[0].id.clone();
    drop(engine);

    rhb()
        .args([
            "--db", &db, "--store", &store, "payment", "add", "--debt", &debt_id, "--amount",
            "300",
        ])
        .assert()
        .success();

    let out = temp_out("exp_debts", "csv");
    rhb()
        .args([
            "--db", &db, "--store", &store, "export", "--what", "debts", "--format", "csv",
            "--file", &out,
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read export");
    let header = content.trim_start_matches('\u{feff}').lines().next().expect("header");
    assert_eq!(header, "id,person,description,amount,currency,paid,remaining");
    assert!(content.contains("Maru"));
    assert!(content.contains("700.0"));
}

#[test]
fn test_export_force_overwrites_existing_file() {
    let db = setup_test_db("exp_force");
    let store = setup_test_store("exp_force");
    init_store_with_data(&db, &store);

    let out = temp_out("exp_force", "csv");
    fs::write(&out, "old contents").expect("seed file");

    // without --force and with empty stdin the prompt is declined
    rhb()
        .args([
            "--db", &db, "--store", &store, "export", "--what", "worklogs", "--format", "csv",
            "--file", &out,
        ])
        .assert()
        .failure();
    assert_eq!(fs::read_to_string(&out).expect("read"), "old contents");

    rhb()
        .args([
            "--db", &db, "--store", &store, "export", "--what", "worklogs", "--format", "csv",
            "--file", &out, "--force",
        ])
        .assert()
        .success();
    assert!(fs::read_to_string(&out).expect("read").contains("1.9.2025"));
}

#[test]
fn test_worklog_export_row_display_mapping() {
    let log = WorkLog {
        id: "wl-1".to_string(),
        person: Person::Maru,
        date: "2025-09-01".to_string(),
        start: "09:00".to_string(),
        end: "14:00".to_string(),
        break_min: 0,
        worked: 300,
        earnings: 1375.0,
        deduction: 0.0,
        activity: "cleaning".to_string(),
        note: String::new(),
    };

    let row = WorkLogExport::from(&log);
    assert_eq!(row.person, "Maru");
    assert_eq!(row.date, "1.9.2025");
    // a stored zero predates the deduction field and is recomputed at 1/3
    assert!((row.deduction - 1375.0 / 3.0).abs() < 1e-6);
    assert_eq!(row.worked, 300);
}

#[test]
fn test_export_empty_store_writes_nothing() {
    let db = setup_test_db("exp_empty");
    let store = setup_test_store("exp_empty");

    rhb()
        .args(["--db", &db, "--store", &store, "--test", "init"])
        .assert()
        .success();

    let out = temp_out("exp_empty", "csv");
    rhb()
        .args([
            "--db", &db, "--store", &store, "export", "--what", "debts", "--format", "csv",
            "--file", &out,
        ])
        .assert()
        .success()
        .stdout(contains("No debts found"));

    assert!(!Path::new(&out).exists());
}
