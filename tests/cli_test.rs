use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

const VEHICLE: [&str; 12] = [
    "--plate",
    "B 1234 XYZ",
    "--vehicle-type",
    "Mobil",
    "--bbnkb",
    "150000",
    "--pajak-pokok",
    "300000",
    "--opsen",
    "50000",
    "--swdkllj",
    "35000",
];

#[test]
fn test_quote_prints_penalty_and_total() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("vehitax"));
    cmd.arg("quote").args(VEHICLE).args(["--months-late", "3"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("PENALTY      : Rp 18000"))
        .stdout(predicate::str::contains("TOTAL DUE    : Rp 553000"));

    Ok(())
}

#[test]
fn test_quote_defaults_to_on_time() {
    let mut cmd = Command::new(cargo_bin!("vehitax"));
    cmd.arg("quote").args(VEHICLE);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("PENALTY      : Rp 0"))
        .stdout(predicate::str::contains("TOTAL DUE    : Rp 535000"));
}

#[test]
fn test_pay_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("pajak.db");

    let mut cmd = Command::new(cargo_bin!("vehitax"));
    cmd.arg("--db-path")
        .arg(&db_path)
        .arg("pay")
        .args(VEHICLE)
        .args(["--months-late", "3", "--tendered", "600000"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Plate        : B 1234 XYZ"))
        .stdout(predicate::str::contains("TOTAL TAX    : Rp 553000"))
        .stdout(predicate::str::contains("PENALTY      : Rp 18000"))
        .stdout(predicate::str::contains("CHANGE       : Rp 47000"));

    assert!(db_path.exists());
}

#[test]
fn test_insufficient_funds_fails_and_records_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("pajak.db");

    let mut pay = Command::new(cargo_bin!("vehitax"));
    pay.arg("--db-path")
        .arg(&db_path)
        .arg("pay")
        .args(VEHICLE)
        .args(["--months-late", "3", "--tendered", "500000"]);

    pay.assert()
        .failure()
        .stderr(predicate::str::contains("Insufficient funds: short by Rp 53000"));

    let mut history = Command::new(cargo_bin!("vehitax"));
    history
        .arg("--db-path")
        .arg(&db_path)
        .args(["history", "--format", "csv"]);

    history
        .assert()
        .success()
        .stdout(predicate::str::contains("B 1234 XYZ").not());
}

#[test]
fn test_validation_error_names_field() {
    let mut cmd = Command::new(cargo_bin!("vehitax"));
    cmd.args(["--in-memory", "pay"])
        .args(VEHICLE)
        .args(["--months-late=-2", "--tendered", "600000"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid months_late"));
}

#[test]
fn test_unknown_receipt_fails() {
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = Command::new(cargo_bin!("vehitax"));
    cmd.arg("--db-path")
        .arg(dir.path().join("pajak.db"))
        .args(["receipt", "42"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No payment recorded with id 42"));
}
