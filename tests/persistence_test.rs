use assert_cmd::cargo_bin;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn vehitax(db_path: &Path, args: &[&str]) -> Output {
    Command::new(cargo_bin!("vehitax"))
        .arg("--db-path")
        .arg(db_path)
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn pay(db_path: &Path, plate: &str, vehicle_type: &str, months_late: &str) -> Output {
    vehitax(
        db_path,
        &[
            "pay",
            "--plate",
            plate,
            "--vehicle-type",
            vehicle_type,
            "--bbnkb",
            "150000",
            "--pajak-pokok",
            "300000",
            "--opsen",
            "50000",
            "--swdkllj",
            "35000",
            "--months-late",
            months_late,
            "--tendered",
            "1000000",
        ],
    )
}

#[test]
fn test_ledger_survives_between_runs() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("pajak.db");

    // 1. First run records one payment
    assert!(pay(&db_path, "B 1 AA", "Mobil", "0").status.success());

    // 2. Second run records another against the same file
    assert!(pay(&db_path, "D 2 BB", "Motor", "3").status.success());

    let history = vehitax(&db_path, &["history", "--format", "csv"]);
    assert!(history.status.success());
    let stdout = String::from_utf8_lossy(&history.stdout);

    assert!(stdout.starts_with("id,paid_at,plate,vehicle_type,total"));
    assert!(stdout.contains("B 1 AA,Mobil,535000"));
    assert!(stdout.contains("D 2 BB,Motor,553000"));
}

#[test]
fn test_receipt_can_be_reprinted_and_exported() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("pajak.db");
    let export = dir.path().join("receipt-1.txt");

    assert!(pay(&db_path, "B 1 AA", "Mobil", "3").status.success());

    let output = vehitax(
        &db_path,
        &["receipt", "1", "--export", export.to_str().unwrap()],
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Receipt No   : 1"));
    assert!(stdout.contains("CHANGE       : Rp 447000"));

    let exported = std::fs::read_to_string(&export).unwrap();
    assert_eq!(exported, stdout);
}

#[test]
fn test_stats_by_type_and_year() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("pajak.db");

    assert!(pay(&db_path, "B 1", "Mobil", "0").status.success());
    assert!(pay(&db_path, "B 2", "Mobil", "0").status.success());
    assert!(pay(&db_path, "B 3", "Motor", "0").status.success());

    let by_type = vehitax(&db_path, &["stats", "--by", "type", "--format", "csv"]);
    assert!(by_type.status.success());
    assert_eq!(
        String::from_utf8_lossy(&by_type.stdout),
        "vehicle_type,count\nMobil,2\nMotor,1\n"
    );

    let by_year = vehitax(&db_path, &["stats", "--format", "json"]);
    assert!(by_year.status.success());
    let report: serde_json::Value = serde_json::from_slice(&by_year.stdout).unwrap();
    assert_eq!(report["totals"].as_array().unwrap().len(), 1);
    assert_eq!(report["totals"][0]["total"], "1605000");
    assert_eq!(report["trend"]["direction"], "insufficient_data");
}
