use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

mod common;

#[test]
fn test_malformed_rows_are_skipped() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", common::HEADER.join(",")).unwrap();
    // Valid payment
    writeln!(file, "B 1,Mobil,150000,300000,50000,35000,0,535000").unwrap();
    // Text in a fee column
    writeln!(file, "B 2,Mobil,150000,lots,50000,35000,0,535000").unwrap();
    // Empty plate
    writeln!(file, ",Mobil,150000,300000,50000,35000,0,535000").unwrap();
    // Not enough money
    writeln!(file, "B 3,Mobil,150000,300000,50000,35000,3,535000").unwrap();
    // Valid payment again
    writeln!(file, "B 4,Motor,0,100000,10000,35000,0,200000").unwrap();

    let mut cmd = Command::new(cargo_bin!("vehitax"));
    cmd.arg("--in-memory").arg("import").arg(file.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Rejected payment on row 2"))
        .stderr(predicate::str::contains("Invalid pajak_pokok"))
        .stderr(predicate::str::contains("Invalid plate"))
        .stderr(predicate::str::contains("Insufficient funds"))
        .stdout(predicate::str::contains("Imported 2 payments, rejected 3"));
}

#[test]
fn test_generated_batch_imports_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("batch.csv");
    let db_path = dir.path().join("pajak.db");
    common::generate_random_csv(&csv_path, 50).unwrap();

    let mut import = Command::new(cargo_bin!("vehitax"));
    import.arg("--db-path").arg(&db_path).arg("import").arg(&csv_path);
    import
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 50 payments, rejected 0"));

    let output = Command::new(cargo_bin!("vehitax"))
        .arg("--db-path")
        .arg(&db_path)
        .args(["history", "--format", "csv"])
        .output()
        .unwrap();
    // Header + 50 rows
    assert_eq!(String::from_utf8_lossy(&output.stdout).lines().count(), 51);
}

#[test]
fn test_missing_input_file() {
    let mut cmd = Command::new(cargo_bin!("vehitax"));
    cmd.args(["--in-memory", "import", "does-not-exist.csv"]);

    cmd.assert().failure();
}

#[test]
fn test_oversized_amounts_reject_only_their_row() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("huge.csv");
    let db_path = dir.path().join("pajak.db");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "{}", common::HEADER.join(",")).unwrap();
    writeln!(file, "B 1,Mobil,150000,300000,50000,35000,0,535000").unwrap();
    writeln!(
        file,
        "B 2,Mobil,150000,79228162514264337593543950335,50000,35000,1000,1"
    )
    .unwrap();
    writeln!(
        file,
        "B 3,Mobil,79228162514264337593543950335,300000,50000,35000,0,1"
    )
    .unwrap();
    writeln!(file, "B 4,Mobil,150000,300000,50000,35000,99999,535000").unwrap();
    writeln!(file, "B 5,Motor,0,100000,10000,35000,0,200000").unwrap();
    drop(file);

    let mut cmd = Command::new(cargo_bin!("vehitax"));
    cmd.arg("--db-path").arg(&db_path).arg("import").arg(&csv_path);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Invalid pajak_pokok"))
        .stderr(predicate::str::contains("Invalid bbnkb"))
        .stderr(predicate::str::contains("Invalid months_late"))
        .stderr(predicate::str::contains("panicked").not())
        .stdout(predicate::str::contains("Imported 2 payments, rejected 3"));

    let output = Command::new(cargo_bin!("vehitax"))
        .arg("--db-path")
        .arg(&db_path)
        .args(["history", "--format", "csv"])
        .output()
        .unwrap();
    let history = String::from_utf8_lossy(&output.stdout);
    assert_eq!(history.lines().count(), 3);
    assert!(history.contains("B 1"));
    assert!(history.contains("B 5"));
}
