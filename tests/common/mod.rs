#![allow(dead_code)]

use rand::Rng;
use std::fs::File;
use std::io::Error;
use std::path::Path;

pub const HEADER: [&str; 8] = [
    "plate",
    "vehicle_type",
    "bbnkb",
    "pajak_pokok",
    "opsen",
    "swdkllj",
    "months_late",
    "tendered",
];

const VEHICLE_TYPES: [&str; 3] = ["Mobil", "Motor", "Truk"];

/// Writes `rows` identical on-time payments that are always accepted.
pub fn generate_csv(path: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(HEADER)?;

    for i in 1..=rows {
        wtr.write_record([
            format!("B {i} TST").as_str(),
            "Mobil",
            "150000",
            "300000",
            "50000",
            "35000",
            "0",
            "535000",
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes `rows` payments with random vehicle types and lateness. Every row
/// tenders enough to cover the worst case, so all of them settle.
pub fn generate_random_csv(path: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    wtr.write_record(HEADER)?;

    let mut rng = rand::thread_rng();
    for i in 1..=rows {
        let vehicle_type = VEHICLE_TYPES[rng.gen_range(0..VEHICLE_TYPES.len())];
        let months_late = rng.gen_range(0..=24u32).to_string();
        wtr.write_record([
            format!("R {i}").as_str(),
            vehicle_type,
            "150000",
            "300000",
            "50000",
            "35000",
            months_late.as_str(),
            "1000000",
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
