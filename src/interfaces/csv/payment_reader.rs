use crate::domain::money::Money;
use crate::domain::vehicle::{VehicleForm, VehicleTaxRecord};
use crate::error::{PaymentError, Result};
use serde::Deserialize;
use std::io::Read;

/// One row of a batch payment file, still unparsed.
///
/// Fields are read as text so that a bad amount surfaces as a
/// `ValidationError` naming the column rather than a generic CSV error.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PaymentRow {
    pub plate: String,
    pub vehicle_type: String,
    pub bbnkb: String,
    pub pajak_pokok: String,
    pub opsen: String,
    pub swdkllj: String,
    pub months_late: String,
    pub tendered: String,
}

impl PaymentRow {
    pub fn into_payment(self) -> Result<(VehicleTaxRecord, Money)> {
        let tendered = Money::parse("tendered", &self.tendered)?;
        let form = VehicleForm {
            plate: self.plate,
            vehicle_type: self.vehicle_type,
            bbnkb: self.bbnkb,
            pajak_pokok: self.pajak_pokok,
            opsen: self.opsen,
            swdkllj: self.swdkllj,
            months_late: self.months_late,
        };
        Ok((VehicleTaxRecord::try_from(&form)?, tendered))
    }
}

/// Reads batch payments from a CSV source.
///
/// Expects the header `plate,vehicle_type,bbnkb,pajak_pokok,opsen,swdkllj,months_late,tendered`.
/// Whitespace around fields is trimmed.
pub struct PaymentReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> PaymentReader<R> {
    /// Creates a new `PaymentReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily yields each row parsed into a record and tendered amount,
    /// together with its 1-based data line number.
    pub fn payments(self) -> impl Iterator<Item = (usize, Result<(VehicleTaxRecord, Money)>)> {
        self.reader
            .into_deserialize::<PaymentRow>()
            .enumerate()
            .map(|(index, row)| {
                let payment = row
                    .map_err(PaymentError::from)
                    .and_then(PaymentRow::into_payment);
                (index + 1, payment)
            })
    }
}
