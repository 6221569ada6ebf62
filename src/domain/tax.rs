use super::money::Money;
use super::vehicle::VehicleTaxRecord;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Late-payment penalty charged per month, as a fraction of the base tax.
pub const PENALTY_RATE_PER_MONTH: Decimal = dec!(0.02);

/// Penalty and total owed for one vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxAssessment {
    pub penalty: Money,
    pub total: Money,
}

/// Derives the penalty and total due for a [`VehicleTaxRecord`].
///
/// Stateless; every method is a pure function of the record.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaxCalculator;

impl TaxCalculator {
    pub fn new() -> Self {
        Self
    }

    /// 2% of the base tax for every month late, uncapped.
    pub fn penalty(&self, record: &VehicleTaxRecord) -> Money {
        let months = Decimal::from(record.months_late());
        Money::new(PENALTY_RATE_PER_MONTH * record.fees().pajak_pokok.value() * months)
    }

    /// Sum of the four fee components plus the penalty.
    pub fn total(&self, record: &VehicleTaxRecord) -> Money {
        record.fees().sum() + self.penalty(record)
    }

    pub fn assess(&self, record: &VehicleTaxRecord) -> TaxAssessment {
        TaxAssessment {
            penalty: self.penalty(record),
            total: self.total(record),
        }
    }
}
