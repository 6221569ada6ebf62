use super::money::Money;
use super::settlement::SettlementResult;
use super::vehicle::VehicleTaxRecord;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

/// Format used for every persisted and displayed payment timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A settled payment about to be appended to the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLedgerEntry {
    pub plate: String,
    pub vehicle_type: String,
    pub total: Money,
    pub penalty: Money,
    pub change: Money,
    pub paid_at: NaiveDateTime,
}

impl NewLedgerEntry {
    pub fn from_settlement(
        record: &VehicleTaxRecord,
        settlement: &SettlementResult,
        paid_at: NaiveDateTime,
    ) -> Self {
        Self {
            plate: record.plate().to_string(),
            vehicle_type: record.vehicle_type().to_string(),
            total: settlement.total,
            penalty: settlement.penalty,
            change: settlement.change,
            paid_at,
        }
    }

    pub fn into_entry(self, id: RecordId) -> LedgerEntry {
        LedgerEntry {
            id,
            plate: self.plate,
            vehicle_type: self.vehicle_type,
            total: self.total,
            penalty: self.penalty,
            change: self.change,
            paid_at: self.paid_at,
        }
    }
}

/// A payment as stored in the ledger, and the source of its receipt.
/// Entries are never edited or removed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerEntry {
    pub id: RecordId,
    pub plate: String,
    pub vehicle_type: String,
    pub total: Money,
    pub penalty: Money,
    pub change: Money,
    pub paid_at: NaiveDateTime,
}
