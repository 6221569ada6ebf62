use super::ledger::{LedgerEntry, NewLedgerEntry, RecordId};
use super::statistics::YearlyTotal;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Append-only store of settled payments.
#[async_trait]
pub trait TransactionLedger: Send + Sync {
    async fn append(&self, entry: NewLedgerEntry) -> Result<RecordId>;
    async fn find(&self, id: RecordId) -> Result<Option<LedgerEntry>>;
    /// Every entry, newest first. Entries sharing a timestamp are ordered by
    /// descending id.
    async fn list_all(&self) -> Result<Vec<LedgerEntry>>;
    /// Sum of totals per calendar year, oldest year first.
    async fn aggregate_by_year(&self) -> Result<Vec<YearlyTotal>>;
    /// Number of payments per vehicle type.
    async fn aggregate_by_type(&self) -> Result<BTreeMap<String, u64>>;
}

pub type LedgerBox = Box<dyn TransactionLedger>;
