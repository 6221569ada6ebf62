use crate::domain::ledger::{LedgerEntry, NewLedgerEntry, RecordId};
use crate::domain::money::Money;
use crate::domain::ports::TransactionLedger;
use crate::domain::statistics::YearlyTotal;
use crate::error::Result;
use async_trait::async_trait;
use chrono::Datelike;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory ledger.
///
/// Uses `Arc<RwLock<Vec<LedgerEntry>>>`; ids are assigned sequentially from 1.
/// Nothing survives the process, so it backs tests and `--in-memory` runs.
#[derive(Default, Clone)]
pub struct InMemoryLedger {
    entries: Arc<RwLock<Vec<LedgerEntry>>>,
}

impl InMemoryLedger {
    /// Creates a new, empty in-memory ledger.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionLedger for InMemoryLedger {
    async fn append(&self, entry: NewLedgerEntry) -> Result<RecordId> {
        let mut entries = self.entries.write().await;
        let id = RecordId(entries.len() as i64 + 1);
        entries.push(entry.into_entry(id));
        Ok(id)
    }

    async fn find(&self, id: RecordId) -> Result<Option<LedgerEntry>> {
        let entries = self.entries.read().await;
        Ok(entries.iter().find(|e| e.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<LedgerEntry>> {
        let entries = self.entries.read().await;
        let mut all = entries.clone();
        all.sort_by(|a, b| b.paid_at.cmp(&a.paid_at).then(b.id.cmp(&a.id)));
        Ok(all)
    }

    async fn aggregate_by_year(&self) -> Result<Vec<YearlyTotal>> {
        let entries = self.entries.read().await;
        let mut years: BTreeMap<i32, Money> = BTreeMap::new();
        for entry in entries.iter() {
            *years.entry(entry.paid_at.year()).or_default() += entry.total;
        }
        Ok(years
            .into_iter()
            .map(|(year, total)| YearlyTotal { year, total })
            .collect())
    }

    async fn aggregate_by_type(&self) -> Result<BTreeMap<String, u64>> {
        let entries = self.entries.read().await;
        let mut counts = BTreeMap::new();
        for entry in entries.iter() {
            *counts.entry(entry.vehicle_type.clone()).or_insert(0) += 1;
        }
        Ok(counts)
    }
}
