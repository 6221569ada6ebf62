use crate::domain::ledger::{LedgerEntry, NewLedgerEntry, RecordId};
use crate::domain::money::Money;
use crate::domain::ports::LedgerBox;
use crate::domain::settlement::PaymentSettlement;
use crate::domain::statistics::YearlyReport;
use crate::domain::tax::{TaxAssessment, TaxCalculator};
use crate::domain::vehicle::VehicleTaxRecord;
use crate::error::{PaymentError, Result};
use chrono::{NaiveDateTime, Timelike, Utc};
use std::collections::BTreeMap;
use tracing::{error, info};

/// Entry point for recording vehicle-tax payments.
///
/// `PaymentService` runs the single linear flow "assess, settle, append" and
/// serves the read side (receipts, history, statistics) from the ledger it owns.
pub struct PaymentService {
    calculator: TaxCalculator,
    ledger: LedgerBox,
}

impl PaymentService {
    /// Creates a new `PaymentService` backed by `ledger`.
    pub fn new(ledger: LedgerBox) -> Self {
        Self {
            calculator: TaxCalculator::new(),
            ledger,
        }
    }

    /// Penalty and total due for `record`, without taking payment.
    pub fn quote(&self, record: &VehicleTaxRecord) -> TaxAssessment {
        self.calculator.assess(record)
    }

    /// Settles `tendered` against what `record` owes and records the payment,
    /// stamped with the current UTC time.
    pub async fn process_payment(&self, record: VehicleTaxRecord, tendered: Money) -> Result<LedgerEntry> {
        let now = Utc::now().naive_utc();
        let paid_at = now.with_nanosecond(0).unwrap_or(now);
        self.process_payment_at(record, tendered, paid_at).await
    }

    /// Same as [`process_payment`](Self::process_payment) with a caller-chosen timestamp.
    ///
    /// A rejected payment or a failed append leaves the ledger untouched and
    /// produces no receipt. The returned entry is read back from the ledger,
    /// so a receipt only ever shows what was actually stored.
    pub async fn process_payment_at(
        &self,
        record: VehicleTaxRecord,
        tendered: Money,
        paid_at: NaiveDateTime,
    ) -> Result<LedgerEntry> {
        let assessment = self.calculator.assess(&record);

        let settlement = match PaymentSettlement::settle_assessment(&assessment, tendered) {
            Ok(settlement) => settlement,
            Err(e) => {
                info!(plate = record.plate(), total = %assessment.total, tendered = %tendered, "payment rejected: {e}");
                return Err(e);
            }
        };

        let entry = NewLedgerEntry::from_settlement(&record, &settlement, paid_at);
        let id = match self.ledger.append(entry).await {
            Ok(id) => id,
            Err(e) => {
                error!(plate = record.plate(), "failed to record payment: {e}");
                return Err(e);
            }
        };

        info!(
            id = %id,
            plate = record.plate(),
            total = %settlement.total,
            penalty = %settlement.penalty,
            change = %settlement.change,
            "payment recorded"
        );

        self.ledger.find(id).await?.ok_or_else(|| {
            error!(id = %id, "recorded payment could not be read back");
            PaymentError::InternalError(format!("payment {id} missing after append"))
        })
    }

    /// The stored entry behind a past payment's receipt.
    pub async fn receipt(&self, id: RecordId) -> Result<Option<LedgerEntry>> {
        self.ledger.find(id).await
    }

    /// Like [`receipt`](Self::receipt), failing with `NotFound` for unknown ids.
    pub async fn require_receipt(&self, id: RecordId) -> Result<LedgerEntry> {
        self.receipt(id).await?.ok_or(PaymentError::NotFound(id.0))
    }

    /// All recorded payments, newest first.
    pub async fn history(&self) -> Result<Vec<LedgerEntry>> {
        self.ledger.list_all().await
    }

    pub async fn yearly_report(&self) -> Result<YearlyReport> {
        Ok(YearlyReport::new(self.ledger.aggregate_by_year().await?))
    }

    pub async fn vehicle_type_counts(&self) -> Result<BTreeMap<String, u64>> {
        self.ledger.aggregate_by_type().await
    }
}
