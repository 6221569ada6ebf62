use super::money::Money;
use super::tax::TaxAssessment;
use crate::error::{PaymentError, Result};
use serde::Serialize;

/// Outcome of an accepted payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SettlementResult {
    pub penalty: Money,
    pub total: Money,
    pub tendered: Money,
    pub change: Money,
}

/// All-or-nothing settlement of a tendered amount against a total due.
pub struct PaymentSettlement;

impl PaymentSettlement {
    /// Returns the change owed, or `InsufficientFunds` carrying the shortfall
    /// when `tendered` does not cover `total`. Exact payment yields zero change.
    pub fn settle(total: Money, tendered: Money) -> Result<Money> {
        if tendered < total {
            return Err(PaymentError::InsufficientFunds {
                shortfall: total - tendered,
            });
        }
        Ok(tendered - total)
    }

    pub fn settle_assessment(assessment: &TaxAssessment, tendered: Money) -> Result<SettlementResult> {
        let change = Self::settle(assessment.total, tendered)?;
        Ok(SettlementResult {
            penalty: assessment.penalty,
            total: assessment.total,
            tendered,
            change,
        })
    }
}
