use super::money::Money;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Sum of all payment totals recorded in one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearlyTotal {
    pub year: i32,
    pub total: Money,
}

/// Direction of the latest year's total against the year before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "direction", rename_all = "snake_case")]
pub enum Trend {
    /// Fewer than two years on record.
    InsufficientData,
    /// `percent` is `None` when the previous year summed to zero.
    Rising { percent: Option<Decimal> },
    Falling { percent: Decimal },
    Stable,
}

impl Trend {
    /// Compares the last two entries of `totals`, which must be ordered by year.
    pub fn from_totals(totals: &[YearlyTotal]) -> Self {
        let [.., previous, latest] = totals else {
            return Trend::InsufficientData;
        };

        let previous = previous.total.value();
        let latest = latest.total.value();
        if latest == previous {
            return Trend::Stable;
        }

        let percent = ((latest - previous) * Decimal::ONE_HUNDRED)
            .checked_div(previous)
            .map(|p| p.round_dp(2));

        match percent {
            Some(p) if p.is_sign_negative() => Trend::Falling { percent: p.abs() },
            Some(p) => Trend::Rising { percent: Some(p) },
            None => Trend::Rising { percent: None },
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::InsufficientData => write!(f, "Not enough data"),
            Trend::Rising { percent: Some(p) } => write!(f, "Up {p:.2}%"),
            Trend::Rising { percent: None } => write!(f, "Up from zero"),
            Trend::Falling { percent } => write!(f, "Down {percent:.2}%"),
            Trend::Stable => write!(f, "Stable"),
        }
    }
}

/// Yearly totals in ascending year order plus the trend they describe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyReport {
    pub totals: Vec<YearlyTotal>,
    pub trend: Trend,
}

impl YearlyReport {
    pub fn new(totals: Vec<YearlyTotal>) -> Self {
        let trend = Trend::from_totals(&totals);
        Self { totals, trend }
    }
}
