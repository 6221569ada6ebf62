use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;

/// A rupiah amount with exact decimal precision.
///
/// Wraps `rust_decimal::Decimal` so fee sums and penalties never pick up
/// binary floating point residue. Non-negativity is checked where amounts
/// enter the system (see [`Money::parse`]), not on every arithmetic result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Money(pub Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest amount accepted as input (one quadrillion rupiah). Keeps every
    /// fee sum and penalty product well inside `Decimal` range.
    pub const MAX: Self = Self(dec!(1000000000000000));

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Parses a user-supplied amount for `field`, rejecting anything that is
    /// not a plain non-negative decimal number.
    pub fn parse(field: &'static str, raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(PaymentError::validation(field, "value is required"));
        }

        let amount = Decimal::from_str(raw)
            .or_else(|_| Decimal::from_scientific(raw))
            .map_err(|_| PaymentError::validation(field, format!("'{raw}' is not a number")))?;

        Self(amount).checked_input(field)
    }

    /// Rejects amounts outside `0..=Money::MAX`, naming `field`.
    pub fn checked_input(self, field: &'static str) -> Result<Self> {
        if self.0.is_sign_negative() && !self.0.is_zero() {
            return Err(PaymentError::validation(field, "amount must not be negative"));
        }
        if self > Self::MAX {
            return Err(PaymentError::validation(
                field,
                format!("amount exceeds the maximum of {}", Self::MAX.0),
            ));
        }
        Ok(self)
    }

    /// Whole currency units for display: the fractional part is dropped,
    /// never rounded.
    pub fn truncated(&self) -> Decimal {
        self.0.floor()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rp {}", self.0.normalize())
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}
