use super::money::Money;
use crate::error::{PaymentError, Result};

/// Longest lateness accepted as input, in months (one hundred years).
pub const MAX_MONTHS_LATE: u32 = 1200;

/// The four flat fee components billed for a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeeComponents {
    /// Transfer-of-ownership fee (BBNKB).
    pub bbnkb: Money,
    /// Base tax (Pajak Pokok). The only component the late penalty applies to.
    pub pajak_pokok: Money,
    /// Regional surcharge (Opsen).
    pub opsen: Money,
    /// Mandatory third-party insurance contribution (SWDKLLJ).
    pub swdkllj: Money,
}

impl FeeComponents {
    pub fn sum(&self) -> Money {
        self.bbnkb + self.pajak_pokok + self.opsen + self.swdkllj
    }

    fn validate(&self) -> Result<()> {
        let fields = [
            ("bbnkb", self.bbnkb),
            ("pajak_pokok", self.pajak_pokok),
            ("opsen", self.opsen),
            ("swdkllj", self.swdkllj),
        ];
        for (field, amount) in fields {
            amount.checked_input(field)?;
        }
        Ok(())
    }
}

/// A taxable vehicle with everything needed to compute what it owes.
///
/// Only constructible through [`VehicleTaxRecord::new`] or from a
/// [`VehicleForm`], both of which reject empty plates, fees outside
/// `0..=Money::MAX` and more than [`MAX_MONTHS_LATE`] months.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleTaxRecord {
    plate: String,
    vehicle_type: String,
    fees: FeeComponents,
    months_late: u32,
}

impl VehicleTaxRecord {
    pub fn new(
        plate: impl Into<String>,
        vehicle_type: impl Into<String>,
        fees: FeeComponents,
        months_late: u32,
    ) -> Result<Self> {
        let plate = plate.into().trim().to_string();
        if plate.is_empty() {
            return Err(PaymentError::validation("plate", "plate number is required"));
        }
        fees.validate()?;
        if months_late > MAX_MONTHS_LATE {
            return Err(months_too_large());
        }

        Ok(Self {
            plate,
            vehicle_type: vehicle_type.into().trim().to_string(),
            fees,
            months_late,
        })
    }

    pub fn plate(&self) -> &str {
        &self.plate
    }

    pub fn vehicle_type(&self) -> &str {
        &self.vehicle_type
    }

    pub fn fees(&self) -> &FeeComponents {
        &self.fees
    }

    pub fn months_late(&self) -> u32 {
        self.months_late
    }
}

/// Raw, unparsed vehicle fields as typed by the user or read from a CSV row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleForm {
    pub plate: String,
    pub vehicle_type: String,
    pub bbnkb: String,
    pub pajak_pokok: String,
    pub opsen: String,
    pub swdkllj: String,
    pub months_late: String,
}

impl TryFrom<&VehicleForm> for VehicleTaxRecord {
    type Error = PaymentError;

    fn try_from(form: &VehicleForm) -> Result<Self> {
        let fees = FeeComponents {
            bbnkb: Money::parse("bbnkb", &form.bbnkb)?,
            pajak_pokok: Money::parse("pajak_pokok", &form.pajak_pokok)?,
            opsen: Money::parse("opsen", &form.opsen)?,
            swdkllj: Money::parse("swdkllj", &form.swdkllj)?,
        };
        let months_late = parse_months(&form.months_late)?;

        VehicleTaxRecord::new(form.plate.as_str(), form.vehicle_type.as_str(), fees, months_late)
    }
}

fn parse_months(raw: &str) -> Result<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(PaymentError::validation("months_late", "value is required"));
    }
    match raw.parse::<i64>() {
        Ok(months) if months < 0 => Err(PaymentError::validation(
            "months_late",
            "month count must not be negative",
        )),
        Ok(months) => u32::try_from(months)
            .ok()
            .filter(|months| *months <= MAX_MONTHS_LATE)
            .ok_or_else(months_too_large),
        Err(_) => Err(PaymentError::validation(
            "months_late",
            format!("'{raw}' is not a whole number"),
        )),
    }
}

fn months_too_large() -> PaymentError {
    PaymentError::validation(
        "months_late",
        format!("month count exceeds the maximum of {MAX_MONTHS_LATE}"),
    )
}
