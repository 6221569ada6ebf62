use crate::domain::ledger::{LedgerEntry, TIMESTAMP_FORMAT};
use crate::error::Result;
use std::fs;
use std::path::Path;
use tracing::info;

const RULE: &str = "==========================";

/// Renders the printable receipt. Amounts are shown in whole rupiah, truncated.
pub fn render_receipt(receipt: &LedgerEntry) -> String {
    let lines = [
        "======= TAX RECEIPT =======".to_string(),
        format!("Receipt No   : {}", receipt.id),
        format!("Date         : {}", receipt.paid_at.format(TIMESTAMP_FORMAT)),
        format!("Plate        : {}", receipt.plate),
        format!("Vehicle type : {}", receipt.vehicle_type),
        String::new(),
        format!("TOTAL TAX    : Rp {}", receipt.total.truncated()),
        format!("PENALTY      : Rp {}", receipt.penalty.truncated()),
        format!("CHANGE       : Rp {}", receipt.change.truncated()),
        String::new(),
        RULE.to_string(),
    ];
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Writes the rendered receipt to `path`, replacing any existing file.
pub fn export_receipt(receipt: &LedgerEntry, path: &Path) -> Result<()> {
    fs::write(path, render_receipt(receipt))?;
    info!(id = %receipt.id, path = %path.display(), "receipt exported");
    Ok(())
}
