use crate::domain::ledger::{LedgerEntry, TIMESTAMP_FORMAT};
use crate::domain::statistics::{Trend, YearlyReport};
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

/// How history and statistics are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Csv,
    Json,
}

#[derive(Debug, Serialize)]
struct HistoryRow<'a> {
    id: i64,
    paid_at: String,
    plate: &'a str,
    vehicle_type: &'a str,
    total: Decimal,
}

impl<'a> From<&'a LedgerEntry> for HistoryRow<'a> {
    fn from(entry: &'a LedgerEntry) -> Self {
        Self {
            id: entry.id.0,
            paid_at: entry.paid_at.format(TIMESTAMP_FORMAT).to_string(),
            plate: &entry.plate,
            vehicle_type: &entry.vehicle_type,
            total: entry.total.truncated(),
        }
    }
}

#[derive(Debug, Serialize)]
struct YearRow {
    year: i32,
    total: Decimal,
}

#[derive(Debug, Serialize)]
struct TypeRow<'a> {
    vehicle_type: &'a str,
    count: u64,
}

/// Writes ledger views to any `Write` sink in the chosen format.
///
/// Amounts are truncated to whole rupiah in every format.
pub struct ReportWriter<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    pub fn write_history(&mut self, entries: &[LedgerEntry]) -> Result<()> {
        let rows: Vec<HistoryRow<'_>> = entries.iter().map(HistoryRow::from).collect();
        match self.format {
            OutputFormat::Csv => self.write_csv(&rows),
            OutputFormat::Json => self.write_json(&rows),
            OutputFormat::Text => {
                writeln!(self.out, "{:<4} {:<19}  {:<12} {:<12} {:>12}", "ID", "DATE", "PLATE", "TYPE", "TOTAL")?;
                for row in &rows {
                    writeln!(
                        self.out,
                        "{:<4} {:<19}  {:<12} {:<12} {:>12}",
                        row.id, row.paid_at, row.plate, row.vehicle_type, row.total
                    )?;
                }
                Ok(())
            }
        }
    }

    pub fn write_yearly(&mut self, report: &YearlyReport) -> Result<()> {
        let rows: Vec<YearRow> = report
            .totals
            .iter()
            .map(|y| YearRow {
                year: y.year,
                total: y.total.truncated(),
            })
            .collect();
        match self.format {
            OutputFormat::Csv => self.write_csv(&rows),
            OutputFormat::Json => {
                #[derive(Serialize)]
                struct YearlyJson<'a> {
                    totals: &'a [YearRow],
                    trend: &'a Trend,
                }
                self.write_json(&YearlyJson {
                    totals: &rows,
                    trend: &report.trend,
                })
            }
            OutputFormat::Text => {
                if rows.is_empty() {
                    writeln!(self.out, "No payments recorded yet.")?;
                    return Ok(());
                }
                writeln!(self.out, "{:<6} {:>14}", "YEAR", "TOTAL (Rp)")?;
                for row in &rows {
                    writeln!(self.out, "{:<6} {:>14}", row.year, row.total)?;
                }
                writeln!(self.out, "Trend: {}", report.trend)?;
                Ok(())
            }
        }
    }

    pub fn write_vehicle_types(&mut self, counts: &BTreeMap<String, u64>) -> Result<()> {
        match self.format {
            OutputFormat::Csv => {
                let rows: Vec<TypeRow<'_>> = counts
                    .iter()
                    .map(|(vehicle_type, count)| TypeRow {
                        vehicle_type,
                        count: *count,
                    })
                    .collect();
                self.write_csv(&rows)
            }
            OutputFormat::Json => self.write_json(counts),
            OutputFormat::Text => {
                if counts.is_empty() {
                    writeln!(self.out, "No payments recorded yet.")?;
                    return Ok(());
                }
                for (vehicle_type, count) in counts {
                    writeln!(self.out, "{vehicle_type:<16} {count:>6}")?;
                }
                Ok(())
            }
        }
    }

    fn write_csv<T: Serialize>(&mut self, rows: &[T]) -> Result<()> {
        let mut writer = csv::Writer::from_writer(&mut self.out);
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, value)?;
        writeln!(self.out)?;
        Ok(())
    }
}
