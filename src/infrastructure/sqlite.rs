use crate::domain::ledger::{LedgerEntry, NewLedgerEntry, RecordId, TIMESTAMP_FORMAT};
use crate::domain::money::Money;
use crate::domain::ports::TransactionLedger;
use crate::domain::statistics::YearlyTotal;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use chrono::{Datelike, NaiveDateTime};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Type, ValueRef};
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tracing::debug;

const SELECT_ENTRY: &str =
    "SELECT id, plate, vehicle_type, total, penalty, change_due, paid_at FROM payments";

/// A file-backed ledger using SQLite.
///
/// Amounts are stored as decimal text so nothing is lost to `REAL` columns;
/// yearly sums are therefore folded in Rust rather than with `SUM()`.
///
/// `Clone` shares the underlying connection.
#[derive(Clone)]
pub struct SqliteLedger {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteLedger {
    /// Opens or creates the database at `path` and ensures the schema exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "opened payment ledger");
        Self::with_connection(conn)
    }

    /// A private database that disappears with the process.
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        setup_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| PaymentError::InternalError("ledger connection lock poisoned".to_string()))?;
        f(&conn)
    }
}

fn setup_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS payments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            plate TEXT NOT NULL,
            vehicle_type TEXT NOT NULL,
            total TEXT NOT NULL,
            penalty TEXT NOT NULL,
            change_due TEXT NOT NULL,
            paid_at TEXT NOT NULL
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_payments_paid_at ON payments(paid_at)",
        [],
    )?;
    Ok(())
}

impl ToSql for Money {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.value().to_string()))
    }
}

impl FromSql for Money {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let raw = value.as_str()?;
        Decimal::from_str(raw)
            .map(Money::new)
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDateTime> {
    let raw: String = row.get(idx)?;
    NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<LedgerEntry> {
    Ok(LedgerEntry {
        id: RecordId(row.get(0)?),
        plate: row.get(1)?,
        vehicle_type: row.get(2)?,
        total: row.get(3)?,
        penalty: row.get(4)?,
        change: row.get(5)?,
        paid_at: timestamp_column(row, 6)?,
    })
}

#[async_trait]
impl TransactionLedger for SqliteLedger {
    async fn append(&self, entry: NewLedgerEntry) -> Result<RecordId> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO payments (plate, vehicle_type, total, penalty, change_due, paid_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    entry.plate,
                    entry.vehicle_type,
                    entry.total,
                    entry.penalty,
                    entry.change,
                    entry.paid_at.format(TIMESTAMP_FORMAT).to_string(),
                ],
            )?;
            Ok(RecordId(conn.last_insert_rowid()))
        })
    }

    async fn find(&self, id: RecordId) -> Result<Option<LedgerEntry>> {
        self.with_conn(|conn| {
            let entry = conn
                .query_row(
                    &format!("{SELECT_ENTRY} WHERE id = ?1"),
                    params![id.0],
                    entry_from_row,
                )
                .optional()?;
            Ok(entry)
        })
    }

    async fn list_all(&self) -> Result<Vec<LedgerEntry>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("{SELECT_ENTRY} ORDER BY paid_at DESC, id DESC"))?;
            let entries = stmt
                .query_map([], entry_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(entries)
        })
    }

    async fn aggregate_by_year(&self) -> Result<Vec<YearlyTotal>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT paid_at, total FROM payments")?;
            let rows = stmt
                .query_map([], |row| Ok((timestamp_column(row, 0)?, row.get::<_, Money>(1)?)))?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            let mut years: BTreeMap<i32, Money> = BTreeMap::new();
            for (paid_at, total) in rows {
                *years.entry(paid_at.year()).or_default() += total;
            }
            Ok(years
                .into_iter()
                .map(|(year, total)| YearlyTotal { year, total })
                .collect())
        })
    }

    async fn aggregate_by_type(&self) -> Result<BTreeMap<String, u64>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT vehicle_type, COUNT(*) FROM payments GROUP BY vehicle_type",
            )?;
            let counts = stmt
                .query_map([], |row| {
                    let count: i64 = row.get(1)?;
                    Ok((row.get::<_, String>(0)?, count as u64))
                })?
                .collect::<rusqlite::Result<BTreeMap<_, _>>>()?;
            Ok(counts)
        })
    }
}
