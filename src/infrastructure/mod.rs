//! Ledger adapters: SQLite for real runs, in-memory for tests and throwaway sessions.

pub mod in_memory;
pub mod sqlite;
