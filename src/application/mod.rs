//! Application layer orchestrating a payment from assessment to ledger.
//!
//! This module defines the `PaymentService`, the single entry point the CLI
//! drives for payments, receipts, history and statistics.

pub mod service;
