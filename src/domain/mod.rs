//! Domain layer: money, vehicle records, the tax and settlement rules, and the
//! ledger port the application layer persists through.

pub mod ledger;
pub mod money;
pub mod ports;
pub mod settlement;
pub mod statistics;
pub mod tax;
pub mod vehicle;
