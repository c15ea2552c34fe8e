//! Tally Ledger
//!
//! The FIFO position & PnL matching core. One [`FifoLedger`] per
//! (user, client category, instrument) consumes that entity's fills in
//! timestamp order, matches closing fills against the oldest open lots
//! first, and realizes PnL on every match. [`engine::compute_weekly`] drives
//! the scan and emits one row per (entity, calendar week), marking residual
//! open lots against the week-end reference price from the shared, read-only
//! [`MarkTable`].
//!
//! [`AverageCostBook`] is a secondary weighted-average-cost computation kept
//! only as a reconciliation cross-check; the FIFO rows are the system of
//! record.

pub mod average_cost;
pub mod engine;
pub mod ledger;
pub mod marks;

pub use average_cost::{AverageCostBook, AverageCostRow};
pub use engine::{LedgerWeekRow, compute_weekly};
pub use ledger::{FifoLedger, FillOutcome};
pub use marks::MarkTable;
