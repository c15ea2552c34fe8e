//! Tally Core Domain
//!
//! Pure domain types for the tally weekly PnL pipeline.
//! This crate contains no I/O and is 100% unit testable.

pub mod entities;
pub mod values;
pub mod week;

// Re-export commonly used types at crate root
pub use entities::{ClientCategory, Direction, EntityKey, OpenLot, Side, Trade};
pub use values::{InstrumentId, Price, Quantity, Timestamp, UserId};
pub use week::week_start;
