use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ClientCategory, Direction, EntityKey, Side};
use crate::values::{InstrumentId, Price, Quantity, Timestamp, UserId};

/// A single executed fill, normalized and validated
///
/// Invariants: quantity > 0, price > 0. Rows that cannot satisfy them are
/// dropped by the normalizer before a `Trade` exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Execution time (UTC)
    pub timestamp: Timestamp,
    /// Client that executed the fill
    pub user_id: UserId,
    /// Client category at execution time
    pub category: ClientCategory,
    /// Instrument traded
    pub instrument: InstrumentId,
    /// Fill side
    pub side: Side,
    /// Executed quantity (always positive)
    pub quantity: Quantity,
    /// Execution price (always positive)
    pub price: Price,
}

impl Trade {
    /// Notional value of the fill (price * quantity)
    pub fn notional(&self) -> Decimal {
        self.price * self.quantity
    }

    /// Direction the fill pushes the position toward
    pub fn direction(&self) -> Direction {
        self.side.direction()
    }

    /// The ledger this fill belongs to
    pub fn entity_key(&self) -> EntityKey {
        EntityKey {
            user_id: self.user_id.clone(),
            category: self.category,
            instrument: self.instrument.clone(),
        }
    }
}
