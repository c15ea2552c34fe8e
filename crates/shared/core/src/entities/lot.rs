use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::values::{Price, Quantity};

/// Position direction - long (bought) or short (sold)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Long - bought the asset, profit when price rises
    Long,
    /// Short - sold, profit when price falls
    Short,
}

impl Direction {
    /// Returns the opposite direction
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Long => Direction::Short,
            Direction::Short => Direction::Long,
        }
    }

    /// Sign of the direction: +1 for long, -1 for short
    pub fn sign(&self) -> Decimal {
        match self {
            Direction::Long => Decimal::ONE,
            Direction::Short => Decimal::NEGATIVE_ONE,
        }
    }
}

/// The unmatched residual of a historical trade, still open in a ledger
///
/// Owned by exactly one ledger; lives for the duration of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenLot {
    /// Remaining unmatched quantity (always positive)
    pub quantity: Quantity,
    /// Entry price of the originating trade
    pub price: Price,
    /// Lot direction
    pub direction: Direction,
}

impl OpenLot {
    pub fn new(quantity: Quantity, price: Price, direction: Direction) -> Self {
        Self {
            quantity,
            price,
            direction,
        }
    }

    /// Quantity signed by direction (+ long, - short)
    pub fn signed_quantity(&self) -> Decimal {
        self.quantity * self.direction.sign()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn signed_quantity_follows_direction() {
        let long = OpenLot::new(dec!(3), dec!(110), Direction::Long);
        let short = OpenLot::new(dec!(3), dec!(110), Direction::Short);
        assert_eq!(long.signed_quantity(), dec!(3));
        assert_eq!(short.signed_quantity(), dec!(-3));
    }
}
