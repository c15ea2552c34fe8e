//! FIFO lot queue
//!
//! One `FifoLedger` per entity key. An incoming fill first drains
//! opposite-direction lots from the head of the queue (oldest first),
//! realizing PnL on each matched portion; whatever quantity remains is
//! appended to the tail as a new open lot. Same-direction lots never net
//! against each other - a buy arriving onto a long queue is purely additive.

use std::collections::VecDeque;

use rust_decimal::Decimal;
use tally_core::{Direction, OpenLot, Price, Quantity, Side};

/// What a single fill did to the ledger
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FillOutcome {
    /// Quantity matched against opposite-direction lots
    pub closed_qty: Quantity,
    /// Quantity appended as a new open lot
    pub opened_qty: Quantity,
    /// PnL realized by the matched portion
    pub realized_pnl: Decimal,
}

/// Ordered queue of open lots for one entity, oldest first
#[derive(Debug, Clone, Default)]
pub struct FifoLedger {
    lots: VecDeque<OpenLot>,
}

impl FifoLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one fill, in timestamp order, and report what it closed and
    /// opened.
    ///
    /// Matching stops as soon as the head lot shares the fill's direction;
    /// the queue therefore never holds opposite-direction lots past the
    /// return of this method.
    pub fn apply(&mut self, side: Side, quantity: Quantity, price: Price) -> FillOutcome {
        let direction = side.direction();
        let mut remaining = quantity;
        let mut outcome = FillOutcome::default();

        while remaining > Decimal::ZERO {
            let Some(head) = self.lots.front_mut() else {
                break;
            };
            if head.direction == direction {
                break;
            }

            let close_qty = remaining.min(head.quantity);
            let pnl = match head.direction {
                // Closing a long: sold at `price` what was bought at `head.price`
                Direction::Long => (price - head.price) * close_qty,
                // Closing a short: bought back at `price` what was sold at `head.price`
                Direction::Short => (head.price - price) * close_qty,
            };
            outcome.realized_pnl += pnl;
            outcome.closed_qty += close_qty;
            remaining -= close_qty;
            head.quantity -= close_qty;
            if head.quantity.is_zero() {
                self.lots.pop_front();
            }
        }

        if remaining > Decimal::ZERO {
            self.lots
                .push_back(OpenLot::new(remaining, price, direction));
            outcome.opened_qty = remaining;
        }

        outcome
    }

    /// Signed net position over all open lots (+ long, - short)
    pub fn net_position(&self) -> Decimal {
        self.lots.iter().map(OpenLot::signed_quantity).sum()
    }

    /// Mark-to-market PnL of the open lots at `mark`
    pub fn unrealized_pnl(&self, mark: Price) -> Decimal {
        self.lots
            .iter()
            .map(|lot| match lot.direction {
                Direction::Long => (mark - lot.price) * lot.quantity,
                Direction::Short => (lot.price - mark) * lot.quantity,
            })
            .sum()
    }

    /// True when no lots remain open
    pub fn is_flat(&self) -> bool {
        self.lots.is_empty()
    }

    /// Open lots, oldest first
    pub fn lots(&self) -> impl Iterator<Item = &OpenLot> {
        self.lots.iter()
    }
}
