//! Weighted-average-cost cross-check
//!
//! A secondary PnL computation kept alongside the FIFO ledger for
//! reconciliation. Each entity carries one net position with a running
//! average entry price; reductions realize against the average instead of
//! against individual lots. Less rigorous than FIFO matching - the FIFO
//! rows remain the system of record.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::Signed;
use serde::Serialize;
use tally_core::{ClientCategory, EntityKey, Price, Side, Trade, UserId};

use crate::marks::MarkTable;

/// Net position with a running average entry price
#[derive(Debug, Clone, Default)]
struct AverageCostPosition {
    /// Net quantity (positive = long, negative = short)
    quantity: Decimal,
    /// Average entry price; undefined while flat
    avg_price: Decimal,
    /// Realized PnL accumulated against the average
    realized_pnl: Decimal,
}

impl AverageCostPosition {
    /// Apply a fill, returning the realized PnL it produced
    fn apply_fill(&mut self, side: Side, quantity: Decimal, price: Price) -> Decimal {
        let signed_qty = match side {
            Side::Buy => quantity,
            Side::Sell => -quantity,
        };

        let mut realized = Decimal::ZERO;

        if (self.quantity > Decimal::ZERO && signed_qty < Decimal::ZERO)
            || (self.quantity < Decimal::ZERO && signed_qty > Decimal::ZERO)
        {
            let close_qty = signed_qty.abs().min(self.quantity.abs());
            realized = if self.quantity > Decimal::ZERO {
                close_qty * (price - self.avg_price)
            } else {
                close_qty * (self.avg_price - price)
            };
        }

        let new_quantity = self.quantity + signed_qty;

        if new_quantity.is_zero() {
            // Flat: no average price until the next entry
            self.avg_price = Decimal::ZERO;
        } else if (self.quantity >= Decimal::ZERO && signed_qty > Decimal::ZERO)
            || (self.quantity <= Decimal::ZERO && signed_qty < Decimal::ZERO)
        {
            // Adding to the position - weighted average
            let total_cost = self.quantity.abs() * self.avg_price + quantity * price;
            self.avg_price = total_cost / new_quantity.abs();
        } else if new_quantity.signum() != self.quantity.signum() {
            // Flipped sides - the fill price is the new average
            self.avg_price = price;
        }
        // Reducing without flipping keeps the average

        self.quantity = new_quantity;
        self.realized_pnl += realized;
        realized
    }

    /// Mark-to-market against `mark`; a zero net position has no average
    /// price and contributes nothing
    fn unrealized_pnl(&self, mark: Price) -> Decimal {
        if self.quantity.is_zero() {
            Decimal::ZERO
        } else if self.quantity > Decimal::ZERO {
            self.quantity * (mark - self.avg_price)
        } else {
            self.quantity.abs() * (self.avg_price - mark)
        }
    }
}

/// Per-(user, category) cross-check totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AverageCostRow {
    pub user_id: UserId,
    pub client_category: ClientCategory,
    pub realized_pnl: Decimal,
    pub unrealized_pnl: Decimal,
    pub total_pnl: Decimal,
}

/// Average-cost positions across all entities
#[derive(Debug, Default)]
pub struct AverageCostBook {
    positions: BTreeMap<EntityKey, AverageCostPosition>,
}

impl AverageCostBook {
    /// Feed every trade through its entity's average-cost position.
    ///
    /// `trades` must be in non-decreasing timestamp order, same as the FIFO
    /// scan.
    pub fn from_trades(trades: &[Trade]) -> Self {
        let mut book = Self::default();
        for trade in trades {
            book.positions
                .entry(trade.entity_key())
                .or_default()
                .apply_fill(trade.side, trade.quantity, trade.price);
        }
        book
    }

    /// Roll the book up per (user, category), marking residual positions at
    /// the reference price as of `as_of`.
    pub fn summarize(&self, marks: &MarkTable, as_of: NaiveDate) -> Vec<AverageCostRow> {
        let mut totals: BTreeMap<(UserId, ClientCategory), (Decimal, Decimal)> = BTreeMap::new();
        for (key, position) in &self.positions {
            let unrealized = match marks.resolve(&key.instrument, as_of) {
                Some(mark) => position.unrealized_pnl(mark),
                None => Decimal::ZERO,
            };
            let entry = totals
                .entry((key.user_id.clone(), key.category))
                .or_default();
            entry.0 += position.realized_pnl;
            entry.1 += unrealized;
        }

        totals
            .into_iter()
            .map(|((user_id, client_category), (realized, unrealized))| {
                let realized = realized.round_dp(2);
                let unrealized = unrealized.round_dp(2);
                AverageCostRow {
                    user_id,
                    client_category,
                    realized_pnl: realized,
                    unrealized_pnl: unrealized,
                    total_pnl: realized + unrealized,
                }
            })
            .collect()
    }
}
