//! Week-end reference prices
//!
//! The price used to mark residual open lots at the end of a week is the
//! price of the chronologically last trade of that instrument within the
//! week, market-wide (not entity-specific). Weeks in which the instrument
//! did not trade carry the most recent earlier week's price forward.
//!
//! The table is built once from the full normalized trade set before any
//! ledger runs, and is read-only afterwards - the sharing contract that
//! makes per-entity scans embarrassingly parallel.

use std::collections::HashMap;

use chrono::NaiveDate;
use tally_core::{InstrumentId, Price, Trade, week_start};

/// Last observed trade price per (instrument, week)
#[derive(Debug, Clone, Default)]
pub struct MarkTable {
    // Per instrument: (week, last price), ascending by week, one entry per
    // week that saw a trade
    by_instrument: HashMap<InstrumentId, Vec<(NaiveDate, Price)>>,
}

impl MarkTable {
    /// Build from trades already in non-decreasing timestamp order (ties in
    /// input order), so the last write for a week is the chronologically
    /// last trade.
    pub fn from_trades(trades: &[Trade]) -> Self {
        let mut by_instrument: HashMap<InstrumentId, Vec<(NaiveDate, Price)>> = HashMap::new();
        for trade in trades {
            let week = week_start(&trade.timestamp);
            let weeks = by_instrument.entry(trade.instrument.clone()).or_default();
            match weeks.last_mut() {
                Some((last_week, price)) if *last_week == week => *price = trade.price,
                _ => weeks.push((week, trade.price)),
            }
        }
        log::debug!(
            "reference price table built for {} instruments",
            by_instrument.len()
        );
        Self { by_instrument }
    }

    /// Reference price for `instrument` at the end of `week`.
    ///
    /// Falls back to the most recent earlier week when `week` itself saw no
    /// trades. `None` only when the instrument has never traded at all.
    pub fn resolve(&self, instrument: &str, week: NaiveDate) -> Option<Price> {
        let weeks = self.by_instrument.get(instrument)?;
        let idx = weeks.partition_point(|(w, _)| *w <= week);
        if idx == 0 { None } else { Some(weeks[idx - 1].1) }
    }
}
