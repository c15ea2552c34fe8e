//! Weekly volume aggregation
//!
//! Pure grouping, independent of the ledger: notional volume and trade count
//! per (week, entity), plus a running cumulative volume per
//! (user, category) across weeks in chronological order.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally_core::{ClientCategory, EntityKey, Trade, UserId, week_start};

/// Aggregated volume for one (week, entity)
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    pub week_start: NaiveDate,
    pub key: EntityKey,
    /// Sum of quantity * price over the week's fills, 2 dp
    pub total_volume: Decimal,
    pub trade_count: u64,
    /// Running volume for this row's (user, category) up to and including
    /// this row; monotonically non-decreasing in output order
    pub cumulative_volume: Decimal,
}

/// Group trades per (week, entity) and attach the running per-client volume.
///
/// Output is ordered by week, then entity key; with all quantities and
/// prices positive the cumulative column never decreases.
pub fn aggregate_weekly(trades: &[Trade]) -> Vec<AggregateRow> {
    let mut groups: BTreeMap<(NaiveDate, EntityKey), (Decimal, u64)> = BTreeMap::new();
    for trade in trades {
        let entry = groups
            .entry((week_start(&trade.timestamp), trade.entity_key()))
            .or_default();
        entry.0 += trade.notional();
        entry.1 += 1;
    }

    let mut running: BTreeMap<(UserId, ClientCategory), Decimal> = BTreeMap::new();
    let mut rows = Vec::with_capacity(groups.len());
    for ((week, key), (volume, count)) in groups {
        let cumulative = running
            .entry((key.user_id.clone(), key.category))
            .or_default();
        *cumulative += volume;
        rows.push(AggregateRow {
            week_start: week,
            key,
            total_volume: volume.round_dp(2),
            trade_count: count,
            cumulative_volume: cumulative.round_dp(2),
        });
    }

    log::info!("aggregated {} entity-week groups", rows.len());
    rows
}
