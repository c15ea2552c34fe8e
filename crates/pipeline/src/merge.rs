//! Result merger
//!
//! Left join of the volume aggregation (which carries every group that
//! traded) with the ledger output (which carries PnL), on the composite
//! (week, entity) key. Groups with volume but no ledger row report zeroes,
//! not missing values - a defined filling policy, not an error.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tally_core::{ClientCategory, EntityKey, InstrumentId, UserId};
use tally_ledger::LedgerWeekRow;

use crate::aggregate::AggregateRow;

/// One output row per (entity, week)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyResultRow {
    pub week_start: NaiveDate,
    pub user_id: UserId,
    pub client_category: ClientCategory,
    pub instrument: InstrumentId,
    pub total_volume: Decimal,
    pub trade_count: u64,
    pub cumulative_volume: Decimal,
    pub realized_pnl: Decimal,
    pub unrealized_pnl: Decimal,
    pub total_pnl: Decimal,
    pub opened_qty: Decimal,
    pub closed_qty: Decimal,
    pub net_open_position: Decimal,
}

/// Left-join aggregate rows with ledger rows; zero-fill PnL fields where the
/// ledger produced no row.
pub fn merge_results(
    aggregates: &[AggregateRow],
    ledger_rows: &[LedgerWeekRow],
) -> Vec<WeeklyResultRow> {
    let by_key: HashMap<(NaiveDate, &EntityKey), &LedgerWeekRow> = ledger_rows
        .iter()
        .map(|row| ((row.week_start, &row.key), row))
        .collect();

    aggregates
        .iter()
        .map(|agg| {
            let ledger = by_key.get(&(agg.week_start, &agg.key)).copied();
            WeeklyResultRow {
                week_start: agg.week_start,
                user_id: agg.key.user_id.clone(),
                client_category: agg.key.category,
                instrument: agg.key.instrument.clone(),
                total_volume: agg.total_volume,
                trade_count: agg.trade_count,
                cumulative_volume: agg.cumulative_volume,
                realized_pnl: ledger.map_or(Decimal::ZERO, |l| l.realized_pnl),
                unrealized_pnl: ledger.map_or(Decimal::ZERO, |l| l.unrealized_pnl),
                total_pnl: ledger.map_or(Decimal::ZERO, |l| l.total_pnl),
                opened_qty: ledger.map_or(Decimal::ZERO, |l| l.opened_qty),
                closed_qty: ledger.map_or(Decimal::ZERO, |l| l.closed_qty),
                net_open_position: ledger.map_or(Decimal::ZERO, |l| l.net_position),
            }
        })
        .collect()
}
