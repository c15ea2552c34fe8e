//! Top-N client reports
//!
//! Ranks clients within one category by cumulative trade volume and by total
//! PnL. Ties on the sort key keep first-encountered order - a stable sort
//! over a deterministic input - so rankings reproduce run to run.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;
use tally_core::{ClientCategory, UserId};

use crate::error::{PipelineError, Result};
use crate::merge::WeeklyResultRow;

/// One line of the top-by-volume report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeRankRow {
    pub rank: u32,
    pub user_id: UserId,
    pub client_category: ClientCategory,
    pub total_volume: Decimal,
    pub trade_count: u64,
}

/// One line of the top-by-PnL report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PnlRankRow {
    pub rank: u32,
    pub user_id: UserId,
    pub unrealized_pnl: Decimal,
    pub realized_pnl: Decimal,
    pub total_pnl: Decimal,
}

/// Top `top_n` clients of `category` by cumulative trade volume.
pub fn top_by_volume(
    results: &[WeeklyResultRow],
    category: ClientCategory,
    top_n: usize,
) -> Result<Vec<VolumeRankRow>> {
    let mut order: Vec<UserId> = Vec::new();
    let mut totals: HashMap<UserId, (Decimal, u64)> = HashMap::new();

    for row in results.iter().filter(|r| r.client_category == category) {
        if !totals.contains_key(&row.user_id) {
            order.push(row.user_id.clone());
        }
        let entry = totals.entry(row.user_id.clone()).or_default();
        entry.0 += row.total_volume;
        entry.1 += row.trade_count;
    }
    if order.is_empty() {
        return Err(PipelineError::NoData { category });
    }

    let mut ranked: Vec<(UserId, Decimal, u64)> = order
        .into_iter()
        .map(|user| {
            let (volume, count) = totals[&user];
            (user, volume, count)
        })
        .collect();
    // Stable descending sort: exact ties keep first-encountered order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    Ok(ranked
        .into_iter()
        .take(top_n)
        .enumerate()
        .map(|(i, (user_id, total_volume, trade_count))| VolumeRankRow {
            rank: i as u32 + 1,
            user_id,
            client_category: category,
            total_volume,
            trade_count,
        })
        .collect())
}

/// Top `top_n` clients of `category` by total PnL.
///
/// Realized PnL sums over every week; unrealized PnL is a snapshot, so each
/// (user, instrument) contributes only its last reported week's figure -
/// summing weekly marks would double-count open positions.
pub fn top_by_pnl(
    results: &[WeeklyResultRow],
    category: ClientCategory,
    top_n: usize,
) -> Result<Vec<PnlRankRow>> {
    let mut order: Vec<UserId> = Vec::new();
    let mut realized: HashMap<UserId, Decimal> = HashMap::new();
    // Later weeks overwrite earlier ones; results are in week order
    let mut last_unrealized: HashMap<(UserId, String), Decimal> = HashMap::new();

    for row in results.iter().filter(|r| r.client_category == category) {
        if !realized.contains_key(&row.user_id) {
            order.push(row.user_id.clone());
        }
        *realized.entry(row.user_id.clone()).or_default() += row.realized_pnl;
        last_unrealized.insert(
            (row.user_id.clone(), row.instrument.clone()),
            row.unrealized_pnl,
        );
    }
    if order.is_empty() {
        return Err(PipelineError::NoData { category });
    }

    let mut unrealized: HashMap<UserId, Decimal> = HashMap::new();
    for ((user, _instrument), value) in &last_unrealized {
        *unrealized.entry(user.clone()).or_default() += *value;
    }

    let mut ranked: Vec<PnlRankRow> = order
        .into_iter()
        .map(|user_id| {
            let realized_pnl = realized[&user_id];
            let unrealized_pnl = unrealized.get(&user_id).copied().unwrap_or(Decimal::ZERO);
            PnlRankRow {
                rank: 0,
                user_id,
                unrealized_pnl,
                realized_pnl,
                total_pnl: realized_pnl + unrealized_pnl,
            }
        })
        .collect();
    ranked.sort_by(|a, b| b.total_pnl.cmp(&a.total_pnl));

    Ok(ranked
        .into_iter()
        .take(top_n)
        .enumerate()
        .map(|(i, row)| PnlRankRow {
            rank: i as u32 + 1,
            ..row
        })
        .collect())
}
