//! Trade record normalizer
//!
//! Dedup, required-field checks, timestamp parsing, side and category
//! canonicalization. Rows are dropped and counted, never fatal. The
//! surviving set is stable-sorted by timestamp, so downstream FIFO scans see
//! chronological order with equal timestamps resolved by input order.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use tally_core::{ClientCategory, Side, Timestamp, Trade};

use crate::extract::RawTrade;

/// Counts of rows removed during normalization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropStats {
    pub duplicates: usize,
    pub missing_fields: usize,
    pub bad_timestamps: usize,
    pub bad_values: usize,
}

impl DropStats {
    pub fn total(&self) -> usize {
        self.duplicates + self.missing_fields + self.bad_timestamps + self.bad_values
    }
}

/// Canonicalizes raw rows into validated [`Trade`]s
pub struct Normalizer {
    date_format: String,
}

impl Normalizer {
    pub fn new(date_format: impl Into<String>) -> Self {
        Self {
            date_format: date_format.into(),
        }
    }

    /// Run the full normalization pass.
    pub fn normalize(&self, raw: Vec<RawTrade>) -> (Vec<Trade>, DropStats) {
        let mut stats = DropStats::default();
        let mut seen: HashSet<RawTrade> = HashSet::with_capacity(raw.len());
        let mut trades = Vec::with_capacity(raw.len());

        for row in raw {
            if !seen.insert(row.clone()) {
                stats.duplicates += 1;
                continue;
            }
            if let Some(trade) = self.canonicalize(&row, &mut stats) {
                trades.push(trade);
            }
        }

        // Stable sort: equal timestamps keep input order, which is exactly
        // the tie-break FIFO matching requires
        trades.sort_by_key(|t| t.timestamp);

        if stats.total() > 0 {
            log::warn!(
                "dropped {} rows ({} duplicate, {} missing fields, {} bad timestamps, {} bad values)",
                stats.total(),
                stats.duplicates,
                stats.missing_fields,
                stats.bad_timestamps,
                stats.bad_values
            );
        }
        log::info!("normalized {} trades", trades.len());
        (trades, stats)
    }

    fn canonicalize(&self, row: &RawTrade, stats: &mut DropStats) -> Option<Trade> {
        let (Some(raw_ts), Some(user_id), Some(instrument), Some(raw_side)) = (
            row.timestamp.as_deref(),
            row.user_id.as_deref(),
            row.instrument.as_deref(),
            row.side.as_deref(),
        ) else {
            stats.missing_fields += 1;
            return None;
        };

        let Some(timestamp) = self.parse_timestamp(raw_ts) else {
            stats.bad_timestamps += 1;
            return None;
        };

        let Some(side) = Side::parse(raw_side) else {
            stats.bad_values += 1;
            return None;
        };

        let (Some(quantity), Some(price)) = (row.quantity, row.price) else {
            stats.bad_values += 1;
            return None;
        };
        if quantity <= Decimal::ZERO || price <= Decimal::ZERO {
            stats.bad_values += 1;
            return None;
        }

        let category = row
            .client_category
            .as_deref()
            .map(ClientCategory::parse)
            .unwrap_or(ClientCategory::Unknown);

        Some(Trade {
            timestamp,
            user_id: user_id.to_string(),
            category,
            instrument: instrument.to_string(),
            side,
            quantity,
            price,
        })
    }

    fn parse_timestamp(&self, raw: &str) -> Option<Timestamp> {
        NaiveDateTime::parse_from_str(raw.trim(), &self.date_format)
            .ok()
            .map(|naive| naive.and_utc())
    }
}
