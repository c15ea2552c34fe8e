//! Extract stage - CSV read
//!
//! Delivers raw rows with every field optional so partially empty rows reach
//! the normalizer (which drops and counts them) instead of failing the file.
//! Rows the CSV layer cannot deserialize at all are skipped and counted
//! here; only a structurally unreadable file is fatal.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{PipelineError, Result};

/// One raw input row, before validation
///
/// Column contract: `timestamp, user_id, client_category, instrument, side,
/// quantity, price`, one row per executed fill. No ordering is assumed from
/// the source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct RawTrade {
    pub timestamp: Option<String>,
    pub user_id: Option<String>,
    pub client_category: Option<String>,
    pub instrument: Option<String>,
    pub side: Option<String>,
    pub quantity: Option<Decimal>,
    pub price: Option<Decimal>,
}

/// Read all rows from `path`.
pub fn read_trades(path: &Path) -> Result<Vec<RawTrade>> {
    if !path.exists() {
        return Err(PipelineError::InputNotFound(path.display().to_string()));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    let mut malformed = 0usize;
    for record in reader.deserialize() {
        match record {
            Ok(row) => rows.push(row),
            Err(err) => {
                malformed += 1;
                log::warn!("skipping malformed row: {err}");
            }
        }
    }

    if malformed > 0 {
        log::warn!("skipped {malformed} rows the CSV layer could not parse");
    }
    log::info!("extracted {} raw rows from {}", rows.len(), path.display());
    Ok(rows)
}
