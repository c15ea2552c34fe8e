//! Tally Pipeline
//!
//! Batch extract -> transform -> load over a CSV ledger of trade executions:
//!
//! 1. Extract raw rows from the input file
//! 2. Normalize (dedup, validate, parse timestamps, sort chronologically)
//! 3. Build the read-only reference price table
//! 4. FIFO ledger scan per entity (realized/unrealized PnL per week)
//! 5. Weekly volume aggregation, independent of the ledger
//! 6. Merge on the composite (week, entity) key, zero-filling absent PnL
//! 7. Write the weekly result table and the top-N client reports
//!
//! Row- and entity-level problems are dropped, counted, and logged; only a
//! structurally unreadable input aborts the run.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod extract;
pub mod load;
pub mod merge;
pub mod normalize;
pub mod report;

pub use config::Config;
pub use error::{PipelineError, Result};

use tally_core::week_start;
use tally_ledger::{AverageCostBook, MarkTable, compute_weekly};

/// Counters reported at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub extracted: usize,
    pub dropped: usize,
    pub trades: usize,
    pub result_rows: usize,
}

/// Execute the full pipeline.
pub fn run(config: &Config) -> Result<RunSummary> {
    let raw = extract::read_trades(&config.input)?;
    let extracted = raw.len();

    let normalizer = normalize::Normalizer::new(&config.date_format);
    let (trades, drops) = normalizer.normalize(raw);
    if trades.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    // Built once from the full trade set before any ledger runs; read-only
    // from here on
    let marks = MarkTable::from_trades(&trades);

    let ledger_rows = compute_weekly(&trades, &marks);
    let aggregates = aggregate::aggregate_weekly(&trades);
    let results = merge::merge_results(&aggregates, &ledger_rows);

    load::write_table(&config.output_dir, config::WEEKLY_RESULTS_FILE, &results)?;

    match report::top_by_volume(&results, config.report_category, config.top_n) {
        Ok(volume_report) => {
            load::write_table(&config.output_dir, config::TOP_VOLUME_FILE, &volume_report)?;
            let pnl_report = report::top_by_pnl(&results, config.report_category, config.top_n)?;
            load::write_table(&config.output_dir, config::TOP_PNL_FILE, &pnl_report)?;
        }
        Err(PipelineError::NoData { category }) => {
            log::warn!("no {category} clients in results; skipping top-N reports");
        }
        Err(err) => return Err(err),
    }

    if config.average_cost_report {
        if let Some(last) = trades.last() {
            let as_of = week_start(&last.timestamp);
            let rows = AverageCostBook::from_trades(&trades).summarize(&marks, as_of);
            load::write_table(&config.output_dir, config::AVERAGE_COST_FILE, &rows)?;
        }
    }

    Ok(RunSummary {
        extracted,
        dropped: drops.total(),
        trades: trades.len(),
        result_rows: results.len(),
    })
}
