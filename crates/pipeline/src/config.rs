//! Pipeline configuration
//!
//! CLI flags with defaults matching the historical batch job: read
//! `trades.csv`, write to `data/output`, report the top 3 bronze clients.

use std::path::PathBuf;

use clap::Parser;
use tally_core::ClientCategory;

/// Output file names
pub const WEEKLY_RESULTS_FILE: &str = "agg_trades_weekly.csv";
pub const TOP_VOLUME_FILE: &str = "top_clients_by_volume.csv";
pub const TOP_PNL_FILE: &str = "top_clients_by_pnl.csv";
pub const AVERAGE_COST_FILE: &str = "avg_cost_pnl.csv";

/// Weekly FIFO PnL over a batch ledger of trade executions
#[derive(Debug, Clone, Parser)]
#[command(name = "tally", version, about)]
pub struct Config {
    /// Input CSV of trade executions
    #[arg(long, default_value = "data/input/trades.csv")]
    pub input: PathBuf,

    /// Directory the output CSVs are written to
    #[arg(long, default_value = "data/output")]
    pub output_dir: PathBuf,

    /// Client category the top-N reports rank within
    #[arg(long, default_value = "bronze")]
    pub report_category: ClientCategory,

    /// Number of clients in each top-N report
    #[arg(long, default_value_t = 3)]
    pub top_n: usize,

    /// strftime format of the input timestamp column
    #[arg(long, default_value = "%Y-%m-%d %H:%M:%S")]
    pub date_format: String,

    /// Also write the weighted-average-cost cross-check report
    #[arg(long)]
    pub average_cost_report: bool,
}
