//! Tally binary
//!
//! Weekly FIFO PnL over a batch CSV of trade executions.

use clap::Parser;

use tally_pipeline::{Config, run};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    match run(&config) {
        Ok(summary) => {
            log::info!(
                "pipeline complete: {} rows extracted, {} dropped, {} trades, {} result rows",
                summary.extracted,
                summary.dropped,
                summary.trades,
                summary.result_rows
            );
        }
        Err(err) => {
            log::error!("pipeline failed: {err}");
            std::process::exit(1);
        }
    }
}
