//! Pipeline errors

use tally_core::ClientCategory;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("input file not found: {0}")]
    InputNotFound(String),

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("input is not readable as CSV: {0}")]
    Extract(#[from] csv::Error),

    #[error("no rows survived normalization")]
    EmptyInput,

    #[error("refusing to write empty table {0}")]
    EmptyResult(String),

    #[error("no data for client category {category}")]
    NoData { category: ClientCategory },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
