//! Load stage - CSV write
//!
//! One generic writer for every output table. Refuses to emit an empty
//! artifact; the caller decides whether that is fatal.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{PipelineError, Result};

/// Write `rows` as CSV to `dir/file_name`, creating `dir` if needed.
pub fn write_table<T: Serialize>(dir: &Path, file_name: &str, rows: &[T]) -> Result<PathBuf> {
    if rows.is_empty() {
        return Err(PipelineError::EmptyResult(file_name.to_string()));
    }

    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    let mut writer = csv::Writer::from_path(&path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    log::info!("wrote {} rows to {}", rows.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Row {
        name: &'static str,
        value: u32,
    }

    fn out_dir() -> PathBuf {
        std::env::temp_dir().join(format!("tally-load-{}", std::process::id()))
    }

    #[test]
    fn writes_header_and_rows() {
        let dir = out_dir();
        let path = write_table(&dir, "rows.csv", &[Row { name: "a", value: 1 }]).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content, "name,value\na,1\n");
    }

    #[test]
    fn refuses_to_write_an_empty_table() {
        let rows: Vec<Row> = Vec::new();
        let err = write_table(&out_dir(), "empty.csv", &rows).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyResult(_)));
    }
}
