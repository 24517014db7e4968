//! CSV output of result frames.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::{CsvWriter, DataFrame, SerWriter};

/// Write `df` as CSV with a header row, to `path` or stdout when `None`.
pub fn write_csv(df: &mut DataFrame, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_frame(df, &mut writer)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            writer.flush()?;
            tracing::info!(path = %path.display(), rows = df.height(), "wrote csv");
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_frame(df, &mut handle).context("Failed to write to stdout")?;
            handle.flush()?;
        }
    }
    Ok(())
}

fn write_frame<W: Write>(df: &mut DataFrame, writer: &mut W) -> Result<()> {
    CsvWriter::new(writer).include_header(true).finish(df)?;
    Ok(())
}
