//! CSV input and output.

use std::{fs::File, path::Path};

use polars::prelude::*;
use solow_primitives::Panel;
use tracing::info;

use crate::{UtilsError, panel_from_frame, panel_to_frame};

/// Read a CSV file with a header row.
///
/// # Errors
/// Returns an error if the file cannot be opened or parsed.
pub fn read_csv(path: impl AsRef<Path>) -> Result<DataFrame, UtilsError> {
    let path = path.as_ref();
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    info!(path = %path.display(), rows = df.height(), columns = df.width(), "read csv");
    Ok(df)
}

/// Write a data frame as CSV with a header row.
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn write_csv(df: &mut DataFrame, path: impl AsRef<Path>) -> Result<(), UtilsError> {
    let path = path.as_ref();
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(df)?;
    info!(path = %path.display(), rows = df.height(), "wrote csv");
    Ok(())
}

/// Read a panel from CSV.
///
/// # Errors
/// Returns an error if the file cannot be read or lacks a numeric `year`.
pub fn read_panel(path: impl AsRef<Path>) -> Result<Panel, UtilsError> {
    panel_from_frame(&read_csv(path)?)
}

/// Write a panel to CSV, sorted by year.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_panel(panel: &Panel, path: impl AsRef<Path>) -> Result<(), UtilsError> {
    let mut df = panel_to_frame(panel)?;
    write_csv(&mut df, path)
}
