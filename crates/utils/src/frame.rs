//! Conversion between [`Panel`] and polars data frames.

use polars::prelude::*;
use solow_primitives::{Panel, Year, names};
use tracing::{debug, warn};

use crate::UtilsError;

/// Build a panel from a data frame with a numeric `year` column.
///
/// Every other integer or float column becomes a series; NaN and infinite
/// values become unknown. Non-numeric columns are skipped. Rows with an
/// unknown year are dropped, duplicated years keep their first row, and the
/// result is sorted by year.
///
/// # Errors
/// Returns `UtilsError::MissingColumn` without a `year` column, or a polars
/// error if `year` cannot be cast to an integer.
pub fn panel_from_frame(df: &DataFrame) -> Result<Panel, UtilsError> {
    let year_column = df
        .column(names::YEAR)
        .map_err(|_| UtilsError::MissingColumn(names::YEAR.to_string()))?;
    if !is_numeric(year_column.dtype()) {
        return Err(UtilsError::InvalidParameter(format!(
            "year column must be numeric, got {}",
            year_column.dtype()
        )));
    }
    let years = year_column.cast(&DataType::Int32)?;
    let years: Vec<Option<Year>> = years.i32()?.into_iter().collect();

    let keep: Vec<bool> = years.iter().map(Option::is_some).collect();
    let dropped = keep.iter().filter(|&&k| !k).count();
    if dropped > 0 {
        warn!(rows = dropped, "rows without a year dropped");
    }

    let mut panel = Panel::new(years.into_iter().flatten().collect());
    for column in df.get_columns() {
        let name = column.name().as_str();
        if name == names::YEAR {
            continue;
        }
        if !is_numeric(column.dtype()) {
            debug!(column = name, dtype = %column.dtype(), "non-numeric column skipped");
            continue;
        }

        let values = column.cast(&DataType::Float64)?;
        let values: Vec<Option<f64>> = values
            .f64()?
            .into_iter()
            .zip(&keep)
            .filter(|&(_, &k)| k)
            .map(|(v, _)| v.filter(|x| x.is_finite()))
            .collect();
        panel.set_column(name, values);
    }

    let height = panel.height();
    panel.dedup_years();
    if panel.height() < height {
        warn!(rows = height - panel.height(), "duplicate years dropped");
    }
    panel.sort_by_year();
    Ok(panel)
}

/// Build a data frame with `year` first, then every panel column in order.
///
/// Rows are de-duplicated by year and sorted.
///
/// # Errors
/// Returns a polars error if the frame cannot be assembled.
pub fn panel_to_frame(panel: &Panel) -> Result<DataFrame, UtilsError> {
    let mut panel = panel.clone();
    panel.dedup_years();
    panel.sort_by_year();

    let mut columns = Vec::with_capacity(panel.columns().len() + 1);
    columns.push(Column::new(names::YEAR.into(), panel.years().to_vec()));
    for column in panel.columns() {
        columns.push(Column::new(column.name.as_str().into(), column.values.clone()));
    }

    Ok(DataFrame::new(columns)?)
}

fn is_numeric(dtype: &DataType) -> bool {
    dtype.is_integer() || dtype.is_float() || matches!(dtype, DataType::Null)
}
