//! Yearly panel of economic series.

use serde::{Deserialize, Serialize};

use crate::Year;

/// A single named series in a [`Panel`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelColumn {
    /// Series name (e.g. `GDP_USD_bn`).
    pub name: String,
    /// One value per panel row, `None` when unknown.
    pub values: Vec<Option<f64>>,
}

/// Table of yearly observations keyed by `year`.
///
/// Every column may be partially populated. Unknown values are `None`,
/// never zero. Rows are kept in insertion order until [`Panel::sort_by_year`]
/// is called; all mutating helpers that add rows re-sort.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    years: Vec<Year>,
    columns: Vec<PanelColumn>,
}

impl Panel {
    /// Create an empty panel with the given year rows.
    #[must_use]
    pub const fn new(years: Vec<Year>) -> Self {
        Self { years, columns: Vec::new() }
    }

    /// Builder-style column insertion.
    #[must_use]
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        self.set_column(name, values);
        self
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.years.len()
    }

    /// Check if the panel has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Year of every row.
    #[must_use]
    pub fn years(&self) -> &[Year] {
        &self.years
    }

    /// Largest year present.
    #[must_use]
    pub fn max_year(&self) -> Option<Year> {
        self.years.iter().copied().max()
    }

    /// Smallest year present.
    #[must_use]
    pub fn min_year(&self) -> Option<Year> {
        self.years.iter().copied().min()
    }

    /// Names of all series, in column order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// All columns.
    #[must_use]
    pub fn columns(&self) -> &[PanelColumn] {
        &self.columns
    }

    /// Check whether a series exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Values of a series.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns.iter().find(|c| c.name == name).map(|c| c.values.as_slice())
    }

    fn column_mut(&mut self, name: &str) -> Option<&mut Vec<Option<f64>>> {
        self.columns.iter_mut().find(|c| c.name == name).map(|c| &mut c.values)
    }

    /// Insert or replace a series.
    ///
    /// `values` is padded with `None` or truncated to the panel height.
    pub fn set_column(&mut self, name: impl Into<String>, mut values: Vec<Option<f64>>) {
        let name = name.into();
        debug_assert_eq!(values.len(), self.years.len(), "column {name} length mismatch");
        values.resize(self.years.len(), None);
        match self.column_mut(&name) {
            Some(existing) => *existing = values,
            None => self.columns.push(PanelColumn { name, values }),
        }
    }

    /// Add a series that is unknown for every row, unless it already exists.
    pub fn ensure_column(&mut self, name: &str) {
        if !self.has_column(name) {
            self.columns.push(PanelColumn { name: name.to_string(), values: vec![None; self.height()] });
        }
    }

    /// Remove a series, returning its values.
    pub fn drop_column(&mut self, name: &str) -> Option<Vec<Option<f64>>> {
        let idx = self.columns.iter().position(|c| c.name == name)?;
        Some(self.columns.remove(idx).values)
    }

    /// Row index of the first row with the given year.
    #[must_use]
    pub fn row_of(&self, year: Year) -> Option<usize> {
        self.years.iter().position(|&y| y == year)
    }

    /// Value of a series in a given year.
    #[must_use]
    pub fn value(&self, name: &str, year: Year) -> Option<f64> {
        let row = self.row_of(year)?;
        self.column(name).and_then(|values| values[row])
    }

    /// Set the value of a series in a given year.
    ///
    /// Creates the series when absent. Returns `false` if the year has no row.
    pub fn set_value(&mut self, name: &str, year: Year, value: Option<f64>) -> bool {
        let Some(row) = self.row_of(year) else {
            return false;
        };
        self.ensure_column(name);
        if let Some(values) = self.column_mut(name) {
            values[row] = value;
        }
        true
    }

    /// Check whether a series is absent or has no known value.
    #[must_use]
    pub fn is_all_unknown(&self, name: &str) -> bool {
        self.column(name).is_none_or(|values| values.iter().all(Option::is_none))
    }

    /// Known `(year, value)` points of a series, sorted by year.
    #[must_use]
    pub fn observations(&self, name: &str) -> Vec<(Year, f64)> {
        let Some(values) = self.column(name) else {
            return Vec::new();
        };
        let mut points: Vec<(Year, f64)> = self
            .years
            .iter()
            .zip(values)
            .filter_map(|(&year, value)| value.map(|v| (year, v)))
            .collect();
        points.sort_by_key(|&(year, _)| year);
        points
    }

    /// Last year in which a series is known.
    #[must_use]
    pub fn last_observed_year(&self, name: &str) -> Option<Year> {
        self.observations(name).last().map(|&(year, _)| year)
    }

    /// Append empty rows for years not already present, then sort.
    pub fn append_years(&mut self, years: &[Year]) {
        let mut added = false;
        for &year in years {
            if self.row_of(year).is_none() {
                self.years.push(year);
                for column in &mut self.columns {
                    column.values.push(None);
                }
                added = true;
            }
        }
        if added {
            self.sort_by_year();
        }
    }

    /// Order rows by ascending year (stable).
    pub fn sort_by_year(&mut self) {
        let mut order: Vec<usize> = (0..self.years.len()).collect();
        order.sort_by_key(|&i| self.years[i]);
        if order.iter().enumerate().all(|(i, &j)| i == j) {
            return;
        }
        self.years = order.iter().map(|&i| self.years[i]).collect();
        for column in &mut self.columns {
            column.values = order.iter().map(|&i| column.values[i]).collect();
        }
    }

    /// Drop rows whose year already appeared earlier, keeping the first.
    pub fn dedup_years(&mut self) {
        let mut seen = std::collections::HashSet::with_capacity(self.years.len());
        let keep: Vec<bool> = self.years.iter().map(|&y| seen.insert(y)).collect();
        if keep.iter().all(|&k| k) {
            return;
        }
        self.years = filter_by(&self.years, &keep);
        for column in &mut self.columns {
            column.values = filter_by(&column.values, &keep);
        }
    }

    /// Projection of the panel onto a subset of series.
    ///
    /// Missing names are silently skipped.
    #[must_use]
    pub fn select(&self, names: &[&str]) -> Self {
        let columns = names
            .iter()
            .filter_map(|name| self.columns.iter().find(|c| c.name == *name).cloned())
            .collect();
        Self { years: self.years.clone(), columns }
    }
}

fn filter_by<T: Copy>(items: &[T], keep: &[bool]) -> Vec<T> {
    items.iter().zip(keep).filter(|&(_, &k)| k).map(|(&item, _)| item).collect()
}
