//! Provenance of projected values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Year;

/// Which years of a series were filled, and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtrapolationRecord {
    /// Human-readable method description (e.g. `ARIMA(1,1,1)`).
    pub method: String,
    /// Filled years, ascending.
    pub years: Vec<Year>,
}

impl ExtrapolationRecord {
    /// Create a new record. Years are sorted and de-duplicated.
    #[must_use]
    pub fn new(method: impl Into<String>, mut years: Vec<Year>) -> Self {
        years.sort_unstable();
        years.dedup();
        Self { method: method.into(), years }
    }
}

/// Provenance map keyed by series name.
///
/// Each stage of a run returns its own map which is folded into the
/// accumulator with [`Provenance::merge`], where earlier entries win, or with
/// [`Provenance::overlay`] when the stage's record spans every filled year of
/// the column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Provenance(BTreeMap<String, ExtrapolationRecord>);

impl Provenance {
    /// Create an empty provenance map.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Record how a series was filled.
    ///
    /// Returns `false` (and leaves the map untouched) if the series already
    /// has a record or `years` is empty.
    pub fn record(&mut self, column: impl Into<String>, record: ExtrapolationRecord) -> bool {
        if record.years.is_empty() {
            return false;
        }
        let column = column.into();
        if self.0.contains_key(&column) {
            return false;
        }
        self.0.insert(column, record);
        true
    }

    /// Fold a later stage's provenance into this one.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        for (column, record) in other.0 {
            self.0.entry(column).or_insert(record);
        }
        self
    }

    /// Fold a later stage's provenance into this one, replacing the entries
    /// it also covers.
    #[must_use]
    pub fn overlay(mut self, other: Self) -> Self {
        self.0.extend(other.0);
        self
    }

    /// Record for a series.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&ExtrapolationRecord> {
        self.0.get(column)
    }

    /// Number of recorded series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over records in series-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExtrapolationRecord)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}
