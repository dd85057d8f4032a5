//! Merge of externally supplied projections.

use solow_primitives::{ExtrapolationRecord, Panel, Provenance, Year};
use tracing::debug;

/// Default provenance label for merged projections.
pub const DEFAULT_PROJECTION_LABEL: &str = "IMF projections";

/// Fills unknown cells after each series' last actual year from a projections panel.
#[derive(Debug, Clone)]
pub struct ProjectionMerger {
    label: String,
    end_year: Year,
}

impl ProjectionMerger {
    /// Create a merger recording `label` as the method.
    #[must_use]
    pub fn new(label: impl Into<String>, end_year: Year) -> Self {
        Self { label: label.into(), end_year }
    }

    /// Provenance label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Merge `projections` into `panel`.
    ///
    /// Only series already present in `panel` are merged, only for years
    /// after their last actual observation and up to the end year. Known
    /// cells are never overwritten.
    #[must_use]
    pub fn merge(&self, mut panel: Panel, projections: &Panel) -> (Panel, Provenance) {
        let mut provenance = Provenance::new();

        for column in projections.column_names() {
            if !panel.has_column(column) {
                debug!(column, "projection for unknown series ignored");
                continue;
            }
            let last_actual = panel.last_observed_year(column);
            let mut filled = Vec::new();

            for (year, value) in projections.observations(column) {
                if year > self.end_year || last_actual.is_some_and(|last| year <= last) {
                    continue;
                }
                if panel.value(column, year).is_some() {
                    continue;
                }
                panel.append_years(&[year]);
                panel.set_value(column, year, Some(value));
                filled.push(year);
            }

            if !filled.is_empty() {
                debug!(column, years = ?filled, label = %self.label, "merged projections");
                provenance.record(column, ExtrapolationRecord::new(self.label.clone(), filled));
            }
        }

        (panel, provenance)
    }
}

impl Default for ProjectionMerger {
    fn default() -> Self {
        Self::new(DEFAULT_PROJECTION_LABEL, 2025)
    }
}

#[cfg(test)]
mod tests {
    use solow_primitives::names;

    use super::*;

    #[test]
    fn fills_after_last_actual_only() {
        let panel = Panel::new(vec![2021, 2022, 2023])
            .with_column(names::GDP, vec![Some(100.0), Some(105.0), None]);
        let projections = Panel::new(vec![2022, 2023, 2024, 2026])
            .with_column(names::GDP, vec![Some(999.0), Some(110.0), Some(115.0), Some(130.0)])
            .with_column("NGDP_RPCH", vec![Some(1.0), Some(1.0), Some(1.0), Some(1.0)]);

        let (panel, provenance) = ProjectionMerger::default().merge(panel, &projections);

        assert_eq!(panel.value(names::GDP, 2022), Some(105.0));
        assert_eq!(panel.value(names::GDP, 2023), Some(110.0));
        assert_eq!(panel.value(names::GDP, 2024), Some(115.0));
        assert_eq!(panel.row_of(2026), None);
        assert!(!panel.has_column("NGDP_RPCH"));

        let record = provenance.get(names::GDP).unwrap();
        assert_eq!(record.method, "IMF projections");
        assert_eq!(record.years, vec![2023, 2024]);
    }

    #[test]
    fn empty_projections_noop() {
        let panel = Panel::new(vec![2023]).with_column(names::GDP, vec![Some(1.0)]);
        let (out, provenance) = ProjectionMerger::default().merge(panel.clone(), &Panel::default());
        assert_eq!(out, panel);
        assert!(provenance.is_empty());
    }
}
