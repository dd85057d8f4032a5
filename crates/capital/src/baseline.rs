//! Baseline year selection.

use serde::{Deserialize, Serialize};
use solow_primitives::{Panel, Year, names};
use tracing::debug;

use crate::CapitalError;

/// Where to look for the calibration year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaselineConfig {
    /// Preferred baseline year.
    pub default_year: Year,
    /// Inclusive fallback search window.
    pub window: (Year, Year),
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self { default_year: 2017, window: (2010, 2020) }
    }
}

/// Calibration point of the capital-stock rebasing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaselineAnchor {
    /// Baseline year.
    pub year: Year,
    /// Real capital index in the baseline year.
    pub rkna: f64,
    /// Price level in the baseline year.
    pub pl_gdpo: f64,
    /// Nominal capital stock in the baseline year.
    pub capital: f64,
}

/// Whether `year` carries every input the anchor needs.
fn is_usable(panel: &Panel, year: Year) -> bool {
    let positive = |name: &str| panel.value(name, year).is_some_and(|v| v.is_finite() && v > 0.0);
    positive(names::RKNA) && positive(names::PL_GDPO) && panel.value(names::CGDPO, year).is_some()
}

/// Pick the baseline year.
///
/// The default year wins when usable; otherwise the usable year in the
/// window closest to it, ties going to the earlier year.
///
/// # Errors
/// Returns `CapitalError::NoBaselineYear` if no year in the window is usable.
pub fn select_baseline_year(panel: &Panel, config: &BaselineConfig) -> Result<Year, CapitalError> {
    if is_usable(panel, config.default_year) {
        return Ok(config.default_year);
    }

    let (start, end) = config.window;
    let year = (start..=end)
        .filter(|&year| is_usable(panel, year))
        .min_by_key(|&year| ((year - config.default_year).abs(), year))
        .ok_or(CapitalError::NoBaselineYear { start, end })?;

    debug!(default = config.default_year, selected = year, "baseline year fallback");
    Ok(year)
}

impl BaselineAnchor {
    /// Build the anchor for a panel.
    ///
    /// # Errors
    /// Returns `CapitalError::NoBaselineYear` if no usable baseline year exists.
    pub fn locate(
        panel: &Panel,
        config: &BaselineConfig,
        capital_output_ratio: f64,
    ) -> Result<Self, CapitalError> {
        let year = select_baseline_year(panel, config)?;
        let (start, end) = config.window;
        let missing = || CapitalError::NoBaselineYear { start, end };

        let rkna = panel.value(names::RKNA, year).ok_or_else(missing)?;
        let pl_gdpo = panel.value(names::PL_GDPO, year).ok_or_else(missing)?;
        let nominal_output = panel.value(names::CGDPO, year).ok_or_else(missing)?;

        Ok(Self { year, rkna, pl_gdpo, capital: nominal_output * capital_output_ratio })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn pwt_panel(years: &[Year]) -> Panel {
        let n = years.len();
        Panel::new(years.to_vec())
            .with_column(names::RKNA, vec![Some(1.0); n])
            .with_column(names::PL_GDPO, vec![Some(1.0); n])
            .with_column(names::CGDPO, vec![Some(100.0); n])
    }

    #[test]
    fn prefers_default_year() {
        let panel = pwt_panel(&[2015, 2016, 2017, 2018]);
        assert_eq!(select_baseline_year(&panel, &BaselineConfig::default()), Ok(2017));
    }

    #[rstest]
    #[case(&[2012, 2014, 2016, 2019], 2016)]
    #[case(&[2010, 2018], 2018)]
    #[case(&[2016, 2018], 2016)]
    #[case(&[2005, 2011, 2022], 2011)]
    fn closest_year_in_window(#[case] years: &[Year], #[case] expected: Year) {
        let panel = pwt_panel(years);
        assert_eq!(select_baseline_year(&panel, &BaselineConfig::default()), Ok(expected));
    }

    #[test]
    fn no_year_in_window() {
        let panel = pwt_panel(&[2000, 2005, 2021]);
        assert_eq!(
            select_baseline_year(&panel, &BaselineConfig::default()),
            Err(CapitalError::NoBaselineYear { start: 2010, end: 2020 })
        );
    }

    #[test]
    fn skips_years_missing_inputs() {
        let panel = pwt_panel(&[2016, 2017, 2018]).with_column(
            names::PL_GDPO,
            vec![Some(1.0), None, Some(1.0)],
        );
        assert_eq!(select_baseline_year(&panel, &BaselineConfig::default()), Ok(2016));
    }

    #[test]
    fn anchor_capital() {
        let anchor = BaselineAnchor::locate(&pwt_panel(&[2017]), &BaselineConfig::default(), 3.0).unwrap();
        assert_eq!(anchor.year, 2017);
        assert_eq!(anchor.capital, 300.0);
    }
}
