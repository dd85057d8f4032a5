//! Residual back-fill of key variables.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use solow_math::{average_growth_rate, compound, round_to};
use solow_primitives::{Panel, Year, names};

/// Key variables guaranteed a value in every gap year, with their fallback rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackfillConfig {
    /// Trailing points used to average growth.
    pub lookback: usize,
    /// Fallback growth rate per key variable.
    pub default_rates: BTreeMap<String, f64>,
    /// Decimal places of filled values.
    pub decimals: u32,
}

impl Default for BackfillConfig {
    fn default() -> Self {
        let default_rates = [
            (names::GDP, 0.05),
            (names::CONSUMPTION, 0.05),
            (names::GOVERNMENT, 0.05),
            (names::INVESTMENT, 0.05),
            (names::EXPORTS, 0.05),
            (names::IMPORTS, 0.05),
            (names::POPULATION, 0.005),
            (names::LABOR_FORCE, 0.01),
            (names::HUMAN_CAPITAL, 0.01),
            (names::CAPITAL, 0.04),
            (names::FDI_PCT_GDP, 0.0),
            (names::TAX_PCT_GDP, 0.0),
        ]
        .into_iter()
        .map(|(name, rate)| (name.to_string(), rate))
        .collect();
        Self { lookback: 5, default_rates, decimals: 4 }
    }
}

impl BackfillConfig {
    /// Key variable names.
    pub fn key_variables(&self) -> impl Iterator<Item = &str> {
        self.default_rates.keys().map(String::as_str)
    }
}

/// Fill every unknown `gap_years` cell of `column` from its last known value.
///
/// Values are compounded at the average growth rate of the last `lookback`
/// observations preceding the gap year, or the column's default rate.
/// Returns the years that were filled.
pub(crate) fn backfill_column(
    panel: &mut Panel,
    column: &str,
    gap_years: &[Year],
    config: &BackfillConfig,
) -> Vec<Year> {
    let default_rate = config.default_rates.get(column).copied().unwrap_or(0.0);
    let history = panel.observations(column);
    let mut filled = Vec::new();

    for &year in gap_years {
        if panel.value(column, year).is_some() {
            continue;
        }
        let prior: Vec<(Year, f64)> = history.iter().copied().filter(|&(y, _)| y < year).collect();
        let Some(&(last_year, last_value)) = prior.last() else {
            continue;
        };
        let values: Vec<f64> = prior.iter().map(|&(_, v)| v).collect();
        let rate = average_growth_rate(&values, config.lookback)
            .filter(|r| r.is_finite())
            .unwrap_or(default_rate);

        let projected = round_to(compound(last_value, rate, year - last_year).max(0.0), config.decimals);
        panel.append_years(&[year]);
        panel.set_value(column, year, Some(projected));
        filled.push(year);
    }

    filled
}
