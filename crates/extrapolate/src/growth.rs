//! Average-growth-rate strategy.

use serde::{Deserialize, Serialize};
use solow_math::{average_growth_rate, compound};
use solow_primitives::Year;
use solow_traits::{ExtrapolationError, Extrapolator};

/// Configuration for the growth-rate strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthConfig {
    /// Trailing points used to average growth.
    pub lookback: usize,
    /// Rate used when the window yields no growth pair.
    pub default_rate: f64,
    /// Minimum number of known points.
    pub min_data_points: usize,
    /// Project a lone observation with `default_rate` instead of failing.
    pub allow_single_point: bool,
    /// Decimal places of stored forecasts.
    pub decimals: u32,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            lookback: 4,
            default_rate: 0.03,
            min_data_points: 2,
            allow_single_point: true,
            decimals: 4,
        }
    }
}

/// Compounds the last value at the average recent growth rate.
#[derive(Debug, Clone, Default)]
pub struct GrowthRateExtrapolator {
    config: GrowthConfig,
}

impl GrowthRateExtrapolator {
    /// Create a new growth-rate strategy with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(GrowthConfig::default())
    }

    /// Create a new growth-rate strategy with custom configuration.
    #[must_use]
    pub const fn with_config(config: GrowthConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &GrowthConfig {
        &self.config
    }

    /// Growth rate applied to a history.
    #[must_use]
    pub fn rate(&self, history: &[(Year, f64)]) -> f64 {
        let values: Vec<f64> = history.iter().map(|&(_, v)| v).collect();
        average_growth_rate(&values, self.config.lookback).unwrap_or(self.config.default_rate)
    }
}

impl Extrapolator for GrowthRateExtrapolator {
    fn name(&self) -> &str {
        "Average growth rate"
    }

    fn min_data_points(&self) -> usize {
        self.config.min_data_points
    }

    fn accepts(&self, n_points: usize) -> bool {
        n_points >= self.config.min_data_points || (self.config.allow_single_point && n_points == 1)
    }

    fn decimals(&self) -> u32 {
        self.config.decimals
    }

    fn forecast(
        &self,
        history: &[(Year, f64)],
        years: &[Year],
    ) -> Result<(Vec<f64>, String), ExtrapolationError> {
        let Some(&(last_year, last_value)) = history.last() else {
            return Err(ExtrapolationError::NoData);
        };
        let rate = self.rate(history);
        if !rate.is_finite() {
            return Err(ExtrapolationError::FitFailed {
                method: self.name().to_string(),
                reason: "non-finite growth rate".to_string(),
            });
        }

        let forecast = years.iter().map(|&year| compound(last_value, rate, year - last_year)).collect();
        Ok((forecast, format!("{} ({:.2}%)", self.name(), rate * 100.0)))
    }
}

#[cfg(test)]
mod tests {
    use solow_primitives::Panel;

    use super::*;

    #[test]
    fn growth_defaults() {
        let config = GrowthConfig::default();
        assert_eq!(config.lookback, 4);
        assert_eq!(config.default_rate, 0.03);
        assert_eq!(config.min_data_points, 2);
        assert!(config.allow_single_point);
        assert_eq!(config.decimals, 4);
    }

    #[test]
    fn forecasts_rounded_to_configured_decimals() {
        let panel = Panel::new(vec![2022]).with_column("x", vec![Some(100.0)]);
        let config = GrowthConfig { decimals: 2, ..GrowthConfig::default() };

        let coarse = GrowthRateExtrapolator::with_config(config).extrapolate(panel.clone(), "x", &[2025]);
        let fine = GrowthRateExtrapolator::new().extrapolate(panel, "x", &[2025]);

        assert_eq!(coarse.panel.value("x", 2025), Some(109.27));
        assert_eq!(fine.panel.value("x", 2025), Some(109.2727));
    }

    #[test]
    fn averages_trailing_growth() {
        // Lookback 4 uses 110 -> 121 -> 133.1 -> 146.41 (10% each); 50 is ignored.
        let panel = Panel::new(vec![2018, 2019, 2020, 2021, 2022])
            .with_column("FDI_pct_GDP", vec![Some(50.0), Some(110.0), Some(121.0), Some(133.1), Some(146.41)]);

        let result = GrowthRateExtrapolator::new().extrapolate(panel, "FDI_pct_GDP", &[2023, 2024]);

        assert!(result.success());
        assert_eq!(result.description(), "Average growth rate (10.00%)");
        assert_eq!(result.panel.value("FDI_pct_GDP", 2023), Some(161.051));
        assert_eq!(result.panel.value("FDI_pct_GDP", 2024), Some(177.1561));
    }

    #[test]
    fn single_point_uses_default_rate() {
        let panel = Panel::new(vec![2022]).with_column("TAX_pct_GDP", vec![Some(100.0)]);

        let result = GrowthRateExtrapolator::new().extrapolate(panel, "TAX_pct_GDP", &[2023, 2024]);

        assert!(result.success());
        assert_eq!(result.description(), "Average growth rate (3.00%)");
        assert_eq!(result.panel.value("TAX_pct_GDP", 2023), Some(103.0));
        assert_eq!(result.panel.value("TAX_pct_GDP", 2024), Some(106.09));
    }

    #[test]
    fn single_point_rejected_when_disallowed() {
        let config = GrowthConfig { allow_single_point: false, ..GrowthConfig::default() };
        let panel = Panel::new(vec![2022]).with_column("x", vec![Some(100.0)]);

        let result = GrowthRateExtrapolator::with_config(config).extrapolate(panel.clone(), "x", &[2023]);

        assert_eq!(result.description(), "Insufficient data (need 2)");
        assert_eq!(result.panel, panel);
    }

    #[test]
    fn projection_skips_gap_years_correctly() {
        let panel = Panel::new(vec![2019, 2020]).with_column("x", vec![Some(100.0), Some(110.0)]);

        let result = GrowthRateExtrapolator::new().extrapolate(panel, "x", &[2022]);

        // Two periods at 10% from 2020.
        assert_eq!(result.panel.value("x", 2022), Some(133.1));
        assert_eq!(result.panel.value("x", 2021), None);
    }
}
