//! ARIMA strategy.

use serde::{Deserialize, Serialize};
use solow_math::{ArimaModel, ArimaOrder};
use solow_primitives::Year;
use solow_traits::{ExtrapolationError, Extrapolator};

/// Configuration for the ARIMA strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArimaConfig {
    /// Model order.
    pub order: ArimaOrder,
    /// Minimum number of known points.
    pub min_data_points: usize,
    /// Decimal places of stored forecasts.
    pub decimals: u32,
}

impl Default for ArimaConfig {
    fn default() -> Self {
        Self { order: ArimaOrder::default(), min_data_points: 5, decimals: 4 }
    }
}

/// Fits ARIMA on the known history only and forecasts one step per target year.
#[derive(Debug, Clone, Default)]
pub struct ArimaExtrapolator {
    config: ArimaConfig,
}

impl ArimaExtrapolator {
    /// Create a new ARIMA strategy with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ArimaConfig::default())
    }

    /// Create a new ARIMA strategy with custom configuration.
    #[must_use]
    pub const fn with_config(config: ArimaConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &ArimaConfig {
        &self.config
    }

    /// Description recorded on success, e.g. `ARIMA(1,1,1)`.
    #[must_use]
    pub fn description(&self) -> String {
        format!("ARIMA{}", self.config.order)
    }
}

impl Extrapolator for ArimaExtrapolator {
    fn name(&self) -> &str {
        "ARIMA"
    }

    fn min_data_points(&self) -> usize {
        self.config.min_data_points
    }

    fn decimals(&self) -> u32 {
        self.config.decimals
    }

    fn forecast(
        &self,
        history: &[(Year, f64)],
        years: &[Year],
    ) -> Result<(Vec<f64>, String), ExtrapolationError> {
        let values: Vec<f64> = history.iter().map(|&(_, v)| v).collect();
        let fit_failed = |e: solow_math::MathError| ExtrapolationError::FitFailed {
            method: self.name().to_string(),
            reason: e.to_string(),
        };

        let model = ArimaModel::fit(&values, self.config.order).map_err(fit_failed)?;
        let forecast = model.forecast(years.len()).map_err(fit_failed)?;
        Ok((forecast, self.description()))
    }
}

#[cfg(test)]
mod tests {
    use solow_primitives::Panel;

    use super::*;

    fn gdp_panel() -> Panel {
        let years: Vec<Year> = (2015..=2023).collect();
        let gdp = [100.0, 104.0, 109.0, 113.0, 118.0, 116.0, 124.0, 131.0, 137.0];
        Panel::new(years).with_column("GDP_USD_bn", gdp.iter().map(|&v| Some(v)).collect())
    }

    #[test]
    fn arima_defaults() {
        let strategy = ArimaExtrapolator::new();
        assert_eq!(strategy.config().min_data_points, 5);
        assert_eq!(strategy.description(), "ARIMA(1,1,1)");
    }

    #[test]
    fn projects_target_years_non_negative_rounded() {
        let result = ArimaExtrapolator::new().extrapolate(gdp_panel(), "GDP_USD_bn", &[2024, 2025]);

        assert!(result.success(), "{}", result.description());
        assert_eq!(result.description(), "ARIMA(1,1,1)");
        for year in [2024, 2025] {
            let value = result.panel.value("GDP_USD_bn", year).unwrap();
            assert!(value >= 0.0);
            assert_eq!(value, (value * 1e4).round() / 1e4);
        }
    }

    #[test]
    fn insufficient_history() {
        let panel = Panel::new(vec![2020, 2021, 2022])
            .with_column("GDP_USD_bn", vec![Some(1.0), Some(2.0), Some(3.0)]);

        let result = ArimaExtrapolator::new().extrapolate(panel.clone(), "GDP_USD_bn", &[2023]);

        assert!(!result.success());
        assert_eq!(result.description(), "Insufficient data (need 5)");
        assert_eq!(result.panel, panel);
    }
}
