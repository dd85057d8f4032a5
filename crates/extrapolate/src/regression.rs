//! Linear regression strategy.

use serde::{Deserialize, Serialize};
use solow_math::linear_trend;
use solow_primitives::Year;
use solow_traits::{ExtrapolationError, Extrapolator};

/// Configuration for the linear regression strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegressionConfig {
    /// Minimum number of known points.
    pub min_data_points: usize,
    /// Decimal places of stored forecasts.
    pub decimals: u32,
}

impl Default for RegressionConfig {
    fn default() -> Self {
        Self { min_data_points: 2, decimals: 4 }
    }
}

/// OLS of value on year, evaluated at each target year.
#[derive(Debug, Clone, Default)]
pub struct LinearRegressionExtrapolator {
    config: RegressionConfig,
}

impl LinearRegressionExtrapolator {
    /// Create a new regression strategy with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RegressionConfig::default())
    }

    /// Create a new regression strategy with custom configuration.
    #[must_use]
    pub const fn with_config(config: RegressionConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &RegressionConfig {
        &self.config
    }
}

impl Extrapolator for LinearRegressionExtrapolator {
    fn name(&self) -> &str {
        "Linear regression"
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
        let x: Vec<f64> = history.iter().map(|&(year, _)| f64::from(year)).collect();
        let y: Vec<f64> = history.iter().map(|&(_, value)| value).collect();

        let trend = linear_trend(&x, &y).map_err(|e| ExtrapolationError::FitFailed {
            method: self.name().to_string(),
            reason: e.to_string(),
        })?;

        let forecast = years.iter().map(|&year| trend.predict(f64::from(year))).collect();
        Ok((forecast, self.name().to_string()))
    }
}
