//! Pipeline configuration.

use std::path::Path;

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use solow_capital::{
    BaselineConfig, CapitalConfig, InvestmentConfig, ProjectionConfig,
};
use solow_extrapolate::{
    ArimaConfig, BackfillConfig, DEFAULT_PROJECTION_LABEL, DispatchConfig, GrowthConfig,
    HumanCapitalConfig, RegressionConfig,
};
use solow_indicators::{DEFAULT_ALPHA, IndicatorConfig};
use solow_primitives::{Precision, Year, names};
use tracing::warn;

use crate::PipelineError;

/// Years before the current year accepted as an end year.
const END_YEAR_PAST: Year = 5;

/// Years after the current year accepted as an end year.
const END_YEAR_FUTURE: Year = 30;

/// Every tunable of a pipeline run.
///
/// Missing TOML keys take their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Last year every series is extended to.
    pub end_year: Year,
    /// Capital share of output.
    pub alpha: f64,
    /// Capital-to-output ratio in the baseline year.
    pub capital_output_ratio: f64,
    /// Annual depreciation rate.
    pub depreciation_rate: f64,
    /// Baseline year search for the capital stock.
    pub baseline: BaselineConfig,
    /// Negative investment beyond this fraction of capital is clamped.
    pub negative_investment_threshold: f64,
    /// Growth applied to missing investment during capital projection.
    pub investment_growth: f64,
    /// Upper bound of the projected human-capital index.
    pub human_capital_max: f64,
    /// ARIMA strategy settings.
    pub arima: ArimaConfig,
    /// Linear regression strategy settings.
    pub regression: RegressionConfig,
    /// Growth-rate strategy settings.
    pub growth: GrowthConfig,
    /// Residual back-fill settings.
    pub backfill: BackfillConfig,
    /// Rounding per quantity class.
    pub precision: Precision,
    /// Provenance label of external projections.
    pub projection_label: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            end_year: 2025,
            alpha: DEFAULT_ALPHA,
            capital_output_ratio: 3.0,
            depreciation_rate: 0.05,
            baseline: BaselineConfig::default(),
            negative_investment_threshold: 0.1,
            investment_growth: 0.05,
            human_capital_max: 5.0,
            arima: ArimaConfig::default(),
            regression: RegressionConfig::default(),
            growth: GrowthConfig::default(),
            backfill: BackfillConfig::default(),
            precision: Precision::default(),
            projection_label: DEFAULT_PROJECTION_LABEL.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Parse a TOML document.
    ///
    /// # Errors
    /// Returns `PipelineError::ConfigParse` on malformed TOML.
    pub fn from_toml_str(s: &str) -> Result<Self, PipelineError> {
        Ok(toml::from_str(s)?)
    }

    /// Load a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Validate against the current calendar year.
    ///
    /// # Errors
    /// See [`PipelineConfig::validate_at`].
    pub fn validate(&mut self) -> Result<(), PipelineError> {
        self.validate_at(Utc::now().year())
    }

    /// Validate against `current_year`.
    ///
    /// An `alpha` outside (0, 1) is replaced by the default with a warning.
    ///
    /// # Errors
    /// Returns `PipelineError::InvalidConfig` for a non-positive capital-output
    /// ratio, a depreciation rate outside [0, 1), an end year outside
    /// `[current_year - 5, current_year + 30]`, or invalid strategy settings.
    pub fn validate_at(&mut self, current_year: Year) -> Result<(), PipelineError> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            warn!(alpha = self.alpha, default = DEFAULT_ALPHA, "alpha outside (0, 1), using default");
            self.alpha = DEFAULT_ALPHA;
        }
        if !(self.capital_output_ratio.is_finite() && self.capital_output_ratio > 0.0) {
            return Err(PipelineError::InvalidConfig(format!(
                "capital_output_ratio must be positive, got {}",
                self.capital_output_ratio
            )));
        }
        if !(0.0..1.0).contains(&self.depreciation_rate) {
            return Err(PipelineError::InvalidConfig(format!(
                "depreciation_rate must be in [0, 1), got {}",
                self.depreciation_rate
            )));
        }
        let (earliest, latest) = (current_year - END_YEAR_PAST, current_year + END_YEAR_FUTURE);
        if !(earliest..=latest).contains(&self.end_year) {
            return Err(PipelineError::InvalidConfig(format!(
                "end_year {} outside {earliest}..={latest}",
                self.end_year
            )));
        }
        if self.baseline.window.0 > self.baseline.window.1 {
            return Err(PipelineError::InvalidConfig(format!(
                "baseline window {:?} is empty",
                self.baseline.window
            )));
        }
        self.dispatch_config().validate()?;
        Ok(())
    }

    /// Dispatcher settings; the capital stock is left to the projector.
    #[must_use]
    pub fn dispatch_config(&self) -> DispatchConfig {
        let decimals = self.precision.projection;
        DispatchConfig {
            end_year: self.end_year,
            arima: ArimaConfig { decimals, ..self.arima.clone() },
            regression: RegressionConfig { decimals, ..self.regression.clone() },
            growth: GrowthConfig { decimals, ..self.growth.clone() },
            backfill: BackfillConfig { decimals, ..self.backfill.clone() },
            exclude: vec![names::CAPITAL.to_string()],
        }
    }

    /// Capital-stock calculation settings.
    #[must_use]
    pub fn capital_config(&self) -> CapitalConfig {
        CapitalConfig {
            capital_output_ratio: self.capital_output_ratio,
            baseline: self.baseline,
            decimals: self.precision.currency,
        }
    }

    /// Investment inference settings.
    #[must_use]
    pub const fn investment_config(&self) -> InvestmentConfig {
        InvestmentConfig {
            depreciation_rate: self.depreciation_rate,
            negative_threshold: self.negative_investment_threshold,
            decimals: self.precision.currency,
        }
    }

    /// Capital projection settings.
    #[must_use]
    pub const fn projection_config(&self) -> ProjectionConfig {
        ProjectionConfig {
            depreciation_rate: self.depreciation_rate,
            end_year: self.end_year,
            investment_growth: self.investment_growth,
            decimals: self.precision.currency,
        }
    }

    /// Human-capital projection settings.
    #[must_use]
    pub const fn human_capital_config(&self) -> HumanCapitalConfig {
        HumanCapitalConfig {
            end_year: self.end_year,
            min_data_points: self.regression.min_data_points,
            max_index: self.human_capital_max,
            decimals: self.precision.projection,
        }
    }

    /// Indicator settings.
    #[must_use]
    pub const fn indicator_config(&self) -> IndicatorConfig {
        IndicatorConfig { alpha: self.alpha, precision: self.precision }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use solow_math::ArimaOrder;

    use super::*;

    #[test]
    fn defaults_are_valid() {
        let mut config = PipelineConfig::default();
        assert!(config.validate_at(2025).is_ok());
        assert_eq!(config.dispatch_config().exclude, vec![names::CAPITAL.to_string()]);
    }

    #[test]
    fn projection_precision_feeds_every_strategy() {
        let mut config = PipelineConfig::default();
        config.precision.projection = 2;

        let dispatch = config.dispatch_config();
        assert_eq!(dispatch.arima.decimals, 2);
        assert_eq!(dispatch.regression.decimals, 2);
        assert_eq!(dispatch.growth.decimals, 2);
        assert_eq!(dispatch.backfill.decimals, 2);
        assert_eq!(config.human_capital_config().decimals, 2);
    }

    #[test]
    fn parses_partial_toml() {
        let config = PipelineConfig::from_toml_str(
            r#"
            end_year = 2027
            alpha = 0.35

            [arima]
            order = { p = 2, d = 1, q = 0 }

            [baseline]
            default_year = 2015
            window = [2012, 2018]
            "#,
        )
        .unwrap();

        assert_eq!(config.end_year, 2027);
        assert_eq!(config.alpha, 0.35);
        assert_eq!(config.arima.order, ArimaOrder::new(2, 1, 0));
        assert_eq!(config.arima.min_data_points, 5);
        assert_eq!(config.baseline.window, (2012, 2018));
        assert_eq!(config.depreciation_rate, 0.05);
        assert_eq!(config.precision, Precision::default());
    }

    #[test]
    fn malformed_toml() {
        let err = PipelineConfig::from_toml_str("end_year = \"soon\"").unwrap_err();
        assert!(matches!(err, PipelineError::ConfigParse(_)));
    }

    #[rstest]
    #[case(0.0)]
    #[case(1.0)]
    #[case(7.5)]
    fn alpha_replaced_by_default(#[case] alpha: f64) {
        let mut config = PipelineConfig { alpha, ..PipelineConfig::default() };
        assert!(config.validate_at(2025).is_ok());
        assert_eq!(config.alpha, DEFAULT_ALPHA);
    }

    #[rstest]
    #[case(PipelineConfig { capital_output_ratio: 0.0, ..PipelineConfig::default() })]
    #[case(PipelineConfig { depreciation_rate: 1.0, ..PipelineConfig::default() })]
    #[case(PipelineConfig { depreciation_rate: -0.1, ..PipelineConfig::default() })]
    #[case(PipelineConfig { end_year: 2019, ..PipelineConfig::default() })]
    #[case(PipelineConfig { end_year: 2056, ..PipelineConfig::default() })]
    fn invalid_settings_rejected(#[case] mut config: PipelineConfig) {
        assert!(matches!(config.validate_at(2025), Err(PipelineError::InvalidConfig(_))));
    }

    #[test]
    fn strategy_settings_validated() {
        let mut config = PipelineConfig::default();
        config.growth.lookback = 1;
        assert!(matches!(config.validate_at(2025), Err(PipelineError::Extrapolate(_))));
    }
}
