//! Ordered application of every indicator.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use solow_primitives::Precision;
use solow_traits::{Indicator, IndicatorError};
use tracing::{debug, info, warn};

use crate::{
    DEFAULT_ALPHA, NetExports, Openness, PrivateSaving, PublicSaving, SavingRate, TaxRevenue,
    TfpIndicator, TotalSaving,
};

/// Configuration for the indicator calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Capital share of the Cobb-Douglas production function.
    pub alpha: f64,
    /// Rounding of money amounts and ratios.
    pub precision: Precision,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self { alpha: DEFAULT_ALPHA, precision: Precision::default() }
    }
}

/// Computes every derived indicator on a panel frame.
///
/// Indicators run in dependency order, so tax revenue exists before public
/// saving and total saving before the saving rate. An indicator whose
/// prerequisites are missing leaves an existing output column alone or adds
/// an all-null one, so the output schema is always complete.
#[derive(Debug, Clone, Default)]
pub struct IndicatorCalculator {
    config: IndicatorConfig,
}

impl IndicatorCalculator {
    /// Create a new calculator with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(IndicatorConfig::default())
    }

    /// Create a new calculator with custom configuration.
    #[must_use]
    pub const fn with_config(config: IndicatorConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    /// Indicators in evaluation order.
    #[must_use]
    pub fn indicators(&self) -> Vec<Box<dyn Indicator>> {
        let Precision { currency, ratio, .. } = self.config.precision;
        vec![
            Box::new(NetExports::new(currency)),
            Box::new(TaxRevenue::new(currency)),
            Box::new(Openness::new(ratio)),
            Box::new(TfpIndicator::with_alpha(self.config.alpha)),
            Box::new(TotalSaving::new(currency)),
            Box::new(PublicSaving::new(currency)),
            Box::new(PrivateSaving::new(currency)),
            Box::new(SavingRate::new(ratio)),
        ]
    }

    /// Add every indicator column to `data`.
    ///
    /// # Errors
    /// Returns `IndicatorError::Polars` if an expression fails to evaluate.
    pub fn calculate(&self, mut data: DataFrame) -> Result<DataFrame, IndicatorError> {
        let mut computed = 0;
        for indicator in self.indicators() {
            if let Err(err) = indicator.check(&data) {
                warn!(%err, "indicator skipped");
                data = keep_or_unknown(data, indicator.name())?;
                continue;
            }
            data = indicator.compute(data)?;
            computed += 1;
        }

        info!(computed, total = self.indicators().len(), "indicators calculated");
        Ok(data)
    }
}

/// Keep `name` if present, otherwise add it as an all-null column.
fn keep_or_unknown(data: DataFrame, name: &str) -> Result<DataFrame, IndicatorError> {
    if data.get_column_names().iter().any(|c| c.as_str() == name) {
        debug!(column = name, "keeping supplied values");
        return Ok(data);
    }
    let out = data.lazy().with_column(lit(NULL).cast(DataType::Float64).alias(name)).collect()?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use solow_primitives::names;

    use super::*;

    fn values(out: &DataFrame, name: &str) -> Vec<Option<f64>> {
        out.column(name).unwrap().f64().unwrap().into_iter().collect()
    }

    fn full_frame() -> DataFrame {
        df! {
            names::YEAR => &[2021, 2022, 2023],
            names::GDP => &[1000.0, 1234.56, 987.65],
            names::CONSUMPTION => &[600.0, 700.12, 555.55],
            names::GOVERNMENT => &[200.0, 250.5, 199.99],
            names::EXPORTS => &[300.0, 310.0, 320.0],
            names::IMPORTS => &[280.0, 300.0, 330.0],
            names::TAX_PCT_GDP => &[15.0, 16.0, 17.0],
            names::CAPITAL => &[3000.0, 3100.0, 3200.0],
            names::LABOR_FORCE => &[50.0, 51.0, 52.0],
            names::HUMAN_CAPITAL => &[2.5, 2.6, 2.7],
        }
        .unwrap()
    }

    #[test]
    fn computes_every_indicator() {
        let out = IndicatorCalculator::new().calculate(full_frame()).unwrap();

        for name in [
            names::NET_EXPORTS,
            names::TAX_REVENUE,
            names::OPENNESS,
            names::TFP,
            names::SAVING,
            names::PUBLIC_SAVING,
            names::PRIVATE_SAVING,
            names::SAVING_RATE,
        ] {
            assert!(values(&out, name).iter().all(Option::is_some), "{name}");
        }
        assert_eq!(values(&out, names::NET_EXPORTS), vec![Some(20.0), Some(10.0), Some(-10.0)]);
    }

    #[test]
    fn saving_identities_hold() {
        let out = IndicatorCalculator::new().calculate(full_frame()).unwrap();

        let gdp = values(&out, names::GDP);
        let c = values(&out, names::CONSUMPTION);
        let g = values(&out, names::GOVERNMENT);
        let t = values(&out, names::TAX_REVENUE);
        let rate = values(&out, names::SAVING_RATE);
        let private = values(&out, names::PRIVATE_SAVING);

        for i in 0..gdp.len() {
            let (gdp, c, g, t) = (gdp[i].unwrap(), c[i].unwrap(), g[i].unwrap(), t[i].unwrap());
            assert_relative_eq!(rate[i].unwrap(), 1.0 - (c + g) / gdp, epsilon = 1e-4);
            assert_relative_eq!(private[i].unwrap(), gdp - t - c, epsilon = 0.02);
        }
    }

    #[test]
    fn missing_prerequisites_add_unknown_columns() {
        let df = df! {
            names::YEAR => &[2022, 2023],
            names::GDP => &[100.0, 110.0],
            names::CONSUMPTION => &[60.0, 66.0],
            names::GOVERNMENT => &[20.0, 22.0],
        }
        .unwrap();

        let out = IndicatorCalculator::new().calculate(df).unwrap();

        assert_eq!(values(&out, names::SAVING), vec![Some(20.0), Some(22.0)]);
        assert_eq!(values(&out, names::SAVING_RATE), vec![Some(0.2), Some(0.2)]);
        for name in [names::TFP, names::TAX_REVENUE, names::PUBLIC_SAVING, names::PRIVATE_SAVING, names::OPENNESS] {
            assert_eq!(values(&out, name), vec![None, None], "{name}");
        }
    }

    #[test]
    fn keeps_supplied_column_without_prerequisites() {
        let df = df! {
            names::YEAR => &[2023],
            names::NET_EXPORTS => &[12.5],
        }
        .unwrap();

        let out = IndicatorCalculator::new().calculate(df).unwrap();

        assert_eq!(values(&out, names::NET_EXPORTS), vec![Some(12.5)]);
    }

    #[test]
    fn invalid_alpha_falls_back() {
        let config = IndicatorConfig { alpha: 1.5, ..IndicatorConfig::default() };
        let calculator = IndicatorCalculator::with_config(config);
        let out = calculator.calculate(full_frame()).unwrap();
        let reference = IndicatorCalculator::new().calculate(full_frame()).unwrap();
        assert_eq!(values(&out, names::TFP), values(&reference, names::TFP));
    }
}
