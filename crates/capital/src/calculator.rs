//! Capital stock in USD from an index-form series.

use serde::{Deserialize, Serialize};
use solow_math::round_to;
use solow_primitives::{Panel, names};
use tracing::{info, warn};

use crate::{BaselineAnchor, BaselineConfig, CapitalError};

/// Configuration for the capital-stock calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapitalConfig {
    /// Capital-to-output ratio in the baseline year.
    pub capital_output_ratio: f64,
    /// Baseline year search.
    pub baseline: BaselineConfig,
    /// Decimal places of the result.
    pub decimals: u32,
}

impl Default for CapitalConfig {
    fn default() -> Self {
        Self { capital_output_ratio: 3.0, baseline: BaselineConfig::default(), decimals: 2 }
    }
}

/// Rebases `rkna` into a `K_USD_bn` series anchored at one baseline year.
///
/// `K_t = (rkna_t / rkna_b) * (pl_gdpo_t / pl_gdpo_b) * cgdpo_b * ratio`
#[derive(Debug, Clone, Default)]
pub struct CapitalStockCalculator {
    config: CapitalConfig,
}

impl CapitalStockCalculator {
    /// Create a new calculator with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CapitalConfig::default())
    }

    /// Create a new calculator with custom configuration.
    #[must_use]
    pub const fn with_config(config: CapitalConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &CapitalConfig {
        &self.config
    }

    /// Compute `K_USD_bn` for every row with both `rkna` and `pl_gdpo` known.
    ///
    /// A panel lacking any of `rkna`, `pl_gdpo` or `cgdpo_bn` gets an
    /// all-unknown `K_USD_bn` column.
    ///
    /// # Errors
    /// Returns `CapitalError::NoBaselineYear` if no baseline year can be found,
    /// and `CapitalError::InvalidConfig` for a non-positive ratio.
    pub fn calculate(&self, mut panel: Panel) -> Result<Panel, CapitalError> {
        if !(self.config.capital_output_ratio.is_finite() && self.config.capital_output_ratio > 0.0) {
            return Err(CapitalError::InvalidConfig(format!(
                "capital_output_ratio must be positive, got {}",
                self.config.capital_output_ratio
            )));
        }

        let missing: Vec<&str> = [names::RKNA, names::PL_GDPO, names::CGDPO]
            .into_iter()
            .filter(|name| !panel.has_column(name))
            .collect();
        if !missing.is_empty() {
            warn!(columns = ?missing, "capital stock inputs missing");
            panel.set_column(names::CAPITAL, vec![None; panel.height()]);
            return Ok(panel);
        }

        let anchor =
            BaselineAnchor::locate(&panel, &self.config.baseline, self.config.capital_output_ratio)?;
        info!(year = anchor.year, capital = anchor.capital, "capital stock baseline");

        let capital: Vec<Option<f64>> = panel
            .years()
            .iter()
            .map(|&year| {
                let rkna = panel.value(names::RKNA, year)?;
                let pl_gdpo = panel.value(names::PL_GDPO, year)?;
                let k = (rkna / anchor.rkna) * (pl_gdpo / anchor.pl_gdpo) * anchor.capital;
                k.is_finite().then(|| round_to(k, self.config.decimals))
            })
            .collect();

        panel.set_column(names::CAPITAL, capital);
        Ok(panel)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn pwt_panel() -> Panel {
        Panel::new(vec![2016, 2017, 2018, 2019])
            .with_column(names::RKNA, vec![Some(0.9), Some(1.0), Some(1.1), None])
            .with_column(names::PL_GDPO, vec![Some(1.0), Some(1.0), Some(1.2), Some(1.3)])
            .with_column(names::CGDPO, vec![Some(900.0), Some(1000.0), Some(1100.0), Some(1200.0)])
    }

    #[test]
    fn rebases_around_baseline() {
        let panel = CapitalStockCalculator::new().calculate(pwt_panel()).unwrap();

        assert_eq!(panel.value(names::CAPITAL, 2017), Some(3000.0));
        assert_eq!(panel.value(names::CAPITAL, 2016), Some(2700.0));
        assert_relative_eq!(panel.value(names::CAPITAL, 2018).unwrap(), 3960.0, epsilon = 1e-9);
        assert_eq!(panel.value(names::CAPITAL, 2019), None);
    }

    #[test]
    fn missing_inputs_give_unknown_column() {
        let panel = pwt_panel();
        let panel = Panel::new(panel.years().to_vec())
            .with_column(names::RKNA, panel.column(names::RKNA).unwrap().to_vec());

        let panel = CapitalStockCalculator::new().calculate(panel).unwrap();

        assert!(panel.has_column(names::CAPITAL));
        assert!(panel.is_all_unknown(names::CAPITAL));
    }

    #[test]
    fn no_baseline_is_an_error() {
        let panel = Panel::new(vec![2000, 2001])
            .with_column(names::RKNA, vec![Some(1.0); 2])
            .with_column(names::PL_GDPO, vec![Some(1.0); 2])
            .with_column(names::CGDPO, vec![Some(1.0); 2]);

        let err = CapitalStockCalculator::new().calculate(panel).unwrap_err();
        assert!(matches!(err, CapitalError::NoBaselineYear { .. }));
    }

    #[test]
    fn rejects_non_positive_ratio() {
        let config = CapitalConfig { capital_output_ratio: 0.0, ..CapitalConfig::default() };
        let err = CapitalStockCalculator::with_config(config).calculate(pwt_panel()).unwrap_err();
        assert!(matches!(err, CapitalError::InvalidConfig(_)));
    }
}
