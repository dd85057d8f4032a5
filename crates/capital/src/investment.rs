//! Investment implied by consecutive capital-stock values.

use serde::{Deserialize, Serialize};
use solow_math::round_to;
use solow_primitives::{Panel, Year, names};
use tracing::warn;

use crate::CapitalError;

/// Configuration for investment inference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvestmentConfig {
    /// Annual depreciation rate.
    pub depreciation_rate: f64,
    /// Negative investment beyond this fraction of `K_t` is clamped to zero.
    pub negative_threshold: f64,
    /// Decimal places of the result.
    pub decimals: u32,
}

impl Default for InvestmentConfig {
    fn default() -> Self {
        Self { depreciation_rate: 0.05, negative_threshold: 0.1, decimals: 2 }
    }
}

/// Inverts the perpetual-inventory equation: `I_t = K_t - (1 - δ) K_{t-1}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvestmentInference {
    config: InvestmentConfig,
}

impl InvestmentInference {
    /// Create a new inference with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(InvestmentConfig::default())
    }

    /// Create a new inference with custom configuration.
    #[must_use]
    pub const fn with_config(config: InvestmentConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &InvestmentConfig {
        &self.config
    }

    /// Infer `I_USD_bn` from the known values of `K_USD_bn`.
    ///
    /// The returned panel has one row per known capital year. Investment is
    /// only defined where the previous calendar year is also known; other
    /// rows stay unknown.
    ///
    /// # Errors
    /// Returns `CapitalError::InsufficientData` for fewer than two known
    /// capital values.
    pub fn infer(&self, panel: &Panel) -> Result<Panel, CapitalError> {
        let capital = panel.observations(names::CAPITAL);
        if capital.len() < 2 {
            return Err(CapitalError::InsufficientData { required: 2, actual: capital.len() });
        }

        let retention = 1.0 - self.config.depreciation_rate;
        let mut investment = vec![None; capital.len()];
        for (i, pair) in capital.windows(2).enumerate() {
            let ((prev_year, prev_k), (year, k)) = (pair[0], pair[1]);
            if year - prev_year != 1 {
                continue;
            }
            investment[i + 1] = Some(self.sanitize(year, k, k - retention * prev_k));
        }

        let years: Vec<Year> = capital.iter().map(|&(year, _)| year).collect();
        Ok(Panel::new(years).with_column(names::INVESTMENT, investment))
    }

    fn sanitize(&self, year: Year, capital: f64, investment: f64) -> f64 {
        let investment = round_to(investment, self.config.decimals);
        if investment >= 0.0 {
            return investment;
        }
        if investment < -self.config.negative_threshold * capital {
            warn!(year, investment, capital, "implausible negative investment clamped to zero");
            0.0
        } else {
            warn!(year, investment, capital, "negative investment");
            investment
        }
    }

    /// Fill unknown `I_USD_bn` cells of `panel` with inferred investment.
    ///
    /// Returns the years that were filled.
    ///
    /// # Errors
    /// Returns `CapitalError::InsufficientData` for fewer than two known
    /// capital values.
    pub fn complete(&self, panel: &mut Panel) -> Result<Vec<Year>, CapitalError> {
        let inferred = self.infer(panel)?;
        panel.ensure_column(names::INVESTMENT);

        let mut filled = Vec::new();
        for (year, value) in inferred.observations(names::INVESTMENT) {
            if panel.value(names::INVESTMENT, year).is_none() {
                panel.set_value(names::INVESTMENT, year, Some(value));
                filled.push(year);
            }
        }
        Ok(filled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capital_panel(years: Vec<Year>, values: Vec<Option<f64>>) -> Panel {
        Panel::new(years).with_column(names::CAPITAL, values)
    }

    fn inference(depreciation_rate: f64) -> InvestmentInference {
        InvestmentInference::with_config(InvestmentConfig { depreciation_rate, ..InvestmentConfig::default() })
    }

    #[test]
    fn consecutive_years() {
        let panel = capital_panel(vec![2019, 2020, 2021], vec![Some(100.0), Some(110.0), Some(121.0)]);

        let result = inference(0.1).infer(&panel).unwrap();

        assert_eq!(result.column(names::INVESTMENT).unwrap(), &[None, Some(20.0), Some(22.0)]);
    }

    #[test]
    fn non_consecutive_years_skipped() {
        let panel = capital_panel(
            vec![2018, 2019, 2020, 2021],
            vec![Some(100.0), None, Some(110.0), Some(121.0)],
        );

        let result = inference(0.1).infer(&panel).unwrap();

        assert_eq!(result.years(), &[2018, 2020, 2021]);
        assert_eq!(result.value(names::INVESTMENT, 2020), None);
        assert_eq!(result.value(names::INVESTMENT, 2021), Some(22.0));
    }

    #[test]
    fn small_negative_kept_large_negative_clamped() {
        // 2020: 95 - 100 = -5 (5% of K, kept); 2021: 50 - 95 = -45 (clamped).
        let panel = capital_panel(vec![2019, 2020, 2021], vec![Some(100.0), Some(95.0), Some(50.0)]);

        let result = inference(0.0).infer(&panel).unwrap();

        assert_eq!(result.value(names::INVESTMENT, 2020), Some(-5.0));
        assert_eq!(result.value(names::INVESTMENT, 2021), Some(0.0));
    }

    #[test]
    fn too_few_points() {
        let panel = capital_panel(vec![2020, 2021], vec![Some(100.0), None]);
        assert_eq!(
            inference(0.05).infer(&panel).unwrap_err(),
            CapitalError::InsufficientData { required: 2, actual: 1 }
        );
    }

    #[test]
    fn complete_fills_only_unknown() {
        let mut panel = capital_panel(vec![2019, 2020, 2021], vec![Some(100.0), Some(110.0), Some(121.0)])
            .with_column(names::INVESTMENT, vec![None, Some(18.0), None]);

        let filled = inference(0.1).complete(&mut panel).unwrap();

        assert_eq!(filled, vec![2021]);
        assert_eq!(panel.value(names::INVESTMENT, 2020), Some(18.0));
        assert_eq!(panel.value(names::INVESTMENT, 2021), Some(22.0));
    }
}
