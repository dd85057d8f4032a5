//! Human-capital index projection.

use serde::{Deserialize, Serialize};
use solow_primitives::{ExtrapolationRecord, Panel, Provenance, Year, names};
use solow_traits::Extrapolator;
use tracing::{debug, warn};

use crate::{LinearRegressionExtrapolator, RegressionConfig};

/// Configuration for the human-capital projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HumanCapitalConfig {
    /// Last projected year.
    pub end_year: Year,
    /// Minimum number of known index values.
    pub min_data_points: usize,
    /// Upper bound of the index.
    pub max_index: f64,
    /// Decimal places of projected values.
    pub decimals: u32,
}

impl Default for HumanCapitalConfig {
    fn default() -> Self {
        Self { end_year: 2025, min_data_points: 2, max_index: 5.0, decimals: 4 }
    }
}

/// Extends `hc` by a linear trend, capped at `max_index`.
#[derive(Debug, Clone, Default)]
pub struct HumanCapitalProjector {
    config: HumanCapitalConfig,
}

impl HumanCapitalProjector {
    /// Create a new projector with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(HumanCapitalConfig::default())
    }

    /// Create a new projector with custom configuration.
    #[must_use]
    pub const fn with_config(config: HumanCapitalConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &HumanCapitalConfig {
        &self.config
    }

    /// Project the human-capital index to the end year.
    ///
    /// A panel without usable `hc` history is returned unchanged with empty
    /// provenance.
    #[must_use]
    pub fn project(&self, panel: Panel) -> (Panel, Provenance) {
        let mut provenance = Provenance::new();
        let Some(last_year) = panel.last_observed_year(names::HUMAN_CAPITAL) else {
            debug!("no human capital data to project");
            return (panel, provenance);
        };
        if last_year >= self.config.end_year {
            return (panel, provenance);
        }

        let years: Vec<Year> = (last_year + 1..=self.config.end_year).collect();
        let regression = LinearRegressionExtrapolator::with_config(RegressionConfig {
            min_data_points: self.config.min_data_points,
            decimals: self.config.decimals,
        });
        let result = regression.extrapolate(panel, names::HUMAN_CAPITAL, &years);
        let (mut panel, success, description) = result.into_parts();
        if !success {
            warn!(reason = %description, "human capital projection failed");
            return (panel, provenance);
        }

        for &year in &years {
            if let Some(value) = panel.value(names::HUMAN_CAPITAL, year)
                && value > self.config.max_index
            {
                panel.set_value(names::HUMAN_CAPITAL, year, Some(self.config.max_index));
            }
        }

        provenance.record(names::HUMAN_CAPITAL, ExtrapolationRecord::new(description, years));
        (panel, provenance)
    }
}
