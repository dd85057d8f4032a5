//! Perpetual-inventory projection of the capital stock.

use serde::{Deserialize, Serialize};
use solow_math::round_to;
use solow_primitives::{ExtrapolationRecord, Panel, Provenance, Year, names};
use tracing::{debug, info};

use crate::CapitalError;

/// Provenance label of projected capital.
pub const PROJECTION_METHOD: &str = "Investment-based projection";

/// Configuration for the capital projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Annual depreciation rate.
    pub depreciation_rate: f64,
    /// Last projected year.
    pub end_year: Year,
    /// Growth applied to the previous year's investment when a year's is unknown.
    pub investment_growth: f64,
    /// Decimal places of projected capital.
    pub decimals: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self { depreciation_rate: 0.05, end_year: 2025, investment_growth: 0.05, decimals: 2 }
    }
}

/// Extends `K_USD_bn` with `K_t = (1 - δ) K_{t-1} + I_t`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapitalProjector {
    config: ProjectionConfig,
}

impl CapitalProjector {
    /// Create a new projector with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ProjectionConfig::default())
    }

    /// Create a new projector with custom configuration.
    #[must_use]
    pub const fn with_config(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Project capital from its last positive value to the end year.
    ///
    /// A year with unknown investment uses the previous year's investment
    /// grown by `investment_growth`, or the last known investment when the
    /// previous year is unknown too. Rows are appended as needed.
    ///
    /// # Errors
    /// Returns `CapitalError::NoValidCapital` if no positive capital value
    /// exists, and `CapitalError::NoInvestment` if investment is never known.
    pub fn project(&self, mut panel: Panel) -> Result<(Panel, Provenance), CapitalError> {
        let mut provenance = Provenance::new();
        let end_year = self.config.end_year;

        if panel.max_year().is_some_and(|max| max >= end_year)
            && panel.value(names::CAPITAL, end_year).is_some()
        {
            debug!(end_year, "capital already reaches end year");
            return Ok((panel, provenance));
        }

        let (last_year, last_capital) = panel
            .observations(names::CAPITAL)
            .into_iter()
            .rev()
            .find(|&(_, k)| k > 0.0)
            .ok_or(CapitalError::NoValidCapital)?;
        if last_year >= end_year {
            return Ok((panel, provenance));
        }

        let investment = panel.observations(names::INVESTMENT);
        let last_known = investment
            .iter()
            .rev()
            .find(|&&(year, _)| year <= last_year)
            .or_else(|| investment.first())
            .map(|&(_, value)| value)
            .ok_or(CapitalError::NoInvestment)?;

        let years: Vec<Year> = (last_year + 1..=end_year).collect();
        panel.append_years(&years);

        let retention = 1.0 - self.config.depreciation_rate;
        let mut capital = last_capital;
        let mut last_investment = last_known;
        let mut previous = panel.value(names::INVESTMENT, last_year);

        for &year in &years {
            let current = panel.value(names::INVESTMENT, year).unwrap_or_else(|| {
                previous.map_or(last_investment, |prev| prev * (1.0 + self.config.investment_growth))
            });
            capital = round_to((retention * capital + current).max(0.0), self.config.decimals);
            panel.set_value(names::CAPITAL, year, Some(capital));

            last_investment = current;
            previous = Some(current);
        }

        info!(from = last_year + 1, to = end_year, capital, "capital stock projected");
        provenance.record(names::CAPITAL, ExtrapolationRecord::new(PROJECTION_METHOD, years));
        Ok((panel, provenance))
    }
}
