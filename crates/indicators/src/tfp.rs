//! Cobb-Douglas total factor productivity.

use polars::prelude::*;
use solow_primitives::names;
use solow_traits::Indicator;
use tracing::warn;

/// Capital share used when the configured one is outside (0, 1).
pub const DEFAULT_ALPHA: f64 = 0.3;

/// `TFP = Y / (K^α (L h)^(1-α))`.
///
/// Rows need `K`, `LF` and `hc` strictly positive and `GDP >= 0`. A zero
/// GDP gives exactly zero TFP; every other row is unknown.
#[derive(Debug, Clone, Copy)]
pub struct TfpIndicator {
    alpha: f64,
}

impl TfpIndicator {
    /// Create a TFP indicator with the default capital share.
    #[must_use]
    pub const fn new() -> Self {
        Self { alpha: DEFAULT_ALPHA }
    }

    /// Create a TFP indicator, falling back to [`DEFAULT_ALPHA`] when `alpha`
    /// is not strictly between 0 and 1.
    #[must_use]
    pub fn with_alpha(alpha: f64) -> Self {
        if alpha > 0.0 && alpha < 1.0 {
            Self { alpha }
        } else {
            warn!(alpha, default = DEFAULT_ALPHA, "capital share outside (0, 1), using default");
            Self::new()
        }
    }

    /// Capital share in use.
    #[must_use]
    pub const fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl Default for TfpIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl Indicator for TfpIndicator {
    fn name(&self) -> &str {
        names::TFP
    }

    fn required_columns(&self) -> &[&str] {
        &[names::GDP, names::CAPITAL, names::LABOR_FORCE, names::HUMAN_CAPITAL]
    }

    fn expression(&self) -> Expr {
        let gdp = col(names::GDP);
        let capital = col(names::CAPITAL);
        let labor = col(names::LABOR_FORCE);
        let hc = col(names::HUMAN_CAPITAL);

        let valid = capital
            .clone()
            .gt(lit(0.0))
            .and(labor.clone().gt(lit(0.0)))
            .and(hc.clone().gt(lit(0.0)))
            .and(gdp.clone().gt_eq(lit(0.0)));

        let denominator =
            capital.pow(lit(self.alpha)) * (labor * hc).pow(lit(1.0 - self.alpha));

        when(valid.clone().and(gdp.clone().gt(lit(0.0))))
            .then(gdp.clone() / denominator)
            .when(valid.and(gdp.eq(lit(0.0))))
            .then(lit(0.0))
            .otherwise(lit(NULL).cast(DataType::Float64))
    }
}
