//! Extrapolation strategy trait definitions.

use solow_math::round_to;
use solow_primitives::{Panel, Year};

/// Reasons a strategy declined or failed to project a series.
///
/// The `Display` output is the method description recorded for failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtrapolationError {
    /// Series absent or entirely unknown.
    #[error("No data")]
    NoData,

    /// Fewer known points than the strategy requires.
    #[error("Insufficient data (need {required})")]
    InsufficientData {
        /// Required number of observations.
        required: usize,
        /// Actual number of observations.
        actual: usize,
    },

    /// Every target year is at or before the last observation.
    #[error("No years to project")]
    NoYearsToProject,

    /// The numerical routine failed.
    #[error("{method} failed: {reason}")]
    FitFailed {
        /// Method that failed.
        method: String,
        /// Error reported by the routine.
        reason: String,
    },
}

impl ExtrapolationError {
    /// Returns whether the failure is due to the data rather than the model.
    #[must_use]
    pub const fn is_data_shortage(&self) -> bool {
        matches!(self, Self::NoData | Self::InsufficientData { .. } | Self::NoYearsToProject)
    }
}

/// Outcome of applying a strategy to one series.
#[derive(Debug, Clone)]
pub struct Extrapolation {
    /// Panel after the attempt; identical to the input on failure.
    pub panel: Panel,
    /// Method description on success, failure reason otherwise.
    pub outcome: Result<String, ExtrapolationError>,
}

impl Extrapolation {
    /// Failed attempt returning the panel unchanged.
    #[must_use]
    pub const fn failed(panel: Panel, error: ExtrapolationError) -> Self {
        Self { panel, outcome: Err(error) }
    }

    /// Whether the series was projected.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Method description, or the failure reason.
    #[must_use]
    pub fn description(&self) -> String {
        match &self.outcome {
            Ok(method) => method.clone(),
            Err(err) => err.to_string(),
        }
    }

    /// Split into `(panel, success, description)`.
    #[must_use]
    pub fn into_parts(self) -> (Panel, bool, String) {
        let success = self.success();
        let description = self.description();
        (self.panel, success, description)
    }
}

/// A forecasting strategy over a single `(year, value)` series.
///
/// Implementors provide [`Extrapolator::forecast`]; the provided
/// [`Extrapolator::extrapolate`] handles the shared preconditions and writes
/// the (non-negative, rounded) forecasts back into the panel.
pub trait Extrapolator: Send + Sync {
    /// Returns the name of this strategy.
    fn name(&self) -> &str;

    /// Minimum number of known points.
    fn min_data_points(&self) -> usize;

    /// Whether `n_points` known points are enough to attempt a forecast.
    fn accepts(&self, n_points: usize) -> bool {
        n_points >= self.min_data_points()
    }

    /// Decimal places of stored forecasts.
    fn decimals(&self) -> u32 {
        4
    }

    /// Forecast `years` from the sorted, non-empty `history`.
    ///
    /// Every year in `years` is strictly after the last historical year.
    ///
    /// # Returns
    /// One raw forecast per year, and the method description.
    ///
    /// # Errors
    /// Returns `ExtrapolationError::FitFailed` if the model cannot be estimated.
    fn forecast(
        &self,
        history: &[(Year, f64)],
        years: &[Year],
    ) -> Result<(Vec<f64>, String), ExtrapolationError>;

    /// Project `column` into those `target_years` after its last known year.
    ///
    /// Rows are appended for target years missing from the panel. On any
    /// failure the panel is returned exactly as received.
    fn extrapolate(&self, mut panel: Panel, column: &str, target_years: &[Year]) -> Extrapolation {
        let history = panel.observations(column);
        let Some(&(last_year, _)) = history.last() else {
            return Extrapolation::failed(panel, ExtrapolationError::NoData);
        };
        if !self.accepts(history.len()) {
            let error = ExtrapolationError::InsufficientData {
                required: self.min_data_points(),
                actual: history.len(),
            };
            return Extrapolation::failed(panel, error);
        }

        let mut years: Vec<Year> = target_years.iter().copied().filter(|&y| y > last_year).collect();
        years.sort_unstable();
        years.dedup();
        if years.is_empty() {
            return Extrapolation::failed(panel, ExtrapolationError::NoYearsToProject);
        }

        let (values, description) = match self.forecast(&history, &years) {
            Ok(result) => result,
            Err(error) => return Extrapolation::failed(panel, error),
        };
        if values.len() != years.len() {
            let error = ExtrapolationError::FitFailed {
                method: self.name().to_string(),
                reason: format!("expected {} forecasts, got {}", years.len(), values.len()),
            };
            return Extrapolation::failed(panel, error);
        }

        panel.append_years(&years);
        for (&year, value) in years.iter().zip(values) {
            panel.set_value(column, year, Some(round_to(value.max(0.0), self.decimals())));
        }
        Extrapolation { panel, outcome: Ok(description) }
    }
}
