//! Error types for capital-stock computations.

use solow_primitives::Year;

/// Errors raised by capital-stock calculation, inference and projection.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CapitalError {
    /// No usable baseline year in the search window.
    #[error("no valid baseline year in {start}..={end}")]
    NoBaselineYear {
        /// First year of the search window.
        start: Year,
        /// Last year of the search window.
        end: Year,
    },

    /// Too few known capital values.
    #[error("insufficient capital data: need {required}, got {actual}")]
    InsufficientData {
        /// Required number of observations.
        required: usize,
        /// Actual number of observations.
        actual: usize,
    },

    /// No positive capital value to project from.
    #[error("no valid capital stock value to project from")]
    NoValidCapital,

    /// No investment value to drive the projection.
    #[error("no investment data available for projection")]
    NoInvestment,

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CapitalError {
    /// Returns whether this error is recoverable.
    ///
    /// Every variant except a bad configuration leaves the input usable as is.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InvalidConfig(_))
    }
}
