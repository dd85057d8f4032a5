//! Error types for the pipeline.

use solow_extrapolate::ExtrapolateError;
use solow_traits::IndicatorError;
use solow_utils::UtilsError;

/// Errors that abort a pipeline run.
///
/// Stage-level failures (a strategy that cannot fit, a missing baseline
/// year) are logged and contained; only configuration, I/O and data-frame
/// failures surface here.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Input panel has no rows.
    #[error("input panel is empty")]
    EmptyInput,

    /// Extrapolation configuration error.
    #[error("extrapolation error: {0}")]
    Extrapolate(#[from] ExtrapolateError),

    /// Indicator evaluation error.
    #[error("indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    /// Data frame conversion error.
    #[error("data error: {0}")]
    Utils(#[from] UtilsError),
}

impl PipelineError {
    /// Returns whether this error is recoverable.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::EmptyInput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PipelineError::InvalidConfig("end_year 1990 out of range".to_string());
        assert!(err.to_string().contains("1990"));
    }

    #[test]
    fn error_is_recoverable() {
        assert!(PipelineError::EmptyInput.is_recoverable());
        assert!(!PipelineError::InvalidConfig(String::new()).is_recoverable());
    }
}
