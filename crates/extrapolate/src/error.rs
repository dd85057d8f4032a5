//! Error types for extrapolation configuration.

/// Errors raised while configuring the extrapolation engine.
#[derive(Debug, thiserror::Error)]
pub enum ExtrapolateError {
    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Panel has no rows.
    #[error("panel has no rows")]
    EmptyPanel,
}

impl ExtrapolateError {
    /// Returns whether this error is recoverable.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::EmptyPanel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ExtrapolateError::InvalidConfig("lookback must be positive".to_string());
        assert!(err.to_string().contains("lookback"));
    }

    #[test]
    fn error_is_recoverable() {
        assert!(ExtrapolateError::EmptyPanel.is_recoverable());
        assert!(!ExtrapolateError::InvalidConfig(String::new()).is_recoverable());
    }
}
