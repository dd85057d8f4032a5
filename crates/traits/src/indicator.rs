//! Derived-indicator trait definitions.

use polars::prelude::*;

/// Errors that can occur while computing an indicator.
#[derive(Debug, thiserror::Error)]
pub enum IndicatorError {
    /// Prerequisite columns are absent.
    #[error("{indicator}: missing required columns {columns:?}")]
    MissingColumns {
        /// Indicator being computed.
        indicator: String,
        /// Absent columns.
        columns: Vec<String>,
    },

    /// Invalid parameter.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Polars error.
    #[error("data processing error: {0}")]
    Polars(#[from] PolarsError),
}

impl IndicatorError {
    /// Returns whether the calculator should substitute an unknown column.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::MissingColumns { .. })
    }
}

/// A derived series computed row-wise from other series.
///
/// Each indicator declares the columns it needs; [`Indicator::compute`]
/// checks them up front so a missing prerequisite surfaces as a typed
/// [`IndicatorError::MissingColumns`] instead of a polars failure.
pub trait Indicator: Send + Sync {
    /// Output column name.
    fn name(&self) -> &str;

    /// Columns that must be present.
    fn required_columns(&self) -> &[&str];

    /// Polars expression computing the indicator. Rows with unknown inputs
    /// must evaluate to null.
    fn expression(&self) -> Expr;

    /// Check that every required column is present.
    ///
    /// # Errors
    /// Returns `IndicatorError::MissingColumns` listing the absent columns.
    fn check(&self, data: &DataFrame) -> Result<(), IndicatorError> {
        let present = data.get_column_names();
        let columns: Vec<String> = self
            .required_columns()
            .iter()
            .filter(|&&name| !present.iter().any(|c| c.as_str() == name))
            .map(|name| (*name).to_string())
            .collect();
        if columns.is_empty() {
            Ok(())
        } else {
            Err(IndicatorError::MissingColumns { indicator: self.name().to_string(), columns })
        }
    }

    /// Add (or replace) the indicator column.
    ///
    /// # Errors
    /// Returns `IndicatorError::MissingColumns` if prerequisites are absent,
    /// or a polars error if evaluation fails.
    fn compute(&self, data: DataFrame) -> Result<DataFrame, IndicatorError> {
        self.check(&data)?;
        let out = data.lazy().with_column(self.expression().alias(self.name())).collect()?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sum;

    impl Indicator for Sum {
        fn name(&self) -> &str {
            "a_plus_b"
        }

        fn required_columns(&self) -> &[&str] {
            &["a", "b"]
        }

        fn expression(&self) -> Expr {
            col("a") + col("b")
        }
    }

    #[test]
    fn compute_adds_column() {
        let df = df! {
            "a" => &[Some(1.0), None],
            "b" => &[Some(2.0), Some(3.0)],
        }
        .unwrap();

        let out = Sum.compute(df).unwrap();
        let values: Vec<Option<f64>> = out.column("a_plus_b").unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some(3.0), None]);
    }

    #[test]
    fn missing_columns_reported() {
        let df = df! { "a" => &[1.0] }.unwrap();

        let err = Sum.compute(df).unwrap_err();
        assert!(err.is_recoverable());
        match err {
            IndicatorError::MissingColumns { indicator, columns } => {
                assert_eq!(indicator, "a_plus_b");
                assert_eq!(columns, vec!["b".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
