//! Tax revenue.

use polars::prelude::*;
use solow_primitives::names;
use solow_traits::Indicator;

/// `T = TAX_pct_GDP / 100 * GDP`.
#[derive(Debug, Clone, Copy)]
pub struct TaxRevenue {
    decimals: u32,
}

impl TaxRevenue {
    /// Create the indicator rounding to `decimals` places.
    #[must_use]
    pub const fn new(decimals: u32) -> Self {
        Self { decimals }
    }
}

impl Indicator for TaxRevenue {
    fn name(&self) -> &str {
        names::TAX_REVENUE
    }

    fn required_columns(&self) -> &[&str] {
        &[names::TAX_PCT_GDP, names::GDP]
    }

    fn expression(&self) -> Expr {
        (col(names::TAX_PCT_GDP) / lit(100.0) * col(names::GDP)).round(self.decimals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tax_revenue_level() {
        let df = df! {
            names::GDP => &[Some(1234.0), None],
            names::TAX_PCT_GDP => &[Some(15.0), Some(20.0)],
        }
        .unwrap();

        let out = TaxRevenue::new(2).compute(df).unwrap();
        let values: Vec<Option<f64>> =
            out.column(names::TAX_REVENUE).unwrap().f64().unwrap().into_iter().collect();

        assert_eq!(values, vec![Some(185.1), None]);
    }
}
