//! National saving identities.

use polars::prelude::*;
use solow_primitives::names;
use solow_traits::Indicator;

/// `S = GDP - C - G`.
#[derive(Debug, Clone, Copy)]
pub struct TotalSaving {
    decimals: u32,
}

impl TotalSaving {
    /// Create the indicator rounding to `decimals` places.
    #[must_use]
    pub const fn new(decimals: u32) -> Self {
        Self { decimals }
    }
}

impl Indicator for TotalSaving {
    fn name(&self) -> &str {
        names::SAVING
    }

    fn required_columns(&self) -> &[&str] {
        &[names::GDP, names::CONSUMPTION, names::GOVERNMENT]
    }

    fn expression(&self) -> Expr {
        (col(names::GDP) - col(names::CONSUMPTION) - col(names::GOVERNMENT)).round(self.decimals)
    }
}

/// `S_pub = T - G`.
#[derive(Debug, Clone, Copy)]
pub struct PublicSaving {
    decimals: u32,
}

impl PublicSaving {
    /// Create the indicator rounding to `decimals` places.
    #[must_use]
    pub const fn new(decimals: u32) -> Self {
        Self { decimals }
    }
}

impl Indicator for PublicSaving {
    fn name(&self) -> &str {
        names::PUBLIC_SAVING
    }

    fn required_columns(&self) -> &[&str] {
        &[names::TAX_REVENUE, names::GOVERNMENT]
    }

    fn expression(&self) -> Expr {
        (col(names::TAX_REVENUE) - col(names::GOVERNMENT)).round(self.decimals)
    }
}

/// `S_priv = S - S_pub`, which equals `GDP - T - C`.
#[derive(Debug, Clone, Copy)]
pub struct PrivateSaving {
    decimals: u32,
}

impl PrivateSaving {
    /// Create the indicator rounding to `decimals` places.
    #[must_use]
    pub const fn new(decimals: u32) -> Self {
        Self { decimals }
    }
}

impl Indicator for PrivateSaving {
    fn name(&self) -> &str {
        names::PRIVATE_SAVING
    }

    fn required_columns(&self) -> &[&str] {
        &[names::SAVING, names::PUBLIC_SAVING]
    }

    fn expression(&self) -> Expr {
        (col(names::SAVING) - col(names::PUBLIC_SAVING)).round(self.decimals)
    }
}

/// `Saving_Rate = S / GDP`, unknown where GDP is zero.
#[derive(Debug, Clone, Copy)]
pub struct SavingRate {
    decimals: u32,
}

impl SavingRate {
    /// Create the indicator rounding to `decimals` places.
    #[must_use]
    pub const fn new(decimals: u32) -> Self {
        Self { decimals }
    }
}

impl Indicator for SavingRate {
    fn name(&self) -> &str {
        names::SAVING_RATE
    }

    fn required_columns(&self) -> &[&str] {
        &[names::SAVING, names::GDP]
    }

    fn expression(&self) -> Expr {
        let gdp = col(names::GDP);
        when(gdp.clone().neq(lit(0.0)))
            .then((col(names::SAVING) / gdp).round(self.decimals))
            .otherwise(lit(NULL).cast(DataType::Float64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(out: &DataFrame, name: &str) -> Vec<Option<f64>> {
        out.column(name).unwrap().f64().unwrap().into_iter().collect()
    }

    #[test]
    fn saving_chain() {
        let df = df! {
            names::GDP => &[Some(1000.0), Some(0.0)],
            names::CONSUMPTION => &[Some(600.0), Some(0.0)],
            names::GOVERNMENT => &[Some(200.0), Some(0.0)],
            names::TAX_REVENUE => &[Some(150.0), Some(0.0)],
        }
        .unwrap();

        let df = TotalSaving::new(2).compute(df).unwrap();
        let df = PublicSaving::new(2).compute(df).unwrap();
        let df = PrivateSaving::new(2).compute(df).unwrap();
        let df = SavingRate::new(4).compute(df).unwrap();

        assert_eq!(values(&df, names::SAVING), vec![Some(200.0), Some(0.0)]);
        assert_eq!(values(&df, names::PUBLIC_SAVING), vec![Some(-50.0), Some(0.0)]);
        // GDP - T - C = 1000 - 150 - 600
        assert_eq!(values(&df, names::PRIVATE_SAVING), vec![Some(250.0), Some(0.0)]);
        assert_eq!(values(&df, names::SAVING_RATE), vec![Some(0.2), None]);
    }
}
