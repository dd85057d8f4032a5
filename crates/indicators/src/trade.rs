//! Trade balance and openness.

use polars::prelude::*;
use solow_primitives::names;
use solow_traits::Indicator;

/// `NX = X - M`.
#[derive(Debug, Clone, Copy)]
pub struct NetExports {
    decimals: u32,
}

impl NetExports {
    /// Create the indicator rounding to `decimals` places.
    #[must_use]
    pub const fn new(decimals: u32) -> Self {
        Self { decimals }
    }
}

impl Indicator for NetExports {
    fn name(&self) -> &str {
        names::NET_EXPORTS
    }

    fn required_columns(&self) -> &[&str] {
        &[names::EXPORTS, names::IMPORTS]
    }

    fn expression(&self) -> Expr {
        (col(names::EXPORTS) - col(names::IMPORTS)).round(self.decimals)
    }
}

/// `Openness = (X + M) / GDP`, unknown where GDP is zero.
#[derive(Debug, Clone, Copy)]
pub struct Openness {
    decimals: u32,
}

impl Openness {
    /// Create the indicator rounding to `decimals` places.
    #[must_use]
    pub const fn new(decimals: u32) -> Self {
        Self { decimals }
    }
}

impl Indicator for Openness {
    fn name(&self) -> &str {
        names::OPENNESS
    }

    fn required_columns(&self) -> &[&str] {
        &[names::EXPORTS, names::IMPORTS, names::GDP]
    }

    fn expression(&self) -> Expr {
        let gdp = col(names::GDP);
        when(gdp.clone().neq(lit(0.0)))
            .then(((col(names::EXPORTS) + col(names::IMPORTS)) / gdp).round(self.decimals))
            .otherwise(lit(NULL).cast(DataType::Float64))
    }
}
