//! Series names and rounding precision.

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// Name of an economic series.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize)]
pub struct SeriesName(pub String);

impl SeriesName {
    /// Create a new series name.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the series name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SeriesName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Well-known series names.
pub mod names {
    /// Year key.
    pub const YEAR: &str = "year";

    /// Nominal GDP, USD billions.
    pub const GDP: &str = "GDP_USD_bn";
    /// Household consumption, USD billions.
    pub const CONSUMPTION: &str = "C_USD_bn";
    /// Government consumption, USD billions.
    pub const GOVERNMENT: &str = "G_USD_bn";
    /// Gross investment, USD billions.
    pub const INVESTMENT: &str = "I_USD_bn";
    /// Exports, USD billions.
    pub const EXPORTS: &str = "X_USD_bn";
    /// Imports, USD billions.
    pub const IMPORTS: &str = "M_USD_bn";
    /// Net exports, USD billions.
    pub const NET_EXPORTS: &str = "NX_USD_bn";

    /// Population, millions.
    pub const POPULATION: &str = "POP_mn";
    /// Labor force, millions.
    pub const LABOR_FORCE: &str = "LF_mn";
    /// Human capital index.
    pub const HUMAN_CAPITAL: &str = "hc";

    /// FDI inflows, percent of GDP.
    pub const FDI_PCT_GDP: &str = "FDI_pct_GDP";
    /// Tax revenue, percent of GDP.
    pub const TAX_PCT_GDP: &str = "TAX_pct_GDP";

    /// Capital stock, USD billions.
    pub const CAPITAL: &str = "K_USD_bn";
    /// Real capital stock index (PWT `rkna`).
    pub const RKNA: &str = "rkna";
    /// GDP price level (PWT `pl_gdpo`).
    pub const PL_GDPO: &str = "pl_gdpo";
    /// Nominal output in baseline units, billions (PWT `cgdpo`).
    pub const CGDPO: &str = "cgdpo_bn";

    /// Total factor productivity.
    pub const TFP: &str = "TFP";
    /// Tax revenue, USD billions.
    pub const TAX_REVENUE: &str = "T_USD_bn";
    /// Trade openness, (X+M)/GDP.
    pub const OPENNESS: &str = "Openness_Ratio";
    /// Total saving, USD billions.
    pub const SAVING: &str = "S_USD_bn";
    /// Private saving, USD billions.
    pub const PRIVATE_SAVING: &str = "S_priv_USD_bn";
    /// Public saving, USD billions.
    pub const PUBLIC_SAVING: &str = "S_pub_USD_bn";
    /// Saving rate, S/GDP.
    pub const SAVING_RATE: &str = "Saving_Rate";
}

/// Decimal places used when storing each class of quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Precision {
    /// Money amounts (USD billions).
    pub currency: u32,
    /// Dimensionless ratios.
    pub ratio: u32,
    /// Statistically projected values.
    pub projection: u32,
}

impl Default for Precision {
    fn default() -> Self {
        Self { currency: 2, ratio: 4, projection: 4 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_name_display() {
        let name = SeriesName::from(names::GDP);
        assert_eq!(name.to_string(), "GDP_USD_bn");
        assert_eq!(name.as_str(), "GDP_USD_bn");
    }

    #[test]
    fn precision_defaults() {
        let precision = Precision::default();
        assert_eq!(precision.currency, 2);
        assert_eq!(precision.ratio, 4);
        assert_eq!(precision.projection, 4);
    }
}
