//! Series classes and their method cascades.

use derive_more::Display;
use solow_primitives::names;

/// Forecasting strategy identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Method {
    /// ARIMA(p,d,q).
    #[display("ARIMA")]
    Arima,
    /// OLS trend on year.
    #[display("Linear regression")]
    LinearRegression,
    /// Average historical growth rate.
    #[display("Average growth rate")]
    GrowthRate,
}

/// Method-preference class of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum SeriesClass {
    /// Volatile expenditure flows: ARIMA first.
    #[display("gdp-like")]
    GdpLike,
    /// Smoothly trending stocks: regression first.
    #[display("demographic")]
    Demographic,
    /// Everything else: growth-rate only.
    #[display("other")]
    Other,
}

/// GDP and its expenditure components.
pub const GDP_LIKE: &[&str] = &[
    names::GDP,
    names::CONSUMPTION,
    names::GOVERNMENT,
    names::INVESTMENT,
    names::EXPORTS,
    names::IMPORTS,
    names::NET_EXPORTS,
];

/// Population, labor force and human capital.
pub const DEMOGRAPHIC: &[&str] = &[names::POPULATION, names::LABOR_FORCE, names::HUMAN_CAPITAL];

impl SeriesClass {
    /// Classify a series by name.
    #[must_use]
    pub fn of(column: &str) -> Self {
        if GDP_LIKE.contains(&column) {
            Self::GdpLike
        } else if DEMOGRAPHIC.contains(&column) {
            Self::Demographic
        } else {
            Self::Other
        }
    }

    /// Methods to try, in order, until one succeeds.
    #[must_use]
    pub const fn cascade(self) -> &'static [Method] {
        match self {
            Self::GdpLike => &[Method::Arima, Method::GrowthRate],
            Self::Demographic => &[Method::LinearRegression, Method::GrowthRate],
            Self::Other => &[Method::GrowthRate],
        }
    }
}
