#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/solow/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

// Vec<f64> arithmetic for the argmin solvers.
use argmin_math as _;

mod linalg;
pub use linalg::{
    LeastSquaresFit, LinearTrend, linear_trend, ordinary_least_squares, weighted_least_squares,
};

mod arima;
pub use arima::{ArimaModel, ArimaOrder, difference_levels};

mod growth;
pub use growth::{average_growth_rate, compound, round_to};

mod error;
pub use error::MathError;
