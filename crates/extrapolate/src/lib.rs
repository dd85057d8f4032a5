#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/solow/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod arima;
pub use arima::{ArimaConfig, ArimaExtrapolator};

mod regression;
pub use regression::{LinearRegressionExtrapolator, RegressionConfig};

mod growth;
pub use growth::{GrowthConfig, GrowthRateExtrapolator};

mod class;
pub use class::{DEMOGRAPHIC, GDP_LIKE, Method, SeriesClass};

mod backfill;
pub use backfill::BackfillConfig;

mod dispatcher;
pub use dispatcher::{
    DispatchConfig, DispatchOutput, ExtrapolationDispatcher, FALLBACK_METHOD, GapPlan,
};

mod human_capital;
pub use human_capital::{HumanCapitalConfig, HumanCapitalProjector};

mod merge;
pub use merge::{DEFAULT_PROJECTION_LABEL, ProjectionMerger};

mod error;
pub use error::ExtrapolateError;

/// Re-export commonly used types.
pub mod prelude {
    pub use solow_traits::{Extrapolation, ExtrapolationError, Extrapolator};

    pub use super::{DispatchConfig, ExtrapolationDispatcher, SeriesClass};
}
