#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/solow/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod baseline;
pub use baseline::{BaselineAnchor, BaselineConfig, select_baseline_year};

mod calculator;
pub use calculator::{CapitalConfig, CapitalStockCalculator};

mod investment;
pub use investment::{InvestmentConfig, InvestmentInference};

mod projector;
pub use projector::{CapitalProjector, PROJECTION_METHOD, ProjectionConfig};

mod error;
pub use error::CapitalError;
