#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/solow/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod tfp;
pub use tfp::{DEFAULT_ALPHA, TfpIndicator};

mod trade;
pub use trade::{NetExports, Openness};

mod fiscal;
pub use fiscal::TaxRevenue;

mod saving;
pub use saving::{PrivateSaving, PublicSaving, SavingRate, TotalSaving};

mod calculator;
pub use calculator::{IndicatorCalculator, IndicatorConfig};
