#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/solow/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod panel;
pub use panel::{Panel, PanelColumn};

mod record;
pub use record::{ExtrapolationRecord, Provenance};

mod series;
pub use series::{Precision, SeriesName, names};

/// Calendar year.
pub type Year = i32;
