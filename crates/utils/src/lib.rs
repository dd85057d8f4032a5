#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/solow/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod frame;
pub use frame::{panel_from_frame, panel_to_frame};

mod csv;
pub use csv::{read_csv, read_panel, write_csv, write_panel};

mod error;
pub use error::UtilsError;
