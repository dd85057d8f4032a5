//! # solow
//!
//! Builds a complete yearly growth-accounting panel for one country.
//!
//! Given partially observed national-accounts, demographic and Penn World
//! Table series, the pipeline extends every series to a target year, derives
//! a dollar capital stock and projects it forward, then computes TFP and the
//! saving identities. Every filled value is traced in a provenance map.
//!
//! ## Features
//!
//! - `full` (default): Enables all components
//! - `cli` (default): The `solow` binary
//! - `primitives`: Panel and provenance types
//! - `traits`: Extrapolator and indicator contracts
//! - `math`: Least squares, ARIMA and growth helpers
//! - `extrapolate`: Method cascade and dispatcher
//! - `capital`: Capital stock calculation and projection
//! - `indicators`: TFP and saving indicators
//! - `utils`: Data frame conversion and CSV I/O
//! - `pipeline`: End-to-end orchestration
//!
//! ## Example
//!
//! ```rust,ignore
//! use solow::pipeline::{Pipeline, PipelineConfig};
//! use solow::utils::read_panel;
//!
//! let pipeline = Pipeline::new(PipelineConfig::default())?;
//! let output = pipeline.run(read_panel("country.csv")?, None)?;
//! ```

#![doc(
    html_logo_url = "https://raw.githubusercontent.com/factordynamics/solow/main/assets/logo.png",
    html_favicon_url = "https://raw.githubusercontent.com/factordynamics/solow/main/assets/favicon.ico"
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Used by the binary only.
#[cfg(feature = "cli")]
use {serde_json as _, tracing as _, tracing_subscriber as _};

#[cfg(feature = "primitives")]
#[doc(inline)]
pub use solow_primitives as primitives;
#[cfg(feature = "traits")]
#[doc(inline)]
pub use solow_traits as traits;
#[cfg(feature = "math")]
#[doc(inline)]
pub use solow_math as math;
#[cfg(feature = "extrapolate")]
#[doc(inline)]
pub use solow_extrapolate as extrapolate;
#[cfg(feature = "capital")]
#[doc(inline)]
pub use solow_capital as capital;
#[cfg(feature = "indicators")]
#[doc(inline)]
pub use solow_indicators as indicators;
#[cfg(feature = "utils")]
#[doc(inline)]
pub use solow_utils as utils;
#[cfg(feature = "pipeline")]
#[doc(inline)]
pub use solow_pipeline as pipeline;
