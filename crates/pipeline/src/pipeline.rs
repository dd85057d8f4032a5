//! Stage orchestration.

use polars::prelude::DataFrame;
use solow_capital::{CapitalProjector, CapitalStockCalculator, InvestmentInference};
use solow_extrapolate::{ExtrapolationDispatcher, HumanCapitalProjector, ProjectionMerger};
use solow_indicators::IndicatorCalculator;
use solow_primitives::{Panel, Provenance, names};
use solow_utils::panel_to_frame;
use tracing::{info, warn};

use crate::{PipelineConfig, PipelineError};

/// Result of a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Extended base series, before indicators.
    pub panel: Panel,
    /// Extended panel with every indicator column.
    pub frame: DataFrame,
    /// How each filled series was produced.
    pub provenance: Provenance,
}

/// Runs every stage in dependency order:
///
/// 1. capital stock from the PWT index
/// 2. historical investment implied by the capital stock
/// 3. human-capital projection
/// 4. external projections merge
/// 5. per-series extrapolation to the end year
/// 6. capital projection from the extrapolated investment
/// 7. derived indicators
///
/// A failing stage is logged and skipped, leaving the panel as it was.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline, validating the configuration.
    ///
    /// # Errors
    /// Returns `PipelineError::InvalidConfig` if the configuration is invalid.
    pub fn new(mut config: PipelineConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every stage over `input`.
    ///
    /// `projections` is an optional panel of external forecasts merged before
    /// extrapolation.
    ///
    /// # Errors
    /// Returns `PipelineError::EmptyInput` for an empty panel and a data error
    /// if the output frame cannot be built.
    pub fn run(&self, input: Panel, projections: Option<&Panel>) -> Result<PipelineOutput, PipelineError> {
        if input.is_empty() {
            return Err(PipelineError::EmptyInput);
        }
        let config = &self.config;
        let raw = input.clone();
        let mut panel = input;
        panel.dedup_years();
        panel.sort_by_year();
        let mut provenance = Provenance::new();

        let has_pwt = [names::RKNA, names::PL_GDPO, names::CGDPO].iter().all(|c| panel.has_column(c));
        if has_pwt || panel.is_all_unknown(names::CAPITAL) {
            panel = match CapitalStockCalculator::with_config(config.capital_config()).calculate(panel.clone()) {
                Ok(panel) => panel,
                Err(err) => {
                    warn!(%err, "capital stock calculation skipped");
                    panel
                }
            };
        } else {
            info!("using supplied capital stock");
        }

        if panel.observations(names::CAPITAL).len() >= 2 {
            match InvestmentInference::with_config(config.investment_config()).complete(&mut panel) {
                Ok(years) if !years.is_empty() => info!(?years, "historical investment completed"),
                Ok(_) => {}
                Err(err) => warn!(%err, "investment inference skipped"),
            }
        }

        let (next, stage) = HumanCapitalProjector::with_config(config.human_capital_config()).project(panel);
        panel = next;
        provenance = provenance.merge(stage);

        if let Some(projections) = projections {
            let merger = ProjectionMerger::new(config.projection_label.clone(), config.end_year);
            let (next, stage) = merger.merge(panel, projections);
            panel = next;
            provenance = provenance.merge(stage);
        }

        let dispatched = ExtrapolationDispatcher::with_config(config.dispatch_config()).dispatch(panel, Some(&raw));
        panel = dispatched.panel;
        // The dispatcher spans every year after the raw data, including
        // cells the projection merge filled.
        provenance = provenance.overlay(dispatched.provenance);

        panel = match CapitalProjector::with_config(config.projection_config()).project(panel.clone()) {
            Ok((next, stage)) => {
                provenance = provenance.merge(stage);
                next
            }
            Err(err) => {
                warn!(%err, "capital projection skipped");
                panel
            }
        };

        let frame = panel_to_frame(&panel)?;
        let frame = IndicatorCalculator::with_config(config.indicator_config()).calculate(frame)?;

        info!(
            rows = frame.height(),
            columns = frame.width(),
            extrapolated = provenance.len(),
            "pipeline complete"
        );
        Ok(PipelineOutput { panel, frame, provenance })
    }
}
