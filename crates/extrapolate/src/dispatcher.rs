//! Per-column method dispatch with fall-through and residual back-fill.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use solow_primitives::{ExtrapolationRecord, Panel, Provenance, Year};
use solow_traits::Extrapolator;
use tracing::{debug, info, warn};

use crate::backfill::{BackfillConfig, backfill_column};
use crate::{
    ArimaConfig, ArimaExtrapolator, ExtrapolateError, GrowthConfig, GrowthRateExtrapolator,
    LinearRegressionExtrapolator, Method, RegressionConfig, SeriesClass,
};

/// Method recorded for columns filled only by the residual back-fill.
pub const FALLBACK_METHOD: &str = "Extrapolated";

/// Configuration for the extrapolation dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Last year every series is extended to.
    pub end_year: Year,
    /// ARIMA strategy settings.
    pub arima: ArimaConfig,
    /// Linear regression strategy settings.
    pub regression: RegressionConfig,
    /// Growth-rate strategy settings.
    pub growth: GrowthConfig,
    /// Key variables and their residual back-fill settings.
    pub backfill: BackfillConfig,
    /// Columns neither the cascade nor the back-fill may touch.
    pub exclude: Vec<String>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            end_year: 2025,
            arima: ArimaConfig::default(),
            regression: RegressionConfig::default(),
            growth: GrowthConfig::default(),
            backfill: BackfillConfig::default(),
            exclude: Vec::new(),
        }
    }
}

impl DispatchConfig {
    /// Check the strategy parameters.
    ///
    /// # Errors
    /// Returns `ExtrapolateError::InvalidConfig` for zero thresholds or lookbacks,
    /// and for default growth rates at or below -100%.
    pub fn validate(&self) -> Result<(), ExtrapolateError> {
        let invalid = |msg: &str| Err(ExtrapolateError::InvalidConfig(msg.to_string()));

        if self.arima.min_data_points == 0
            || self.regression.min_data_points == 0
            || self.growth.min_data_points == 0
        {
            return invalid("min_data_points must be at least 1");
        }
        if self.growth.lookback < 2 || self.backfill.lookback < 2 {
            return invalid("growth lookback must cover at least 2 points");
        }
        if !self.growth.default_rate.is_finite() || self.growth.default_rate <= -1.0 {
            return invalid("growth default_rate must be above -1");
        }
        if let Some((name, _)) =
            self.backfill.default_rates.iter().find(|(_, r)| !r.is_finite() || **r <= -1.0)
        {
            return Err(ExtrapolateError::InvalidConfig(format!(
                "back-fill default rate for {name} must be above -1"
            )));
        }
        Ok(())
    }

    fn is_excluded(&self, column: &str) -> bool {
        self.exclude.iter().any(|c| c == column)
    }
}

/// Years the dispatcher must make room for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GapPlan {
    /// Panel reaches the end year and every key variable is populated.
    Complete,
    /// Panel reaches the end year but key variables miss the last two years.
    Patch(Vec<Year>),
    /// Panel stops short of the end year.
    Extend(Vec<Year>),
}

impl GapPlan {
    /// Gap years, empty when complete.
    #[must_use]
    pub fn years(&self) -> &[Year] {
        match self {
            Self::Complete => &[],
            Self::Patch(years) | Self::Extend(years) => years,
        }
    }
}

/// Result of a dispatch run.
#[derive(Debug, Clone)]
pub struct DispatchOutput {
    /// Panel extended to the end year.
    pub panel: Panel,
    /// Provenance of every filled column.
    pub provenance: Provenance,
}

/// Extends every series of a panel to the configured end year.
///
/// Each column is tried against the method cascade of its [`SeriesClass`];
/// the first strategy to succeed wins. Key variables still unknown in any gap
/// year are then filled by compounding their recent growth.
#[derive(Debug, Clone, Default)]
pub struct ExtrapolationDispatcher {
    config: DispatchConfig,
    arima: ArimaExtrapolator,
    regression: LinearRegressionExtrapolator,
    growth: GrowthRateExtrapolator,
}

impl ExtrapolationDispatcher {
    /// Create a new dispatcher with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DispatchConfig::default())
    }

    /// Create a new dispatcher with custom configuration.
    #[must_use]
    pub fn with_config(config: DispatchConfig) -> Self {
        Self {
            arima: ArimaExtrapolator::with_config(config.arima.clone()),
            regression: LinearRegressionExtrapolator::with_config(config.regression.clone()),
            growth: GrowthRateExtrapolator::with_config(config.growth.clone()),
            config,
        }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Strategy implementing a method.
    #[must_use]
    pub fn strategy(&self, method: Method) -> &dyn Extrapolator {
        match method {
            Method::Arima => &self.arima,
            Method::LinearRegression => &self.regression,
            Method::GrowthRate => &self.growth,
        }
    }

    /// Key variables present in the panel and not excluded.
    fn key_variables<'a>(&'a self, panel: &'a Panel) -> impl Iterator<Item = &'a str> + 'a {
        self.config
            .backfill
            .key_variables()
            .filter(|name| panel.has_column(name) && !self.config.is_excluded(name))
    }

    /// Decide which years the panel is missing.
    #[must_use]
    pub fn plan(&self, panel: &Panel) -> GapPlan {
        let target = self.config.end_year;
        let Some(max_year) = panel.max_year() else {
            return GapPlan::Complete;
        };

        if max_year < target {
            return GapPlan::Extend((max_year + 1..=target).collect());
        }

        let last_two = [target - 1, target];
        let incomplete: Vec<&str> = self
            .key_variables(panel)
            .filter(|name| last_two.iter().any(|&year| panel.value(name, year).is_none()))
            .collect();

        if incomplete.is_empty() {
            GapPlan::Complete
        } else {
            debug!(columns = ?incomplete, "key variables incomplete in final years");
            GapPlan::Patch(last_two.to_vec())
        }
    }

    /// Extend every column of `panel` to the end year.
    ///
    /// `original` is the raw input the panel was derived from; when it holds a
    /// column, its last observed year bounds that column's provenance span.
    /// Strategy failures never propagate: the affected column simply falls
    /// through to the next method or stays unknown.
    #[must_use]
    pub fn dispatch(&self, mut panel: Panel, original: Option<&Panel>) -> DispatchOutput {
        let target = self.config.end_year;
        let plan = self.plan(&panel);
        if plan == GapPlan::Complete {
            debug!(end_year = target, "panel already complete");
            return DispatchOutput { panel, provenance: Provenance::new() };
        }
        let gap_years = plan.years().to_vec();

        let last_observed: BTreeMap<String, Option<Year>> = panel
            .column_names()
            .into_iter()
            .map(|name| (name.to_string(), panel.last_observed_year(name)))
            .collect();

        panel.append_years(&gap_years);

        let mut methods: BTreeMap<String, String> = BTreeMap::new();
        let mut processed: BTreeSet<String> = BTreeSet::new();

        let columns: Vec<String> = panel.column_names().into_iter().map(str::to_string).collect();
        for column in &columns {
            if self.config.is_excluded(column) {
                continue;
            }
            let Some(last_year) = panel.last_observed_year(column) else {
                debug!(column = %column, "no historical data, skipping cascade");
                continue;
            };
            if last_year >= target {
                continue;
            }

            let years: Vec<Year> = (last_year + 1..=target).collect();
            let class = SeriesClass::of(column);
            for &method in class.cascade() {
                let (next, success, description) =
                    self.strategy(method).extrapolate(panel, column, &years).into_parts();
                panel = next;
                if success {
                    debug!(column = %column, %class, method = %description, "extrapolated");
                    methods.insert(column.clone(), description);
                    break;
                }
                debug!(column = %column, %method, reason = %description, "method failed, falling through");
            }
            if !methods.contains_key(column) {
                warn!(column = %column, %class, "every extrapolation method failed");
            }
            processed.insert(column.clone());
        }

        let key_variables: Vec<String> = self.key_variables(&panel).map(str::to_string).collect();
        for column in key_variables {
            let filled = backfill_column(&mut panel, &column, &gap_years, &self.config.backfill);
            if !filled.is_empty() {
                debug!(column = %column, years = ?filled, "residual back-fill");
                processed.insert(column);
            }
        }

        let mut provenance = Provenance::new();
        for column in &processed {
            let last_actual = original
                .filter(|raw| raw.has_column(column))
                .and_then(|raw| raw.last_observed_year(column))
                .or_else(|| last_observed.get(column).copied().flatten());
            let Some(last_actual) = last_actual else {
                continue;
            };
            if last_actual >= target {
                continue;
            }

            let years: Vec<Year> = (last_actual + 1..=target)
                .filter(|&year| panel.value(column, year).is_some())
                .collect();
            let method = methods.get(column).map_or(FALLBACK_METHOD, String::as_str);
            provenance.record(column.clone(), ExtrapolationRecord::new(method, years));
        }

        info!(
            end_year = target,
            gap_years = gap_years.len(),
            columns = provenance.len(),
            "extrapolation complete"
        );
        DispatchOutput { panel, provenance }
    }
}
