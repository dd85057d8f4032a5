//! ARIMA(p,d,q) estimation and forecasting.
//!
//! Parameters are estimated by conditional sum of squares (CSS) on the
//! `d`-times differenced series, minimised with Nelder-Mead. A constant is
//! only estimated for `d == 0`, so integrated models forecast without drift.

use argmin::core::{CostFunction, Error as ArgminError, Executor, State};
use argmin::solver::neldermead::NelderMead;
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::MathError;

/// Cost assigned to parameters outside the stationary/invertible region.
const INADMISSIBLE_COST: f64 = 1e12;

/// Maximum Nelder-Mead iterations.
const MAX_ITERS: u64 = 2_000;

/// Standard-deviation tolerance on simplex costs.
const SD_TOLERANCE: f64 = 1e-12;

/// Order of an ARIMA model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display("({p},{d},{q})")]
pub struct ArimaOrder {
    /// Autoregressive order.
    pub p: usize,
    /// Degree of differencing.
    pub d: usize,
    /// Moving-average order.
    pub q: usize,
}

impl ArimaOrder {
    /// Create a new order triple.
    #[must_use]
    pub const fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }
}

impl Default for ArimaOrder {
    fn default() -> Self {
        Self::new(1, 1, 1)
    }
}

/// A fitted ARIMA model.
#[derive(Debug, Clone)]
pub struct ArimaModel {
    order: ArimaOrder,
    constant: f64,
    ar: Vec<f64>,
    ma: Vec<f64>,
    /// Original series followed by each differenced level; `levels[d]` is
    /// the series the ARMA part was fitted on.
    levels: Vec<Vec<f64>>,
    residuals: Vec<f64>,
    sigma2: f64,
}

impl ArimaModel {
    /// Fit an ARIMA model to `data`.
    ///
    /// # Errors
    /// * `MathError::InsufficientData` if the differenced series is too short
    ///   for the number of parameters.
    /// * `MathError::NumericalInstability` for non-finite input or estimates.
    /// * `MathError::Optimization` if the optimiser fails.
    pub fn fit(data: &[f64], order: ArimaOrder) -> Result<Self, MathError> {
        if data.iter().any(|v| !v.is_finite()) {
            return Err(MathError::NumericalInstability("non-finite observation".to_string()));
        }

        let levels = difference_levels(data, order.d);
        let series = levels.last().map(Vec::as_slice).unwrap_or_default();

        let with_constant = order.d == 0;
        let n_params = order.p + order.q + usize::from(with_constant);
        let required = order.d + order.p + n_params + 1;
        if series.len() <= order.p + n_params || data.len() < required {
            return Err(MathError::InsufficientData { required, actual: data.len() });
        }

        let objective = ConditionalSumOfSquares { series, order, with_constant };

        let (constant, ar, ma) = if n_params == 0 {
            (0.0, Vec::new(), Vec::new())
        } else {
            let best = objective.minimise(n_params)?;
            objective.unpack(&best)
        };

        let residuals = objective.residuals(constant, &ar, &ma);
        let effective = residuals.len().saturating_sub(order.p).max(1);
        let sigma2 = residuals.iter().skip(order.p).map(|e| e * e).sum::<f64>() / effective as f64;

        if !sigma2.is_finite() || ar.iter().chain(&ma).any(|c| !c.is_finite()) {
            return Err(MathError::NumericalInstability("non-finite ARIMA estimates".to_string()));
        }

        Ok(Self { order, constant, ar, ma, levels, residuals, sigma2 })
    }

    /// Model order.
    #[must_use]
    pub const fn order(&self) -> ArimaOrder {
        self.order
    }

    /// Autoregressive coefficients.
    #[must_use]
    pub fn ar_coefficients(&self) -> &[f64] {
        &self.ar
    }

    /// Moving-average coefficients.
    #[must_use]
    pub fn ma_coefficients(&self) -> &[f64] {
        &self.ma
    }

    /// Estimated constant (zero when `d > 0`).
    #[must_use]
    pub const fn constant(&self) -> f64 {
        self.constant
    }

    /// Residual variance.
    #[must_use]
    pub const fn sigma2(&self) -> f64 {
        self.sigma2
    }

    /// Point forecasts for the next `steps` periods, on the original scale.
    ///
    /// # Errors
    /// Returns `MathError::NumericalInstability` if any forecast is non-finite.
    pub fn forecast(&self, steps: usize) -> Result<Vec<f64>, MathError> {
        let Some(series) = self.levels.last() else {
            return Err(MathError::EmptyData);
        };
        let mut values = series.clone();
        let mut errors = self.residuals.clone();
        let mut out = Vec::with_capacity(steps);

        for _ in 0..steps {
            let next = one_step(&values, &errors, self.constant, &self.ar, &self.ma);
            values.push(next);
            errors.push(0.0);
            out.push(next);
        }

        for level in self.levels[..self.order.d].iter().rev() {
            let mut running = level.last().copied().unwrap_or(0.0);
            for value in &mut out {
                running += *value;
                *value = running;
            }
        }

        if out.iter().any(|v| !v.is_finite()) {
            return Err(MathError::NumericalInstability("non-finite ARIMA forecast".to_string()));
        }
        Ok(out)
    }
}

/// Difference a series `d` times, keeping every intermediate level.
#[must_use]
pub fn difference_levels(data: &[f64], d: usize) -> Vec<Vec<f64>> {
    let mut levels = Vec::with_capacity(d + 1);
    levels.push(data.to_vec());
    for k in 0..d {
        let next: Vec<f64> = levels[k].windows(2).map(|w| w[1] - w[0]).collect();
        levels.push(next);
    }
    levels
}

fn one_step(values: &[f64], errors: &[f64], constant: f64, ar: &[f64], ma: &[f64]) -> f64 {
    let n = values.len();
    let mut pred = constant;
    for (i, phi) in ar.iter().enumerate() {
        if let Some(idx) = n.checked_sub(i + 1) {
            pred += phi * values[idx];
        }
    }
    let m = errors.len();
    for (j, theta) in ma.iter().enumerate() {
        if let Some(idx) = m.checked_sub(j + 1) {
            pred += theta * errors[idx];
        }
    }
    pred
}

/// Sufficient condition for stationarity (AR) or invertibility (MA).
fn admissible(coefficients: &[f64]) -> bool {
    coefficients.iter().map(|c| c.abs()).sum::<f64>() < 1.0
}

struct ConditionalSumOfSquares<'a> {
    series: &'a [f64],
    order: ArimaOrder,
    with_constant: bool,
}

impl ConditionalSumOfSquares<'_> {
    fn unpack(&self, params: &[f64]) -> (f64, Vec<f64>, Vec<f64>) {
        let offset = usize::from(self.with_constant);
        let constant = if self.with_constant { params[0] } else { 0.0 };
        let ar = params[offset..offset + self.order.p].to_vec();
        let ma = params[offset + self.order.p..offset + self.order.p + self.order.q].to_vec();
        (constant, ar, ma)
    }

    /// One-step-ahead errors; the first `p` are conditioned to zero.
    fn residuals(&self, constant: f64, ar: &[f64], ma: &[f64]) -> Vec<f64> {
        let mut errors = Vec::with_capacity(self.series.len());
        for t in 0..self.series.len() {
            if t < self.order.p {
                errors.push(0.0);
                continue;
            }
            let pred = one_step(&self.series[..t], &errors, constant, ar, ma);
            errors.push(self.series[t] - pred);
        }
        errors
    }

    fn initial_simplex(&self, n_params: usize) -> Vec<Vec<f64>> {
        let n = self.series.len() as f64;
        let mean = self.series.iter().sum::<f64>() / n;
        let std = (self.series.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();

        let mut start = vec![0.1; n_params];
        let mut steps = vec![0.2; n_params];
        if self.with_constant {
            start[0] = mean;
            steps[0] = std.max(1e-3);
        }

        let mut simplex = Vec::with_capacity(n_params + 1);
        simplex.push(start.clone());
        for (k, step) in steps.iter().enumerate() {
            let mut vertex = start.clone();
            vertex[k] += step;
            simplex.push(vertex);
        }
        simplex
    }

    fn minimise(&self, n_params: usize) -> Result<Vec<f64>, MathError> {
        let solver = NelderMead::new(self.initial_simplex(n_params))
            .with_sd_tolerance(SD_TOLERANCE)
            .map_err(|e| MathError::Optimization(e.to_string()))?;

        let result = Executor::new(self, solver)
            .configure(|state| state.max_iters(MAX_ITERS))
            .run()
            .map_err(|e| MathError::Optimization(e.to_string()))?;

        let state = result.state();
        let best = state
            .get_best_param()
            .cloned()
            .ok_or_else(|| MathError::Optimization("no parameters found".to_string()))?;

        if state.get_best_cost() >= INADMISSIBLE_COST {
            return Err(MathError::Optimization(
                "no stationary and invertible parameters found".to_string(),
            ));
        }
        Ok(best)
    }
}

impl CostFunction for &ConditionalSumOfSquares<'_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, params: &Self::Param) -> Result<Self::Output, ArgminError> {
        let (constant, ar, ma) = self.unpack(params);
        if !admissible(&ar) || !admissible(&ma) {
            let excess = ar.iter().chain(&ma).map(|c| c.abs()).sum::<f64>();
            return Ok(INADMISSIBLE_COST * (1.0 + excess));
        }
        let ss = self
            .residuals(constant, &ar, &ma)
            .iter()
            .skip(self.order.p)
            .map(|e| e * e)
            .sum::<f64>();
        Ok(if ss.is_finite() { ss } else { INADMISSIBLE_COST })
    }
}
