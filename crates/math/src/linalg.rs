//! Least-squares regression.

use ndarray::{Array1, Array2};

use crate::MathError;

/// Result of a least-squares regression.
#[derive(Debug, Clone)]
pub struct LeastSquaresFit {
    /// Estimated coefficients.
    pub coefficients: Array1<f64>,
    /// Residuals.
    pub residuals: Array1<f64>,
    /// R-squared.
    pub r_squared: f64,
}

/// Straight-line fit `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTrend {
    /// Value at `x = 0`.
    pub intercept: f64,
    /// Change in `y` per unit of `x`.
    pub slope: f64,
    /// R-squared of the fit.
    pub r_squared: f64,
}

impl LinearTrend {
    /// Evaluate the trend at `x`.
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Perform weighted least squares regression.
///
/// Solves: argmin_beta sum(w_i * (y_i - X_i * beta)^2)
///
/// # Arguments
/// * `y` - Response vector (n,)
/// * `x` - Design matrix (n x p)
/// * `weights` - Weight vector (n,)
///
/// # Errors
/// Returns error if dimensions mismatch or the normal equations are singular.
pub fn weighted_least_squares(
    y: &Array1<f64>,
    x: &Array2<f64>,
    weights: &Array1<f64>,
) -> Result<LeastSquaresFit, MathError> {
    let n = y.len();

    if x.nrows() != n {
        return Err(MathError::DimensionMismatch { expected: n, actual: x.nrows() });
    }
    if weights.len() != n {
        return Err(MathError::DimensionMismatch { expected: n, actual: weights.len() });
    }
    if n == 0 {
        return Err(MathError::EmptyData);
    }

    let y_weighted: Array1<f64> = y.iter().zip(weights.iter()).map(|(yi, wi)| yi * wi).collect();

    let mut x_weighted = x.clone();
    for (mut row, &w) in x_weighted.rows_mut().into_iter().zip(weights.iter()) {
        row.mapv_inplace(|v| v * w);
    }

    // Normal equations: (X'WX) beta = X'Wy
    let xtx = x_weighted.t().dot(&x_weighted);
    let xty = x_weighted.t().dot(&y_weighted);

    let coefficients = solve_linear_system(&xtx, &xty)?;

    let fitted = x.dot(&coefficients);
    let residuals = y - &fitted;

    let y_mean = y.mean().unwrap_or(0.0);
    let ss_tot: f64 = y.iter().map(|yi| (yi - y_mean).powi(2)).sum();
    let ss_res: f64 = residuals.iter().map(|r| r.powi(2)).sum();
    let r_squared = if ss_tot > 0.0 { 1.0 - ss_res / ss_tot } else { 0.0 };

    if coefficients.iter().any(|c| !c.is_finite()) {
        return Err(MathError::NumericalInstability("non-finite coefficients".to_string()));
    }

    Ok(LeastSquaresFit { coefficients, residuals, r_squared })
}

/// Ordinary least squares, i.e. [`weighted_least_squares`] with unit weights.
///
/// # Errors
/// Returns error if dimensions mismatch or the normal equations are singular.
pub fn ordinary_least_squares(
    y: &Array1<f64>,
    x: &Array2<f64>,
) -> Result<LeastSquaresFit, MathError> {
    weighted_least_squares(y, x, &Array1::ones(y.len()))
}

/// Fit `y = a + b * x` by ordinary least squares.
///
/// `x` is centred before solving so that calendar years do not make the
/// normal equations ill-conditioned.
///
/// # Errors
/// Returns `MathError::InsufficientData` for fewer than two points and
/// `MathError::LinearAlgebra` when every `x` is identical.
pub fn linear_trend(x: &[f64], y: &[f64]) -> Result<LinearTrend, MathError> {
    if x.len() != y.len() {
        return Err(MathError::DimensionMismatch { expected: x.len(), actual: y.len() });
    }
    if x.len() < 2 {
        return Err(MathError::InsufficientData { required: 2, actual: x.len() });
    }

    let n = x.len();
    let x_mean = x.iter().sum::<f64>() / n as f64;

    let mut design = Array2::ones((n, 2));
    for (i, &xi) in x.iter().enumerate() {
        design[[i, 1]] = xi - x_mean;
    }
    let response = Array1::from_vec(y.to_vec());

    let fit = ordinary_least_squares(&response, &design)?;
    let slope = fit.coefficients[1];
    let intercept = fit.coefficients[0] - slope * x_mean;

    Ok(LinearTrend { intercept, slope, r_squared: fit.r_squared })
}

/// Solve a linear system Ax = b using Gaussian elimination with partial pivoting.
fn solve_linear_system(a: &Array2<f64>, b: &Array1<f64>) -> Result<Array1<f64>, MathError> {
    let n = a.nrows();
    if n == 0 {
        return Err(MathError::EmptyData);
    }
    if a.ncols() != n {
        return Err(MathError::LinearAlgebra("matrix must be square".to_string()));
    }
    if b.len() != n {
        return Err(MathError::DimensionMismatch { expected: n, actual: b.len() });
    }

    // Augmented matrix [A | b]
    let mut aug = Array2::zeros((n, n + 1));
    for i in 0..n {
        for j in 0..n {
            aug[[i, j]] = a[[i, j]];
        }
        aug[[i, n]] = b[i];
    }

    for col in 0..n {
        let mut max_row = col;
        let mut max_val = aug[[col, col]].abs();
        for row in (col + 1)..n {
            if aug[[row, col]].abs() > max_val {
                max_val = aug[[row, col]].abs();
                max_row = row;
            }
        }

        if max_val < 1e-14 {
            return Err(MathError::LinearAlgebra(
                "matrix is singular or nearly singular".to_string(),
            ));
        }

        if max_row != col {
            for j in 0..=n {
                aug.swap([col, j], [max_row, j]);
            }
        }

        for row in (col + 1)..n {
            let factor = aug[[row, col]] / aug[[col, col]];
            for j in col..=n {
                aug[[row, j]] -= factor * aug[[col, j]];
            }
        }
    }

    // Back substitution
    let mut x = Array1::zeros(n);
    for i in (0..n).rev() {
        let mut sum = aug[[i, n]];
        for j in (i + 1)..n {
            sum -= aug[[i, j]] * x[j];
        }
        x[i] = sum / aug[[i, i]];
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;

    use super::*;

    #[test]
    fn wls_simple_regression() {
        let y = array![1.0, 2.0, 3.0, 4.0, 5.0];
        let x =
            Array2::from_shape_vec((5, 2), vec![1.0, 1.0, 1.0, 2.0, 1.0, 3.0, 1.0, 4.0, 1.0, 5.0])
                .unwrap();
        let weights = array![1.0, 1.0, 1.0, 1.0, 1.0];

        let result = weighted_least_squares(&y, &x, &weights).unwrap();

        assert_relative_eq!(result.coefficients[0], 0.0, epsilon = 1e-10);
        assert_relative_eq!(result.coefficients[1], 1.0, epsilon = 1e-10);
        assert_relative_eq!(result.r_squared, 1.0, epsilon = 1e-10);
    }

    #[test]
    fn wls_downweights_outlier() {
        let y = array![1.0, 2.0, 3.0, 4.0, 100.0];
        let x =
            Array2::from_shape_vec((5, 2), vec![1.0, 1.0, 1.0, 2.0, 1.0, 3.0, 1.0, 4.0, 1.0, 5.0])
                .unwrap();
        let weights = array![1.0, 1.0, 1.0, 1.0, 0.001];

        let result = weighted_least_squares(&y, &x, &weights).unwrap();

        assert_relative_eq!(result.coefficients[1], 1.0, epsilon = 0.1);
    }

    #[test]
    fn linear_trend_on_calendar_years() {
        let years = [2015.0, 2016.0, 2017.0, 2018.0];
        let values = [10.0, 12.0, 14.0, 16.0];

        let trend = linear_trend(&years, &values).unwrap();

        assert_relative_eq!(trend.slope, 2.0, epsilon = 1e-9);
        assert_relative_eq!(trend.predict(2020.0), 20.0, epsilon = 1e-6);
    }

    #[test]
    fn linear_trend_rejects_single_point() {
        let err = linear_trend(&[2020.0], &[1.0]).unwrap_err();
        assert!(matches!(err, MathError::InsufficientData { required: 2, actual: 1 }));
    }

    #[test]
    fn linear_trend_rejects_identical_x() {
        let err = linear_trend(&[2020.0, 2020.0], &[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, MathError::LinearAlgebra(_)));
    }
}
