//! Ordinary least squares of one response on one predictor

use ndarray::Array1;

use super::distribution::{t_quantile, t_two_sided_p};

/// Fitted line `y = intercept + slope·x` with its inference statistics
#[derive(Debug, Clone, Copy)]
pub struct LinearFit {
    pub intercept: f64,
    pub slope: f64,
    /// Standard error of the slope; `NaN` with no residual degrees of freedom
    pub slope_se: f64,
    /// Residual degrees of freedom, `n - 2`
    pub df: usize,
    /// Coefficient of determination; `NaN` when `y` is constant
    pub r2: f64,
    /// `sqrt(SSE / n)`
    pub rmse: f64,
}

impl LinearFit {
    /// Two-sided p-value of the slope against a zero slope
    pub fn p_value(&self) -> f64 {
        if self.df == 0 {
            return f64::NAN;
        }
        t_two_sided_p(self.slope / self.slope_se, self.df as f64)
    }

    /// Two-sided confidence interval on the slope at `level` (e.g. 0.95)
    pub fn slope_interval(&self, level: f64) -> (f64, f64) {
        if self.df == 0 {
            return (f64::NAN, f64::NAN);
        }
        let q = t_quantile(0.5 + 0.5 * level, self.df as f64);
        let half = q * self.slope_se;
        (self.slope - half, self.slope + half)
    }
}

/// Least-squares line through `(x, y)`.
///
/// `None` when there are fewer than two points, the lengths differ, or `x`
/// does not vary. A constant `y` gives a flat line with `r2`, `slope_se`
/// and everything derived from them undefined.
pub fn fit_line(x: &Array1<f64>, y: &Array1<f64>) -> Option<LinearFit> {
    let n = x.len();
    if n < 2 || y.len() != n {
        return None;
    }
    let x_mean = x.mean()?;
    let y_mean = y.mean()?;
    let dx = x - x_mean;
    let dy = y - y_mean;

    let sxx = dx.dot(&dx);
    if !(sxx > 0.0) {
        return None;
    }
    // Exact equality: a mean of repeated 0.1 does not round back to 0.1
    if y.iter().all(|v| *v == y[0]) {
        return Some(LinearFit {
            intercept: y[0],
            slope: 0.0,
            slope_se: f64::NAN,
            df: n - 2,
            r2: f64::NAN,
            rmse: 0.0,
        });
    }
    let slope = dx.dot(&dy) / sxx;
    let intercept = y_mean - slope * x_mean;

    let residuals = y - &x.mapv(|v| intercept + slope * v);
    let sse = residuals.dot(&residuals);
    let sst = dy.dot(&dy);

    let df = n - 2;
    let slope_se = if df > 0 {
        (sse / df as f64 / sxx).sqrt()
    } else {
        f64::NAN
    };
    let r2 = if sst > 0.0 { 1.0 - sse / sst } else { f64::NAN };

    Some(LinearFit {
        intercept,
        slope,
        slope_se,
        df,
        r2,
        rmse: (sse / n as f64).sqrt(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use ndarray::array;

    #[test]
    fn test_exact_line() {
        let fit = fit_line(&array![0.0, 1.0, 2.0, 3.0], &array![1.0, 3.0, 5.0, 7.0]).unwrap();
        assert_relative_eq!(fit.slope, 2.0, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept, 1.0, epsilon = 1e-12);
        assert_relative_eq!(fit.r2, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(fit.rmse, 0.0, epsilon = 1e-12);
        assert_eq!(fit.p_value(), 0.0);
        let (lo, hi) = fit.slope_interval(0.95);
        assert_relative_eq!(lo, 2.0, epsilon = 1e-9);
        assert_relative_eq!(hi, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_noisy_line_against_reference() {
        // Hand-computed: Sxx = 10, Sxy = 10.5
        let x = array![0.0, 1.0, 2.0, 3.0, 4.0];
        let y = array![1.0, 2.0, 2.5, 4.5, 5.0];
        let fit = fit_line(&x, &y).unwrap();

        assert_relative_eq!(fit.slope, 1.05, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept, 0.9, epsilon = 1e-12);
        // SSE = 0.475, SST = 11.5
        assert_relative_eq!(fit.r2, 1.0 - 0.475 / 11.5, epsilon = 1e-12);
        assert_relative_eq!(fit.rmse, (0.475_f64 / 5.0).sqrt(), epsilon = 1e-12);
        assert_relative_eq!(fit.slope_se, (0.475_f64 / 3.0 / 10.0).sqrt(), epsilon = 1e-12);

        let t = fit.slope / fit.slope_se;
        assert_relative_eq!(fit.p_value(), t_two_sided_p(t, 3.0), epsilon = 1e-15);
        assert!(fit.p_value() < 0.01);

        let (lo, hi) = fit.slope_interval(0.95);
        let half = 3.182_446_305 * fit.slope_se;
        assert_relative_eq!(lo, 1.05 - half, epsilon = 1e-6);
        assert_relative_eq!(hi, 1.05 + half, epsilon = 1e-6);
    }

    #[test]
    fn test_two_points_have_no_inference() {
        let fit = fit_line(&array![0.0, 1.0], &array![0.0, 10.0]).unwrap();
        assert_relative_eq!(fit.slope, 10.0, epsilon = 1e-12);
        assert_relative_eq!(fit.r2, 1.0, epsilon = 1e-12);
        assert_eq!(fit.df, 0);
        assert!(fit.p_value().is_nan());
        assert!(fit.slope_interval(0.95).0.is_nan());
    }

    #[test]
    fn test_constant_response() {
        let fit = fit_line(&array![0.0, 1.0, 2.0], &array![4.0, 4.0, 4.0]).unwrap();
        assert_abs_diff_eq!(fit.slope, 0.0, epsilon = 1e-12);
        assert!(fit.r2.is_nan());
        assert!(fit.p_value().is_nan());
    }

    #[test]
    fn test_constant_inexact_response() {
        let fit = fit_line(&array![0.0, 5.0, 10.0], &array![0.1, 0.1, 0.1]).unwrap();
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.rmse, 0.0);
        assert!(fit.r2.is_nan());
        assert!(fit.slope_se.is_nan());
        assert!(fit.p_value().is_nan());
        let (lo, hi) = fit.slope_interval(0.95);
        assert!(lo.is_nan() && hi.is_nan());
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(fit_line(&array![1.0], &array![1.0]).is_none());
        assert!(fit_line(&array![2.0, 2.0], &array![1.0, 3.0]).is_none());
        assert!(fit_line(&array![0.0, 1.0], &array![1.0]).is_none());
    }
}
