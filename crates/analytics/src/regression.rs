//! Ordinary least-squares fit of ticker excess returns on benchmark excess
//! returns, with two-sided significance tests for both coefficients.

use crate::error::AnalyticsError;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Coefficients and diagnostics of the excess-return regression
/// `y_t = alpha + beta * x_t + e_t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OlsFit {
    /// Intercept, in daily-return units.
    pub alpha: f64,
    pub beta: f64,
    pub r_squared: f64,
    /// Two-sided p-value for H0: alpha = 0.
    pub alpha_pvalue: f64,
    /// Two-sided p-value for H0: beta = 0.
    pub beta_pvalue: f64,
    /// Number of observations the fit used.
    pub observations: usize,
}

/// Fits `y = alpha + beta * x` by closed-form OLS.
///
/// Requires at least 3 observations so the t-tests have n - 2 >= 1 degrees of
/// freedom. A zero-variance regressor makes beta undefined and is rejected
/// rather than producing NaN.
pub fn fit(y: &[f64], x: &[f64]) -> Result<OlsFit, AnalyticsError> {
    if y.len() != x.len() {
        return Err(AnalyticsError::Calculation(format!(
            "regression series lengths differ: {} vs {}",
            y.len(),
            x.len()
        )));
    }

    let n = y.len();
    if n < 3 {
        return Err(AnalyticsError::InsufficientData { needed: 3, got: n });
    }

    let nf = n as f64;
    let mean_x = x.iter().sum::<f64>() / nf;
    let mean_y = y.iter().sum::<f64>() / nf;

    let sxx: f64 = x.iter().map(|v| (v - mean_x).powi(2)).sum();
    if sxx == 0.0 {
        return Err(AnalyticsError::DegenerateRegression);
    }

    let sxy: f64 = x
        .iter()
        .zip(y.iter())
        .map(|(xi, yi)| (xi - mean_x) * (yi - mean_y))
        .sum();

    let beta = sxy / sxx;
    let alpha = mean_y - beta * mean_x;

    let sse: f64 = x
        .iter()
        .zip(y.iter())
        .map(|(xi, yi)| {
            let fitted = alpha + beta * xi;
            (yi - fitted).powi(2)
        })
        .sum();
    let sst: f64 = y.iter().map(|v| (v - mean_y).powi(2)).sum();

    // An exactly constant y is fitted exactly by the constant model.
    let r_squared = if sst == 0.0 { 1.0 } else { 1.0 - sse / sst };

    let df = (n - 2) as f64;
    let residual_variance = sse / df;
    let beta_se = (residual_variance / sxx).sqrt();
    let alpha_se = (residual_variance * (1.0 / nf + mean_x.powi(2) / sxx)).sqrt();

    let alpha_pvalue = two_sided_pvalue(alpha, alpha_se, df)?;
    let beta_pvalue = two_sided_pvalue(beta, beta_se, df)?;

    Ok(OlsFit {
        alpha,
        beta,
        r_squared,
        alpha_pvalue,
        beta_pvalue,
        observations: n,
    })
}

/// Two-sided p-value for a coefficient under the standard OLS t-test.
///
/// A zero standard error means the fit is exact; the hypothesis test collapses
/// to certainty one way or the other instead of a 0/0.
fn two_sided_pvalue(coefficient: f64, standard_error: f64, df: f64) -> Result<f64, AnalyticsError> {
    if standard_error == 0.0 {
        return Ok(if coefficient == 0.0 { 1.0 } else { 0.0 });
    }

    let t_stat = coefficient / standard_error;
    let dist = StudentsT::new(0.0, 1.0, df)
        .map_err(|e| AnalyticsError::Calculation(format!("t-distribution with df={df}: {e}")))?;

    Ok(2.0 * (1.0 - dist.cdf(t_stat.abs())))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn exact_linear_relationship_recovered() {
        let x = [0.01, -0.02, 0.015, 0.005, -0.01];
        let y: Vec<f64> = x.iter().map(|v| 0.002 + 1.5 * v).collect();

        let fit = fit(&y, &x).unwrap();
        assert_eq!(fit.observations, x.len());
        assert!((fit.beta - 1.5).abs() < TOL);
        assert!((fit.alpha - 0.002).abs() < TOL);
        assert!((fit.r_squared - 1.0).abs() < TOL);
        // An exact fit leaves no doubt about either coefficient.
        assert!(fit.alpha_pvalue < 1e-6);
        assert!(fit.beta_pvalue < 1e-6);
    }

    #[test]
    fn self_regression_is_identity() {
        let x = [0.012, -0.007, 0.03, -0.001, 0.004, -0.016];
        let fit = fit(&x, &x).unwrap();
        assert!((fit.beta - 1.0).abs() < TOL);
        assert!(fit.alpha.abs() < TOL);
        assert!((fit.r_squared - 1.0).abs() < TOL);
    }

    #[test]
    fn noisy_fit_has_sane_diagnostics() {
        // y = 1.2x plus a small alternating perturbation.
        let x = [0.01, -0.005, 0.02, -0.015, 0.008, 0.003, -0.012, 0.006];
        let y: Vec<f64> = x
            .iter()
            .enumerate()
            .map(|(i, v)| 1.2 * v + if i % 2 == 0 { 0.0005 } else { -0.0005 })
            .collect();

        let fit = fit(&y, &x).unwrap();
        assert!(fit.beta > 1.0 && fit.beta < 1.4);
        assert!(fit.r_squared > 0.9 && fit.r_squared <= 1.0);
        assert!(fit.beta_pvalue < 0.01);
        assert!(fit.alpha_pvalue > 0.0 && fit.alpha_pvalue <= 1.0);
    }

    #[test]
    fn constant_regressor_is_degenerate() {
        let x = [0.0, 0.0, 0.0, 0.0];
        let y = [0.01, -0.02, 0.005, 0.0];
        assert!(matches!(
            fit(&y, &x),
            Err(AnalyticsError::DegenerateRegression)
        ));
    }

    #[test]
    fn too_few_observations_rejected() {
        assert!(matches!(
            fit(&[0.01, 0.02], &[0.01, 0.03]),
            Err(AnalyticsError::InsufficientData { needed: 3, got: 2 })
        ));
    }

    #[test]
    fn mismatched_lengths_rejected() {
        assert!(matches!(
            fit(&[0.01, 0.02, 0.01], &[0.01, 0.03]),
            Err(AnalyticsError::Calculation(_))
        ));
    }
}
