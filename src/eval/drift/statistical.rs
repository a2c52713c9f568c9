//! Statistical helper functions for drift detection.

use std::cmp::Ordering;

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut v = values.to_vec();
    v.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    v
}

/// Two-sample KS statistic: the largest gap between the empirical CDFs.
///
/// Ties are consumed together on both sides, so the result does not depend
/// on argument order. Returns 0.0 if either sample is empty.
pub fn ks_statistic(a: &[f64], b: &[f64]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let a = sorted(a);
    let b = sorted(b);
    let (n1, n2) = (a.len() as f64, b.len() as f64);

    let mut d_max = 0.0f64;
    let (mut i, mut j) = (0usize, 0usize);
    while i < a.len() && j < b.len() {
        let x = a[i].min(b[j]);
        while i < a.len() && a[i] <= x {
            i += 1;
        }
        while j < b.len() && b[j] <= x {
            j += 1;
        }
        d_max = d_max.max((i as f64 / n1 - j as f64 / n2).abs());
    }
    d_max
}

/// Survival function of the Kolmogorov distribution, `Q(λ) = P(K > λ)`.
pub fn kolmogorov_q(lambda: f64) -> f64 {
    // Below this the series is numerically 1
    if lambda < 0.27 {
        return 1.0;
    }
    // Q(λ) = 2 * sum_{k=1}^∞ (-1)^{k+1} * exp(-2 * k^2 * λ^2)
    let mut p = 0.0;
    for k in 1..=100 {
        let sign = if k % 2 == 1 { 1.0 } else { -1.0 };
        let term = sign * (-2.0 * f64::from(k).powi(2) * lambda.powi(2)).exp();
        p += term;
        if term.abs() < 1e-12 {
            break;
        }
    }
    (2.0 * p).clamp(0.0, 1.0)
}

/// Asymptotic p-value for a two-sample KS statistic `d`.
///
/// Uses the effective sample size with Stephens' small-sample correction.
pub fn ks_p_value(d: f64, n1: usize, n2: usize) -> f64 {
    if n1 == 0 || n2 == 0 || d <= 0.0 {
        return 1.0;
    }
    let (n1, n2) = (n1 as f64, n2 as f64);
    let en = (n1 * n2 / (n1 + n2)).sqrt();
    kolmogorov_q((en + 0.12 + 0.11 / en) * d)
}
