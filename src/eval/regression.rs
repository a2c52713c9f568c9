//! Regression metrics
//!
//! Conventions follow scikit-learn: population variance, and explained
//! variance of a constant target is 1.0 for a perfect fit, 0.0 otherwise.

/// Regression error metrics for one set of predictions
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegressionMetrics {
    /// Mean absolute error
    pub mae: f64,
    /// Mean squared error
    pub mse: f64,
    /// Explained variance score
    pub explained_variance: f64,
}

impl RegressionMetrics {
    /// Compute from predictions and ground truth of equal, non-zero length
    pub fn from_predictions(y_pred: &[f64], y_true: &[f64]) -> Self {
        Self {
            mae: mean_absolute_error(y_pred, y_true),
            mse: mean_squared_error(y_pred, y_true),
            explained_variance: explained_variance(y_pred, y_true),
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

fn variance(values: &[f64]) -> f64 {
    let m = mean(values.iter().copied());
    mean(values.iter().map(|v| (v - m).powi(2)))
}

/// Mean absolute error
pub fn mean_absolute_error(y_pred: &[f64], y_true: &[f64]) -> f64 {
    mean(y_pred.iter().zip(y_true).map(|(p, t)| (t - p).abs()))
}

/// Mean squared error
pub fn mean_squared_error(y_pred: &[f64], y_true: &[f64]) -> f64 {
    mean(y_pred.iter().zip(y_true).map(|(p, t)| (t - p).powi(2)))
}

/// Explained variance: `1 - Var(y - ŷ) / Var(y)`
pub fn explained_variance(y_pred: &[f64], y_true: &[f64]) -> f64 {
    let residuals: Vec<f64> = y_true.iter().zip(y_pred).map(|(t, p)| t - p).collect();
    let numerator = variance(&residuals);
    let denominator = variance(y_true);

    if denominator == 0.0 {
        return if numerator == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - numerator / denominator
}
