//! Tests for drift detection module.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::*;
use crate::data::{Column, PM10_COLUMN};
use crate::error::Error;
use crate::test_support::{clean_pm10, observations};

#[test]
fn test_ks_statistic_disjoint_samples() {
    assert_eq!(ks_statistic(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), 1.0);
}

#[test]
fn test_ks_statistic_partial_overlap() {
    let d = ks_statistic(&[1.0, 2.0, 3.0, 4.0], &[3.0, 4.0, 5.0, 6.0]);
    assert!((d - 0.5).abs() < 1e-12);
}

#[test]
fn test_ks_statistic_ties_are_zero_distance() {
    let a = [1.0, 1.0, 2.0, 2.0, 3.0];
    assert_eq!(ks_statistic(&a, &a), 0.0);
    assert_eq!(ks_statistic(&a, &[]), 0.0);
}

#[test]
fn test_ks_statistic_symmetric() {
    let a = [0.3, 1.7, 2.2, 2.2, 5.0, 8.1];
    let b = [1.0, 2.2, 3.3, 4.4];
    assert_eq!(ks_statistic(&a, &b), ks_statistic(&b, &a));
}

#[test]
fn test_kolmogorov_q_bounds() {
    assert_eq!(kolmogorov_q(0.0), 1.0);
    assert!(kolmogorov_q(1.36) > 0.04 && kolmogorov_q(1.36) < 0.06);
    assert!(kolmogorov_q(5.0) < 1e-10);
}

#[test]
fn test_ks_p_value_degenerate_inputs() {
    assert_eq!(ks_p_value(0.0, 10, 10), 1.0);
    assert_eq!(ks_p_value(0.5, 0, 10), 1.0);
}

#[test]
fn test_identical_datasets_do_not_drift() {
    let reference = observations(100, clean_pm10);
    let current = reference.clone();

    let report = DriftDetector::default().detect(&reference, &current).unwrap();
    assert!(!report.dataset_drift);
    assert!(report.drifted_fields().is_empty());
    for field in report.per_field.values() {
        assert!(field.p_value > 0.05, "{} p = {}", field.feature, field.p_value);
    }
}

#[test]
fn test_shifted_pm10_drifts() {
    let reference = observations(100, clean_pm10);
    let current = observations(100, |i| clean_pm10(i) + 200.0);

    let report = DriftDetector::default().detect(&reference, &current).unwrap();
    let pm10 = report.field(PM10_COLUMN).unwrap();
    assert!(pm10.drifted);
    assert_eq!(pm10.statistic, 1.0);
    assert!(pm10.p_value < 1e-10);
    assert_eq!(pm10.severity, Severity::Critical);
    // One field out of ten is below the default drift share
    assert!(!report.dataset_drift);
    assert_eq!(report.drifted_fields(), vec![PM10_COLUMN]);
}

#[test]
fn test_dataset_drift_when_share_reached() {
    let reference = observations(100, clean_pm10);
    let current = observations(100, |i| clean_pm10(i) + 200.0);
    let settings = DriftSettings { drift_share: 0.1, ..DriftSettings::default() };

    let report = DriftDetector::new(settings).detect(&reference, &current).unwrap();
    assert!(report.dataset_drift);
    assert!((report.drift_share - 0.1).abs() < 1e-12);
}

#[test]
fn test_schema_mismatch_is_an_error() {
    let reference = observations(20, clean_pm10);
    let mut current = observations(20, clean_pm10);
    current.insert_column("extra", Column::numeric((0..20).map(f64::from))).unwrap();

    let err = DriftDetector::default().detect(&reference, &current).unwrap_err();
    assert!(matches!(err, Error::SchemaMismatch { .. }));
    assert!(err.to_string().contains("extra"));
}

#[test]
fn test_empty_dataset_is_rejected() {
    let reference = observations(20, clean_pm10);
    let current = observations(0, clean_pm10);
    assert!(matches!(
        DriftDetector::default().detect(&reference, &current),
        Err(Error::EmptyDataset)
    ));
}

#[test]
fn test_missing_values_dropped_before_test() {
    let reference = observations(30, clean_pm10);
    let mut current = observations(30, clean_pm10);
    let with_gaps: Vec<Option<f64>> =
        (0..30).map(|i| if i % 3 == 0 { None } else { Some(clean_pm10(i)) }).collect();
    current.insert_column(PM10_COLUMN, Column::Numeric(with_gaps)).unwrap();

    let report = DriftDetector::default().detect(&reference, &current).unwrap();
    let pm10 = report.field(PM10_COLUMN).unwrap();
    assert_eq!(pm10.reference_size, 30);
    assert_eq!(pm10.current_size, 20);
}

#[test]
fn test_all_missing_field_is_skipped() {
    let mut reference = observations(10, clean_pm10);
    let mut current = observations(10, clean_pm10);
    reference.insert_column("snowfall", Column::Numeric(vec![None; 10])).unwrap();
    current.insert_column("snowfall", Column::Numeric(vec![None; 10])).unwrap();

    let report = DriftDetector::default().detect(&reference, &current).unwrap();
    assert_eq!(report.skipped, vec!["snowfall".to_string()]);
    assert!(report.field("snowfall").is_none());
}

#[test]
fn test_swapping_sides_keeps_statistic() {
    let reference = observations(60, clean_pm10);
    let current = observations(40, |i| clean_pm10(i) * 1.5);
    let detector = DriftDetector::default();

    let forward = detector.detect(&reference, &current).unwrap();
    let backward = detector.detect(&current, &reference).unwrap();
    for (name, f) in &forward.per_field {
        let b = backward.field(name).unwrap();
        assert!((f.statistic - b.statistic).abs() < 1e-12);
        assert!((f.p_value - b.p_value).abs() < 1e-12);
    }
}

#[test]
fn test_warning_band_does_not_drift() {
    let detector = DriftDetector::default();
    // p between 0.05 and 0.0625 lands in the warning band
    let result = detector.compare_columns("x", &[0.0; 3], &[0.0; 3]);
    assert_eq!(result.severity, Severity::None);

    let settings = DriftSettings { significance: 0.05, warning_multiplier: 0.01, ..Default::default() };
    let wide = DriftDetector::new(settings);
    let a: Vec<f64> = (0..40).map(f64::from).collect();
    let b: Vec<f64> = (0..40).map(|i| f64::from(i) + 6.0).collect();
    let r = wide.compare_columns("x", &a, &b);
    assert!(r.p_value >= 0.05);
    assert!(!r.drifted);
    assert_eq!(r.severity, Severity::Warning);
}

#[test]
fn test_callbacks_fire_only_on_drift() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut detector = DriftDetector::default();
    let counter = Arc::clone(&calls);
    detector.on_drift(move |report| {
        assert!(!report.drifted_fields().is_empty());
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let reference = observations(100, clean_pm10);
    detector.detect(&reference, &reference.clone()).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let shifted = observations(100, |i| clean_pm10(i) + 200.0);
    detector.detect(&reference, &shifted).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
