//! Property and scenario tests for trend fitting and outlier flagging

use hydrawatch_ml::{
    analyze, classify, fit, AnalysisConfig, MlError, OutlierClassifier, OutlierConfig, Table,
    TimeSeriesPoint,
};
use proptest::prelude::*;

fn line(slope: f64, intercept: f64, times: &[f64]) -> Vec<TimeSeriesPoint> {
    times
        .iter()
        .map(|&t| TimeSeriesPoint::new(t, slope * t + intercept))
        .collect()
}

proptest! {
    #[test]
    fn fit_recovers_exact_lines(
        slope in -50.0f64..50.0,
        intercept in -1000.0f64..1000.0,
        n in 2usize..40,
        step in 0.1f64..10.0,
    ) {
        let times: Vec<f64> = (0..n).map(|i| i as f64 * step).collect();
        let model = fit(&line(slope, intercept, &times)).unwrap();

        prop_assert!((model.slope - slope).abs() < 1e-6 * (1.0 + slope.abs()));
        prop_assert!((model.intercept - intercept).abs() < 1e-6 * (1.0 + intercept.abs()));
    }

    #[test]
    fn exact_lines_flag_nothing_by_default(
        slope in -50.0f64..50.0,
        intercept in -1000.0f64..1000.0,
        n in 2usize..60,
        step in prop::sample::select(vec![0.1, 0.3, 0.7, 1.3]),
    ) {
        let times: Vec<f64> = (0..n).map(|i| i as f64 * step).collect();
        let points = line(slope, intercept, &times);
        let model = fit(&points).unwrap();

        prop_assert!(classify(&points, &model).iter().all(|r| !r.is_outlier));
        prop_assert_eq!(
            OutlierClassifier::new(OutlierConfig::default()).classify(&points, &model).outlier_count(),
            0
        );
    }

    #[test]
    fn shared_time_is_always_degenerate(t in -1e6f64..1e6, values in prop::collection::vec(-1e3f64..1e3, 2..20)) {
        let points: Vec<_> = values.iter().map(|&v| TimeSeriesPoint::new(t, v)).collect();
        prop_assert_eq!(fit(&points), Err(MlError::DegenerateInput));
    }

    #[test]
    fn classification_covers_every_point(values in prop::collection::vec(-1e3f64..1e3, 2..50)) {
        let points: Vec<_> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| TimeSeriesPoint::new(i as f64, v))
            .collect();
        let model = fit(&points).unwrap();
        let classified = classify(&points, &model);

        prop_assert_eq!(classified.len(), points.len());
        for (entry, point) in classified.iter().zip(&points) {
            prop_assert_eq!(entry.residual.point, *point);
        }
    }
}

#[test]
fn hydrate_run_flags_volume_jump() {
    // Volume climbs steadily until a plug forms and one reading jumps
    let times: Vec<f64> = (0..20).map(|i| f64::from(i) * 30.0).collect();
    let mut volume: Vec<f64> = times.iter().map(|t| 100.0 + 0.2 * t).collect();
    for (i, v) in volume.iter_mut().enumerate() {
        *v += if i % 2 == 0 { 0.3 } else { -0.3 };
    }
    volume[14] += 40.0;

    let table = Table::new()
        .with_column("numeric_time", times)
        .unwrap()
        .with_column("total_volume", volume)
        .unwrap();

    let report = analyze(&table, &AnalysisConfig::default()).unwrap();
    let flagged: Vec<f64> = report.flagged.iter().map(|p| p.time).collect();
    assert_eq!(flagged, vec![420.0]);
    assert!(report.flagged[0].actual_value > report.flagged[0].predicted_value);
}

#[test]
fn insufficient_rows_abort_analysis() {
    let table = Table::from_columns([("numeric_time", vec![0.0]), ("total_volume", vec![1.0])]).unwrap();
    assert_eq!(
        analyze(&table, &AnalysisConfig::default()).unwrap_err(),
        MlError::InsufficientData { required: 2, available: 1 }
    );
}
