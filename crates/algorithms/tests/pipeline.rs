//! End-to-end shoreline change analysis on synthetic coasts.
//!
//! - A straight coast: baseline along the x axis, shorelines parallel to it
//!   and advancing 10 m every 5 years.
//! - A curved coast: a quarter-circle baseline with concentric shorelines.
//! - File round trip: GeoJSON in, CSV out, CSV back into the statistics.

use chrono::NaiveDate;
use geo::LineString;
use shorekit_algorithms::prelude::*;
use shorekit_algorithms::statistics::shoreline_evolution;
use shorekit_core::io::{
    read_baselines, read_observations_csv, read_shorelines, read_transects,
    write_metrics_csv, write_observations_csv, write_transects_geojson,
};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn horizontal(id: i64, day: &str, y: f64, x_max: f64) -> Shoreline {
    Shoreline::new(
        ShorelineId(id),
        date(day),
        LineString::from(vec![(-100.0, y), (x_max, y)]),
    )
}

fn straight_coast() -> (Vec<Baseline>, Vec<Shoreline>) {
    let baseline = Baseline::from_coords(Some(BaselineId(1)), vec![(0.0, 0.0), (1000.0, 0.0)]);
    let shorelines = vec![
        horizontal(1, "2000-01-01", 50.0, 1100.0),
        horizontal(2, "2005-01-01", 60.0, 1100.0),
        horizontal(3, "2010-01-01", 70.0, 1100.0),
        horizontal(4, "2015-01-01", 80.0, 1100.0),
    ];
    (vec![baseline], shorelines)
}

/// Sea lies north of an eastward baseline
fn seaward_left() -> AnalysisParams {
    AnalysisParams {
        transects: TransectParams {
            sea_side: SeaSide::Left,
            ..Default::default()
        },
        ..Default::default()
    }
}

fn arc(radius: f64, from_deg: f64, to_deg: f64, step_deg: f64) -> LineString<f64> {
    let n = ((to_deg - from_deg) / step_deg).round() as usize;
    (0..=n)
        .map(|i| {
            let theta = (from_deg + i as f64 * step_deg).to_radians();
            (radius * theta.sin(), radius * theta.cos())
        })
        .collect::<Vec<_>>()
        .into()
}

#[test]
fn straight_coast_full_analysis() {
    let (baselines, shorelines) = straight_coast();
    let report = run_analysis(&baselines, &shorelines, &seaward_left()).unwrap();

    // floor((1000 - 1) / 100) + 1
    assert_eq!(report.transects.len(), 10);
    assert!(report.flipped.is_empty());
    assert!(report.smoothed.is_empty());
    for t in &report.transects {
        assert!(t.bearing().abs() < 1e-9 || (t.bearing() - 360.0).abs() < 1e-9);
        assert_eq!(t.baseline_id, Some(BaselineId(1)));
    }

    assert_eq!(report.baseline_points.len(), 10);
    assert_eq!(report.observations.len(), 40);
    for obs in &report.observations {
        let expected = match obs.shoreline_id.0 {
            1 => 50.0,
            2 => 60.0,
            3 => 70.0,
            _ => 80.0,
        };
        assert!((obs.distance.unwrap() - expected).abs() < 1e-9);
    }

    assert_eq!(report.metrics.len(), 10);
    for m in &report.metrics {
        assert_eq!(m.n_dates, 4);
        // 10 m per ~5.0 years
        assert!((m.lrr - 2.0).abs() < 0.01, "LRR = {}", m.lrr);
        assert!(m.lci_low <= m.lrr && m.lrr <= m.lci_upp);
        assert!(m.r2 > 0.9999);
        assert!((m.nsm - 30.0).abs() < 1e-9);
        assert!((m.sce - 30.0).abs() < 1e-9);
        assert!(m.rmse < 0.05);
        assert!(m.is_significant(0.05));
    }
    assert!(report.warnings.is_empty());
    assert!(report.correction_failures.is_empty());
    assert_eq!(report.significant_count(0.05), 10);
}

#[test]
fn wrong_sea_side_finds_no_crossings() {
    // Transects point south, away from every shoreline
    let (baselines, shorelines) = straight_coast();
    let report = run_analysis(&baselines, &shorelines, &AnalysisParams::default()).unwrap();

    assert_eq!(report.transects.len(), 10);
    assert!(report.observations.is_empty());
    assert_eq!(report.metrics.len(), 10);
    assert!(report.metrics.iter().all(|m| !m.has_trend()));
    assert_eq!(report.significant_count(0.05), 0);
}

#[test]
fn partial_shoreline_coverage() {
    let (baselines, mut shorelines) = straight_coast();
    // The 2015 survey stops at x = 500
    shorelines[3] = horizontal(4, "2015-01-01", 80.0, 500.0);
    let report = run_analysis(&baselines, &shorelines, &seaward_left()).unwrap();

    for m in &report.metrics {
        let t = report.transects.iter().find(|t| t.id == m.transect_id).unwrap();
        if t.start().x < 500.0 {
            assert_eq!(m.n_dates, 4);
            assert!((m.nsm - 30.0).abs() < 1e-9);
        } else {
            assert_eq!(m.n_dates, 3);
            assert!((m.nsm - 20.0).abs() < 1e-9);
        }
    }
    let misses = report
        .warnings
        .iter()
        .filter(|w| matches!(w, Warning::NoShorelineIntersection { .. }))
        .count();
    assert_eq!(misses, 5);
}

#[test]
fn single_survey_gives_missing_metrics() {
    let (baselines, shorelines) = straight_coast();
    let report = run_analysis(&baselines, &shorelines[..1], &seaward_left()).unwrap();

    assert_eq!(report.metrics.len(), report.transects.len());
    for m in &report.metrics {
        assert_eq!(m.n_dates, 1);
        assert!(m.lrr.is_nan() && m.nsm.is_nan() && m.sce.is_nan() && m.r2.is_nan());
    }
    let insufficient = report
        .warnings
        .iter()
        .filter(|w| matches!(w, Warning::InsufficientObservations { dates: 1, .. }))
        .count();
    assert_eq!(insufficient, 10);
}

#[test]
fn curved_coast_transects_stay_radial() {
    let baseline = Baseline::new(Some(BaselineId(7)), arc(500.0, 0.0, 90.0, 5.0));
    let shorelines: Vec<Shoreline> = [(550.0, "2000-01-01"), (560.0, "2010-01-01"), (570.0, "2020-01-01")]
        .iter()
        .enumerate()
        .map(|(i, (r, d))| Shoreline::new(ShorelineId(i as i64 + 1), date(d), arc(*r, -20.0, 110.0, 1.0)))
        .collect();
    let params = AnalysisParams {
        transects: TransectParams {
            spacing: 50.0,
            sea_side: SeaSide::Left,
            ..Default::default()
        },
        ..Default::default()
    };

    let report = run_analysis(&[baseline], &shorelines, &params).unwrap();

    assert!(report.transects.len() >= 15);
    assert!(report.flipped.is_empty());
    for t in &report.transects {
        // Outward from the centre: the transect heads away from the origin
        let start = t.start();
        let end = t.end();
        assert!(end.x.hypot(end.y) > start.x.hypot(start.y) + 250.0);
    }

    let with_trend: Vec<_> = report.metrics.iter().filter(|m| m.has_trend()).collect();
    assert_eq!(with_trend.len(), report.transects.len());
    for m in with_trend {
        assert_eq!(m.n_dates, 3);
        assert!((m.lrr - 1.0).abs() < 0.05, "LRR = {}", m.lrr);
        assert!(m.sce > 19.0 && m.sce < 21.0);
    }
}

#[test]
fn correction_switch_is_honoured() {
    let (baselines, shorelines) = straight_coast();
    let params = AnalysisParams {
        correct: false,
        ..seaward_left()
    };
    let report = run_analysis(&baselines, &shorelines, &params).unwrap();
    assert!(report.flipped.is_empty() && report.smoothed.is_empty());
    assert_eq!(report.metrics.len(), 10);
}

#[test]
fn invalid_configuration_fails_before_work() {
    let (baselines, shorelines) = straight_coast();
    let mut params = seaward_left();
    params.transects.spacing = -5.0;
    assert!(matches!(
        run_analysis(&baselines, &shorelines, &params),
        Err(Error::InvalidParameter { .. })
    ));
    assert!(matches!(
        run_analysis(&baselines, &[], &seaward_left()),
        Err(Error::EmptyInput(_))
    ));
}

#[test]
fn file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let baseline_path = dir.path().join("baseline.geojson");
    let shoreline_path = dir.path().join("shorelines.geojson");

    std::fs::write(
        &baseline_path,
        r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {"baseline_id": 1},
             "geometry": {"type": "LineString", "coordinates": [[0, 0], [1000, 0]]}}
        ]}"#,
    )
    .unwrap();
    std::fs::write(
        &shoreline_path,
        r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {"shoreline_id": 1, "date": "2000-01-01"},
             "geometry": {"type": "LineString", "coordinates": [[-100, 50], [1100, 50]]}},
            {"type": "Feature", "properties": {"shoreline_id": 2, "date": "2005/01/01"},
             "geometry": {"type": "LineString", "coordinates": [[-100, 60], [1100, 60]]}},
            {"type": "Feature", "properties": {"shoreline_id": 3, "date": "2010-01-01T12:00:00"},
             "geometry": {"type": "MultiLineString", "coordinates": [[[-100, 70], [500, 70]], [[500, 70], [1100, 70]]]}}
        ]}"#,
    )
    .unwrap();

    let baselines = read_baselines(&baseline_path).unwrap();
    let shorelines = read_shorelines(&shoreline_path, "shoreline_id").unwrap();
    assert_eq!(baselines[0].id, Some(BaselineId(1)));
    assert_eq!(shorelines[2].date, date("2010-01-01"));

    let report = run_analysis(&baselines, &shorelines, &seaward_left()).unwrap();

    let transects_path = dir.path().join("transects.geojson");
    write_transects_geojson(&transects_path, &report.transects).unwrap();
    let reread = read_transects(&transects_path).unwrap();
    assert_eq!(reread.len(), report.transects.len());
    assert_eq!(reread[3].id, report.transects[3].id);
    assert_eq!(reread[3].baseline_id, Some(BaselineId(1)));

    let observations_path = dir.path().join("observations.csv");
    write_observations_csv(&observations_path, &report.observations).unwrap();
    let observations = read_observations_csv(&observations_path).unwrap();
    assert_eq!(observations, report.observations);

    // The statistics reproduce from the table alone
    let again = shoreline_evolution(&observations, &[], &EvolutionParams::default()).unwrap();
    assert_eq!(again.metrics.len(), report.metrics.len());
    for (a, b) in again.metrics.iter().zip(&report.metrics) {
        assert_eq!(a.transect_id, b.transect_id);
        assert!((a.lrr - b.lrr).abs() < 1e-9);
    }

    let metrics_path = dir.path().join("metrics.csv");
    write_metrics_csv(&metrics_path, &report.metrics).unwrap();
    let text = std::fs::read_to_string(&metrics_path).unwrap();
    assert!(text.starts_with("transect_id,n_dates,LRR,LCI_low,LCI_upp,R2,Pvalue,RMSE,SCE,NSM"));
    assert_eq!(text.lines().count(), 11);
}
