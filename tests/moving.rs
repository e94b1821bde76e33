//! Tests for moving module

use gpxfeed::geo_utils::haversine_distance;
use gpxfeed::moving::moving_data;
use gpxfeed::{PointTime, Segment, Track, TrackPoint};
use time::OffsetDateTime;

fn timed_point(lat: f64, lon: f64, epoch: i64) -> TrackPoint {
    let mut p = TrackPoint::new(lat, lon);
    p.time = Some(PointTime::Aware(
        OffsetDateTime::from_unix_timestamp(epoch).unwrap(),
    ));
    p
}

fn single_segment_track(points: Vec<TrackPoint>) -> Track {
    Track {
        name: None,
        segments: vec![Segment { points }],
    }
}

fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

#[test]
fn test_riding_pace_counts_as_moving() {
    // ~111m of latitude every 30s is ~3.7 m/s, well above the threshold
    let track = single_segment_track(vec![
        timed_point(51.500, -0.13, 0),
        timed_point(51.501, -0.13, 30),
        timed_point(51.502, -0.13, 60),
    ]);
    let md = moving_data(&track);

    let expected_distance = haversine_distance(
        &TrackPoint::new(51.500, -0.13),
        &TrackPoint::new(51.501, -0.13),
    ) + haversine_distance(
        &TrackPoint::new(51.501, -0.13),
        &TrackPoint::new(51.502, -0.13),
    );

    assert_eq!(md.moving_time_s, 60.0);
    assert!(approx_eq(md.moving_distance_m, expected_distance, 1e-9));
    assert_eq!(md.stopped_time_s, 0.0);
    assert_eq!(md.stopped_distance_m, 0.0);
}

#[test]
fn test_stationary_points_count_as_stopped() {
    let track = single_segment_track(vec![
        timed_point(51.5, -0.13, 0),
        timed_point(51.5, -0.13, 10),
        timed_point(51.5, -0.13, 20),
        timed_point(51.5, -0.13, 30),
    ]);
    let md = moving_data(&track);
    assert_eq!(md.stopped_time_s, 30.0);
    assert_eq!(md.stopped_distance_m, 0.0);
    assert_eq!(md.moving_time_s, 0.0);
}

#[test]
fn test_mixed_pairs_split_into_buckets() {
    // First pair crawls (~111m over an hour), second pair rides
    let track = single_segment_track(vec![
        timed_point(51.500, -0.13, 0),
        timed_point(51.501, -0.13, 3600),
        timed_point(51.502, -0.13, 3630),
    ]);
    let md = moving_data(&track);
    assert_eq!(md.stopped_time_s, 3600.0);
    assert_eq!(md.moving_time_s, 30.0);
    assert!(md.stopped_distance_m > 0.0);
    assert!(md.moving_distance_m > 0.0);
}

#[test]
fn test_untimed_pairs_contribute_nothing() {
    let track = single_segment_track(vec![
        TrackPoint::new(51.500, -0.13),
        TrackPoint::new(51.501, -0.13),
    ]);
    assert_eq!(moving_data(&track), Default::default());
}

#[test]
fn test_non_positive_elapsed_time_skipped() {
    let track = single_segment_track(vec![
        timed_point(51.500, -0.13, 100),
        timed_point(51.501, -0.13, 100),
        timed_point(51.502, -0.13, 90),
    ]);
    assert_eq!(moving_data(&track), Default::default());
}

#[test]
fn test_pairs_do_not_cross_segments() {
    let track = Track {
        name: None,
        segments: vec![
            Segment {
                points: vec![timed_point(51.500, -0.13, 0)],
            },
            Segment {
                points: vec![timed_point(51.501, -0.13, 30)],
            },
        ],
    };
    assert_eq!(moving_data(&track), Default::default());
}
