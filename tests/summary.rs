//! Tests for summary module

use gpxfeed::geo_utils::haversine_distance;
use gpxfeed::stats::round_to;
use gpxfeed::summary::{
    duration_s, elevation_extremes, has_full_elevations, length_2d, length_3d, start_time,
    summarize_track, uphill_downhill,
};
use gpxfeed::{PointTime, Segment, Track, TrackPoint, TrackStats};
use time::OffsetDateTime;

fn timed_point(lat: f64, lon: f64, epoch: i64) -> TrackPoint {
    let mut p = TrackPoint::new(lat, lon);
    p.time = Some(PointTime::Aware(
        OffsetDateTime::from_unix_timestamp(epoch).unwrap(),
    ));
    p
}

fn timed_elev_point(lat: f64, lon: f64, epoch: i64, elevation: f64) -> TrackPoint {
    let mut p = timed_point(lat, lon, epoch);
    p.elevation = Some(elevation);
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
fn test_start_time_is_first_timed_point() {
    let untimed = TrackPoint::new(51.5, -0.13);
    let timed = timed_point(51.501, -0.13, 1000);
    let track = single_segment_track(vec![untimed, timed]);
    assert_eq!(start_time(&track).unwrap().epoch_seconds(), 1000.0);
}

#[test]
fn test_start_time_absent_without_times() {
    let track = single_segment_track(vec![TrackPoint::new(51.5, -0.13)]);
    assert!(start_time(&track).is_none());
}

#[test]
fn test_length_2d_sums_within_segments_only() {
    let track = Track {
        name: None,
        segments: vec![
            Segment {
                points: vec![
                    TrackPoint::new(51.500, -0.13),
                    TrackPoint::new(51.501, -0.13),
                ],
            },
            Segment {
                points: vec![
                    TrackPoint::new(52.000, -0.13),
                    TrackPoint::new(52.001, -0.13),
                ],
            },
        ],
    };
    let expected = haversine_distance(
        &TrackPoint::new(51.500, -0.13),
        &TrackPoint::new(51.501, -0.13),
    ) + haversine_distance(
        &TrackPoint::new(52.000, -0.13),
        &TrackPoint::new(52.001, -0.13),
    );
    // No distance is contributed by the gap between segments
    assert!(approx_eq(length_2d(&track), expected, 1e-9));
}

#[test]
fn test_length_3d_exceeds_2d_with_climbing() {
    let track = single_segment_track(vec![
        timed_elev_point(51.500, -0.13, 0, 100.0),
        timed_elev_point(51.501, -0.13, 30, 150.0),
    ]);
    assert!(length_3d(&track) > length_2d(&track));
}

#[test]
fn test_duration_sums_per_segment() {
    let track = Track {
        name: None,
        segments: vec![
            Segment {
                points: vec![timed_point(51.5, -0.13, 0), timed_point(51.501, -0.13, 60)],
            },
            Segment {
                points: vec![
                    timed_point(51.502, -0.13, 100),
                    timed_point(51.503, -0.13, 160),
                ],
            },
        ],
    };
    // The 40s gap between segments is not part of the duration
    assert_eq!(duration_s(&track), Some(120.0));
}

#[test]
fn test_duration_absent_without_times() {
    let track = single_segment_track(vec![
        TrackPoint::new(51.5, -0.13),
        TrackPoint::new(51.501, -0.13),
    ]);
    assert_eq!(duration_s(&track), None);
}

#[test]
fn test_has_full_elevations() {
    let full = single_segment_track(vec![
        timed_elev_point(51.500, -0.13, 0, 10.0),
        timed_elev_point(51.501, -0.13, 30, 20.0),
    ]);
    assert!(has_full_elevations(&full));

    let partial = single_segment_track(vec![
        timed_elev_point(51.500, -0.13, 0, 10.0),
        timed_point(51.501, -0.13, 30),
    ]);
    assert!(!has_full_elevations(&partial));

    let empty = single_segment_track(vec![]);
    assert!(!has_full_elevations(&empty));
}

#[test]
fn test_uphill_downhill() {
    let track = single_segment_track(vec![
        timed_elev_point(51.500, -0.13, 0, 10.0),
        timed_elev_point(51.501, -0.13, 30, 20.0),
        timed_elev_point(51.502, -0.13, 60, 15.0),
    ]);
    let (uphill, downhill) = uphill_downhill(&track);
    assert_eq!(uphill, 10.0);
    assert_eq!(downhill, 5.0);
}

#[test]
fn test_elevation_extremes() {
    let track = single_segment_track(vec![
        timed_elev_point(51.500, -0.13, 0, 10.0),
        timed_elev_point(51.501, -0.13, 30, 25.0),
        timed_elev_point(51.502, -0.13, 60, 5.0),
    ]);
    assert_eq!(elevation_extremes(&track), Some((5.0, 25.0)));
    assert_eq!(elevation_extremes(&single_segment_track(vec![])), None);
}

#[test]
fn test_summarize_moving_track() {
    let mut track = single_segment_track(vec![
        timed_elev_point(51.500, -0.13, 0, 100.0),
        timed_elev_point(51.501, -0.13, 30, 110.0),
        timed_elev_point(51.502, -0.13, 60, 105.0),
    ]);
    track.name = Some("Morning Run".to_string());

    let record = summarize_track(&track, 1);

    assert_eq!(record.name.as_deref(), Some("Morning Run"));
    assert_eq!(record.track_seq, 1);
    assert_eq!(record.ts.as_deref(), Some("1970-01-01 00:00:00 +0000"));
    assert_eq!(record.duration_s, Some(60.0));
    assert_eq!(record.distance_2d_m, round_to(length_2d(&track), 3));
    assert_eq!(record.distance_3d_m, round_to(length_3d(&track), 3));

    assert_eq!(record.delev_uphill_m, Some(10.0));
    assert_eq!(record.delev_downhill_m, Some(5.0));
    assert_eq!(record.elev_min_m, Some(100.0));
    assert_eq!(record.elev_max_m, Some(110.0));

    assert_eq!(record.moving.duration_s, 60.0);
    assert!(record.moving.distance_m > 0.0);
    let raw_speed = record.moving.distance_m / record.moving.duration_s;
    assert_eq!(record.moving.avg_speed_mps, Some(round_to(raw_speed, 3)));
    assert_eq!(
        record.moving.avg_tempo_spk,
        Some(round_to(1000.0 / raw_speed, 1))
    );

    assert_eq!(record.stopped.duration_s, 0.0);
    assert_eq!(record.stopped.distance_m, 0.0);

    // Stats are filled in by the caller after the point walk
    assert_eq!(record.stats, TrackStats::default());
}

#[test]
fn test_elevation_fields_absent_with_partial_elevations() {
    let track = single_segment_track(vec![
        timed_elev_point(51.500, -0.13, 0, 100.0),
        timed_point(51.501, -0.13, 30),
    ]);
    let record = summarize_track(&track, 1);
    assert_eq!(record.delev_uphill_m, None);
    assert_eq!(record.delev_downhill_m, None);
    assert_eq!(record.elev_min_m, None);
    assert_eq!(record.elev_max_m, None);
}

#[test]
fn test_moving_averages_absent_with_zero_moving_time() {
    // A stationary track has stopped time but no moving time
    let track = single_segment_track(vec![
        timed_point(51.5, -0.13, 0),
        timed_point(51.5, -0.13, 60),
    ]);
    let record = summarize_track(&track, 1);
    assert_eq!(record.moving.duration_s, 0.0);
    assert_eq!(record.moving.avg_speed_mps, None);
    assert_eq!(record.moving.avg_tempo_spk, None);
    assert_eq!(record.stopped.duration_s, 60.0);
}
