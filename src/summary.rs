//! Track-level summary record construction.
//!
//! Geometry (2D/3D length, duration, elevation profile) is accumulated
//! per segment; the moving/stopped split comes from the [`crate::moving`]
//! module. The statistics block is filled in by the caller after the
//! point walk.

use crate::geo_utils::{distance_3d, haversine_distance};
use crate::moving::moving_data;
use crate::stats::round_to;
use crate::timestamp::PointTime;
use crate::{MovingSummary, StoppedSummary, Track, TrackRecord, TrackStats};

/// First timestamped point of the track, in file order.
pub fn start_time(track: &Track) -> Option<&PointTime> {
    track
        .segments
        .iter()
        .flat_map(|s| s.points.iter())
        .find_map(|p| p.time.as_ref())
}

/// Total 2D length in meters: per-segment sums of consecutive-pair
/// great-circle distances. Segment boundaries contribute no distance.
pub fn length_2d(track: &Track) -> f64 {
    track
        .segments
        .iter()
        .flat_map(|s| s.points.windows(2))
        .map(|w| haversine_distance(&w[0], &w[1]))
        .sum()
}

/// Total 3D length in meters, adding elevation deltas where present.
pub fn length_3d(track: &Track) -> f64 {
    track
        .segments
        .iter()
        .flat_map(|s| s.points.windows(2))
        .map(|w| distance_3d(&w[0], &w[1]))
        .sum()
}

/// Total duration in seconds: per-segment `last - first` over timestamped
/// endpoints, summed. `None` when no segment has both endpoints timed.
pub fn duration_s(track: &Track) -> Option<f64> {
    let mut total = 0.0;
    let mut any = false;

    for segment in &track.segments {
        let first = segment.points.iter().find_map(|p| p.time.as_ref());
        let last = segment.points.iter().rev().find_map(|p| p.time.as_ref());
        if let (Some(first), Some(last)) = (first, last) {
            let seconds = last.epoch_seconds() - first.epoch_seconds();
            if seconds > 0.0 {
                total += seconds;
            }
            any = true;
        }
    }

    any.then_some(total)
}

/// True when the track has points and every one of them carries an
/// elevation. Gates all four elevation-derived summary fields.
pub fn has_full_elevations(track: &Track) -> bool {
    track.point_count() > 0
        && track
            .segments
            .iter()
            .flat_map(|s| s.points.iter())
            .all(|p| p.elevation.is_some())
}

/// Per-segment sums of positive (uphill) and negative (downhill)
/// elevation deltas, both returned as non-negative meters.
pub fn uphill_downhill(track: &Track) -> (f64, f64) {
    let mut uphill = 0.0;
    let mut downhill = 0.0;

    for segment in &track.segments {
        for pair in segment.points.windows(2) {
            if let (Some(e0), Some(e1)) = (pair[0].elevation, pair[1].elevation) {
                let delta = e1 - e0;
                if delta > 0.0 {
                    uphill += delta;
                } else {
                    downhill += -delta;
                }
            }
        }
    }

    (uphill, downhill)
}

/// Minimum and maximum elevation over all points that carry one.
pub fn elevation_extremes(track: &Track) -> Option<(f64, f64)> {
    let mut extremes: Option<(f64, f64)> = None;

    for elevation in track
        .segments
        .iter()
        .flat_map(|s| s.points.iter())
        .filter_map(|p| p.elevation)
    {
        extremes = Some(match extremes {
            None => (elevation, elevation),
            Some((min, max)) => (min.min(elevation), max.max(elevation)),
        });
    }

    extremes
}

/// Build the summary record for one track. `track_seq` is the 1-based
/// index of the track within its file. The `stats` block is left at its
/// default; the caller fills it in after the point walk.
pub fn summarize_track(track: &Track, track_seq: u32) -> TrackRecord {
    let md = moving_data(track);
    let has_elev = has_full_elevations(track);
    let (uphill, downhill) = uphill_downhill(track);
    let extremes = elevation_extremes(track);

    let (avg_speed, avg_tempo) = if md.moving_time_s > 0.0 {
        let speed = md.moving_distance_m / md.moving_time_s;
        let tempo = (speed > 0.0).then(|| round_to(1000.0 / speed, 1));
        (Some(round_to(speed, 3)), tempo)
    } else {
        (None, None)
    };

    TrackRecord {
        name: track.name.clone(),
        track_seq,
        ts: start_time(track).map(|t| t.format_event_ts()),
        distance_2d_m: round_to(length_2d(track), 3),
        distance_3d_m: round_to(length_3d(track), 3),
        duration_s: duration_s(track),
        delev_downhill_m: has_elev.then(|| round_to(downhill, 1)),
        delev_uphill_m: has_elev.then(|| round_to(uphill, 1)),
        elev_min_m: extremes.filter(|_| has_elev).map(|(min, _)| min),
        elev_max_m: extremes.filter(|_| has_elev).map(|(_, max)| max),
        moving: MovingSummary {
            duration_s: md.moving_time_s,
            distance_m: md.moving_distance_m,
            avg_speed_mps: avg_speed,
            avg_tempo_spk: avg_tempo,
        },
        stopped: StoppedSummary {
            distance_m: md.stopped_distance_m,
            duration_s: md.stopped_time_s,
        },
        stats: TrackStats::default(),
    }
}
