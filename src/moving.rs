//! Moving/stopped split over a track's timed point pairs.
//!
//! Each consecutive pair within a segment is classified by its average
//! speed against a stopped-speed threshold; distances and durations
//! accumulate into the matching bucket. Pairs missing a timestamp on
//! either end contribute nothing.

use crate::geo_utils::distance_3d;
use crate::Track;

/// Speed in km/h below which a point-to-point interval counts as stopped.
pub const STOPPED_SPEED_THRESHOLD_KMH: f64 = 1.0;

/// Moving/stopped aggregates for one track.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MovingData {
    pub moving_time_s: f64,
    pub moving_distance_m: f64,
    pub stopped_time_s: f64,
    pub stopped_distance_m: f64,
}

/// Accumulate the moving/stopped split for one track.
pub fn moving_data(track: &Track) -> MovingData {
    let mut data = MovingData::default();

    for segment in &track.segments {
        for pair in segment.points.windows(2) {
            let (Some(t0), Some(t1)) = (pair[0].time.as_ref(), pair[1].time.as_ref()) else {
                continue;
            };
            let seconds = t1.epoch_seconds() - t0.epoch_seconds();
            if seconds <= 0.0 {
                continue;
            }

            let distance = distance_3d(&pair[0], &pair[1]);
            let speed_kmh = distance / seconds * 3.6;
            if speed_kmh <= STOPPED_SPEED_THRESHOLD_KMH {
                data.stopped_time_s += seconds;
                data.stopped_distance_m += distance;
            } else {
                data.moving_time_s += seconds;
                data.moving_distance_m += distance;
            }
        }
    }

    data
}
