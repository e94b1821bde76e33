//! Point-stream analysis: one ordered walk per track.
//!
//! Every point of every segment is visited exactly once, in file order,
//! with the previously visited point carried as context. Segment
//! boundaries do not reset the predecessor: the last point of one
//! segment is the predecessor of the first point of the next.

use time::OffsetDateTime;

use crate::geo_utils::haversine_distance;
use crate::stats::round_to;
use crate::timestamp::epoch_seconds_at;
use crate::{PointExtension, Track, TrackPoint};

/// Extension tags recognized as heart-rate readings.
const HEART_RATE_TAGS: [&str; 2] = ["hr", "heartrate"];

/// Per-track sample collections accumulated during the walk.
#[derive(Debug, Clone, Default)]
pub struct SampleSet {
    /// Point-to-point speed in m/s, rounded to 6 decimals.
    pub speeds: Vec<f64>,
    /// Point-to-point pace in s/km, rounded to 1 decimal.
    pub tempos: Vec<f64>,
    /// Numeric values of `hr`/`heartrate` extensions.
    pub heart_rates: Vec<f64>,
}

/// One analyzed point: the textual record body and its epoch timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct PointLine {
    pub epoch: f64,
    pub body: String,
}

/// Walk every point of the track, producing one record body per point
/// and accumulating speed/pace/heart-rate samples. `now` supplies the
/// epoch fallback for points without a timestamp.
pub fn walk_track(track: &Track, track_seq: u32, now: OffsetDateTime) -> (Vec<PointLine>, SampleSet) {
    let mut lines = Vec::with_capacity(track.point_count());
    let mut samples = SampleSet::default();
    let mut prev: Option<&TrackPoint> = None;

    for segment in &track.segments {
        for point in &segment.points {
            let epoch = epoch_seconds_at(point.time.as_ref(), now);
            let mut body = format!(
                "{} track_seq={} lat={} lon={}",
                epoch, track_seq, point.latitude, point.longitude
            );
            match point.elevation {
                Some(elev) => body.push_str(&format!(" elev={elev}")),
                None => body.push_str(" elev="),
            }

            for ext in &point.extensions {
                append_extension(&mut body, ext, &mut samples.heart_rates);
            }

            match prev.and_then(|p| point_speed(p, point)) {
                Some(speed) => {
                    body.push_str(&format!(" speed_mps={speed}"));
                    samples.speeds.push(speed);
                    if speed > 0.0 {
                        let tempo = round_to(1000.0 / speed, 1);
                        samples.tempos.push(tempo);
                        body.push_str(&format!(" tempo_spk={tempo}"));
                    } else {
                        body.push_str(" tempo_spk=");
                    }
                }
                None => body.push_str(" speed_mps= tempo_spk="),
            }

            lines.push(PointLine { epoch, body });
            prev = Some(point);
        }
    }

    (lines, samples)
}

/// Speed in m/s between two consecutive points: great-circle distance
/// over elapsed time, rounded to 6 decimals. `None` when either point is
/// untimed or the elapsed time is not positive.
fn point_speed(prev: &TrackPoint, curr: &TrackPoint) -> Option<f64> {
    let t0 = prev.time.as_ref()?;
    let t1 = curr.time.as_ref()?;
    let seconds = t1.epoch_seconds() - t0.epoch_seconds();
    if seconds <= 0.0 {
        return None;
    }
    Some(round_to(haversine_distance(prev, curr) / seconds, 6))
}

/// Append one extension field to the record body, classifying the value
/// as numeric or quoted text. Numeric `hr`/`heartrate` values also
/// become heart-rate samples.
fn append_extension(body: &mut String, ext: &PointExtension, heart_rates: &mut Vec<f64>) {
    let value = ext.value.trim();
    if value.is_empty() {
        return;
    }
    let name = short_tag(&ext.tag);
    match value.parse::<f64>() {
        Ok(numeric) => {
            body.push_str(&format!(" {name}={numeric}"));
            if HEART_RATE_TAGS.contains(&name) {
                heart_rates.push(numeric);
            }
        }
        Err(_) => body.push_str(&format!(" {name}=\"{value}\"")),
    }
}

/// Strip any namespace qualifier from an extension tag: everything up to
/// the last `}` (URI-in-braces convention) or `:` (prefix convention).
pub fn short_tag(tag: &str) -> &str {
    let tag = tag.rsplit('}').next().unwrap_or(tag);
    tag.rsplit(':').next().unwrap_or(tag)
}
