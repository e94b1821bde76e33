//! # GPX Feed
//!
//! GPX track log analyzer for log-analytics ingestion.
//!
//! Reads a GPX file and emits two event streams:
//! - one summary record per track (sorted-key JSON)
//! - one record per track point (single-line `key=value` text)
//!
//! Each stream is introduced by a marker line carrying the record type,
//! the source filename, and the recording device (the GPX `creator`).
//!
//! ## Quick Start
//!
//! ```rust
//! let xml = r#"<?xml version="1.0"?>
//! <gpx version="1.1" creator="unit-test">
//!   <trk><name>Morning Run</name><trkseg>
//!     <trkpt lat="51.5074" lon="-0.1278"><time>2021-05-09T07:01:25Z</time></trkpt>
//!     <trkpt lat="51.5080" lon="-0.1290"><time>2021-05-09T07:01:35Z</time></trkpt>
//!   </trkseg></trk>
//! </gpx>"#;
//!
//! let doc = gpxfeed::parser::parse_gpx(xml).unwrap();
//! let analysis = gpxfeed::analyzer::analyze_document(&doc, "morning_run.gpx");
//! assert_eq!(analysis.tracks.len(), 1);
//! assert_eq!(analysis.points.len(), 2);
//!
//! let mut out = Vec::new();
//! for event in &analysis.tracks {
//!     gpxfeed::emit::write_track_event(&mut out, event).unwrap();
//! }
//! gpxfeed::emit::write_point_events(&mut out, &analysis.points).unwrap();
//! ```

use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{GpxFeedError, Result};

// GPX parsing (quick-xml streaming)
pub mod parser;
pub use parser::parse_gpx;

// Geographic utilities (great-circle and 3D distances)
pub mod geo_utils;

// Timestamp parsing and epoch normalization
pub mod timestamp;
pub use timestamp::PointTime;

// Moving/stopped split over timed point pairs
pub mod moving;
pub use moving::MovingData;

// Sample statistics (mean, standard deviation)
pub mod stats;

// Track-level summary records
pub mod summary;
pub use summary::summarize_track;

// Point-stream analysis (per-point records + sample collection)
pub mod stream;
pub use stream::SampleSet;

// Event emission (marker lines + record bodies)
pub mod emit;

// File-level analysis pipeline
pub mod analyzer;
pub use analyzer::{analyze_document, analyze_file, FileAnalysis};

// ============================================================================
// Core Types
// ============================================================================

/// Record-type tag for track summary events.
pub const SOURCETYPE_TRACK: &str = "gpx:track";

/// Record-type tag for per-point events.
pub const SOURCETYPE_POINT: &str = "gpx:point";

/// A parsed GPX document: the creator label and its tracks.
#[derive(Debug, Clone, Default)]
pub struct GpxDocument {
    /// Value of the `creator` attribute on the `<gpx>` root, used as the
    /// `host` label of every emitted envelope.
    pub creator: Option<String>,
    pub tracks: Vec<Track>,
}

/// A named journey: an ordered sequence of segments.
#[derive(Debug, Clone, Default)]
pub struct Track {
    pub name: Option<String>,
    pub segments: Vec<Segment>,
}

impl Track {
    /// Total number of points across all segments.
    pub fn point_count(&self) -> usize {
        self.segments.iter().map(|s| s.points.len()).sum()
    }
}

/// An ordered sequence of points. Segments group points but do not reset
/// point-to-point derivations during analysis.
#[derive(Debug, Clone, Default)]
pub struct Segment {
    pub points: Vec<TrackPoint>,
}

/// A single recorded position.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Elevation in meters, absent when the recording carries none.
    pub elevation: Option<f64>,
    pub time: Option<PointTime>,
    pub extensions: Vec<PointExtension>,
}

impl TrackPoint {
    /// Create a new point without elevation, time, or extensions.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: None,
            time: None,
            extensions: Vec::new(),
        }
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

/// A namespaced key/value annotation attached to a point (e.g. a
/// heart-rate sensor reading). The tag is kept as parsed; the analysis
/// derives the short field name from it.
#[derive(Debug, Clone, PartialEq)]
pub struct PointExtension {
    pub tag: String,
    pub value: String,
}

// ============================================================================
// Event Records
// ============================================================================

/// Metadata wrapped around every emitted record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope {
    /// Event time as epoch seconds.
    #[serde(rename = "_time")]
    pub time: f64,
    pub sourcetype: String,
    /// The input filename.
    pub source: String,
    /// The track creator label.
    pub host: String,
}

/// One track summary event: envelope plus the typed record body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackEvent {
    pub envelope: Envelope,
    pub record: TrackRecord,
}

/// One per-point event: envelope plus the pre-built textual record body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointEvent {
    pub envelope: Envelope,
    pub body: String,
}

/// Track-level summary record. Optional fields serialize as explicit
/// `null` when the underlying data is absent or insufficient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackRecord {
    pub name: Option<String>,
    /// 1-based sequence index among the tracks of the file.
    pub track_seq: u32,
    /// Start time formatted as `YYYY-MM-DD HH:MM:SS +ZZZZ`.
    pub ts: Option<String>,
    pub distance_2d_m: f64,
    pub distance_3d_m: f64,
    pub duration_s: Option<f64>,
    pub delev_downhill_m: Option<f64>,
    pub delev_uphill_m: Option<f64>,
    pub elev_min_m: Option<f64>,
    pub elev_max_m: Option<f64>,
    pub moving: MovingSummary,
    pub stopped: StoppedSummary,
    pub stats: TrackStats,
}

/// Aggregates over the in-motion share of a track.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovingSummary {
    pub duration_s: f64,
    pub distance_m: f64,
    /// Moving distance / moving time; absent when moving time is zero.
    pub avg_speed_mps: Option<f64>,
    /// Pace in seconds per kilometer; absent when average speed is zero.
    pub avg_tempo_spk: Option<f64>,
}

/// Aggregates over the stationary share of a track.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoppedSummary {
    pub distance_m: f64,
    pub duration_s: f64,
}

/// Derived statistics over a track's point-to-point sample streams.
/// Means are absent without samples; standard deviations additionally
/// require at least two.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TrackStats {
    pub hr_avg: Option<f64>,
    pub hr_stddev: Option<f64>,
    pub speed_avg: Option<f64>,
    pub speed_stdev: Option<f64>,
    pub tempo_avg: Option<f64>,
    pub tempo_stdev: Option<f64>,
}
