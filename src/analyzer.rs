//! File-level analysis pipeline: parse, summarize, walk, wrap.

use std::fs;
use std::path::Path;

use log::{debug, warn};
use time::OffsetDateTime;

use crate::error::Result;
use crate::stream::walk_track;
use crate::summary::{start_time, summarize_track};
use crate::timestamp::epoch_seconds_at;
use crate::{
    parser, Envelope, GpxDocument, PointEvent, TrackEvent, TrackStats, SOURCETYPE_POINT,
    SOURCETYPE_TRACK,
};

/// Host label used when the document carries no creator.
const UNKNOWN_HOST: &str = "unknown";

/// Result of analyzing one GPX file: the track and point event streams.
#[derive(Debug, Clone, Default)]
pub struct FileAnalysis {
    pub tracks: Vec<TrackEvent>,
    pub points: Vec<PointEvent>,
}

/// Read and analyze one GPX file. The file name becomes the `source`
/// label of every emitted envelope. File and parse failures are returned
/// to the caller; they never abort the process.
pub fn analyze_file(path: &Path) -> Result<FileAnalysis> {
    let xml = fs::read_to_string(path)?;
    let doc = parser::parse_gpx(&xml)?;
    let source = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown");
    Ok(analyze_document(&doc, source))
}

/// Analyze an already-parsed document. Untimed points fall back to the
/// current wall-clock time for their event timestamps.
pub fn analyze_document(doc: &GpxDocument, source: &str) -> FileAnalysis {
    analyze_document_at(doc, source, OffsetDateTime::now_utc())
}

/// Deterministic variant of [`analyze_document`]: `now` supplies the
/// fallback timestamp for untimed points.
pub fn analyze_document_at(doc: &GpxDocument, source: &str, now: OffsetDateTime) -> FileAnalysis {
    let host = doc.creator.as_deref().unwrap_or(UNKNOWN_HOST);
    let mut analysis = FileAnalysis::default();

    for (index, track) in doc.tracks.iter().enumerate() {
        let track_seq = index as u32 + 1;
        debug!(
            "analyzing track {} ({} points)",
            track_seq,
            track.point_count()
        );
        if track.point_count() < 2 {
            warn!(
                "track {} has fewer than 2 points; speed/pace statistics will be absent",
                track_seq
            );
        }

        let mut record = summarize_track(track, track_seq);
        let (lines, samples) = walk_track(track, track_seq, now);
        record.stats = TrackStats::from_samples(&samples);

        analysis.tracks.push(TrackEvent {
            envelope: Envelope {
                time: epoch_seconds_at(start_time(track), now),
                sourcetype: SOURCETYPE_TRACK.to_string(),
                source: source.to_string(),
                host: host.to_string(),
            },
            record,
        });

        for line in lines {
            analysis.points.push(PointEvent {
                envelope: Envelope {
                    time: line.epoch,
                    sourcetype: SOURCETYPE_POINT.to_string(),
                    source: source.to_string(),
                    host: host.to_string(),
                },
                body: line.body,
            });
        }
    }

    analysis
}
