//! Event emission: marker lines plus record bodies on an `io::Write` sink.
//!
//! Track events each get their own marker line followed by a sorted-key
//! JSON body. Point events share one marker line per stream, followed by
//! one body line per point.

use std::io::{self, Write};

use crate::{Envelope, PointEvent, TrackEvent};

/// Fixed marker introducing every emitted record stream.
pub const MARKER: &str = "***SPLUNK***";

/// Format the marker line for an envelope.
pub fn marker_line(envelope: &Envelope) -> String {
    format!(
        "{} sourcetype=\"{}\" source=\"{}\" host=\"{}\"",
        MARKER, envelope.sourcetype, envelope.source, envelope.host
    )
}

/// Write one track event: marker line, then the JSON body with keys in
/// lexicographic order.
pub fn write_track_event<W: Write>(out: &mut W, event: &TrackEvent) -> io::Result<()> {
    writeln!(out, "{}", marker_line(&event.envelope))?;
    let body = serde_json::to_value(&event.record)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(out, "{body}")
}

/// Write a point stream: one marker line taken from the first event,
/// then one body line per point. An empty stream writes nothing.
pub fn write_point_events<W: Write>(out: &mut W, events: &[PointEvent]) -> io::Result<()> {
    let Some(first) = events.first() else {
        return Ok(());
    };
    writeln!(out, "{}", marker_line(&first.envelope))?;
    for event in events {
        writeln!(out, "{}", event.body)?;
    }
    Ok(())
}
