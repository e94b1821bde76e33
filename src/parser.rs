//! Streaming GPX parser producing the track/segment/point model.
//!
//! Only what the analysis needs is materialized: the root `creator`,
//! tracks with names, segments, and points with position, time,
//! elevation, and the text-bearing leaf elements of `<extensions>`.
//! Everything else is skipped.

use log::warn;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{GpxFeedError, Result};
use crate::{GpxDocument, PointExtension, PointTime, Segment, Track, TrackPoint};

/// Parse a GPX XML string into a document.
///
/// Points with missing or out-of-range coordinates are skipped with a
/// warning; a document without a `<gpx>` root is rejected.
pub fn parse_gpx(xml: &str) -> Result<GpxDocument> {
    let mut reader = Reader::from_str(xml);
    let mut doc = GpxDocument::default();
    let mut saw_root = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"gpx" => {
                    saw_root = true;
                    doc.creator = parse_creator(&e)?;
                }
                b"trk" => doc.tracks.push(parse_track(&mut reader)?),
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"gpx" {
                    saw_root = true;
                    doc.creator = parse_creator(&e)?;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(GpxFeedError::Xml(e)),
            _ => {}
        }
    }

    if !saw_root {
        return Err(GpxFeedError::NotGpx);
    }

    Ok(doc)
}

/// Extract the `creator` attribute from the `<gpx>` root tag.
fn parse_creator(e: &BytesStart<'_>) -> Result<Option<String>> {
    for attr_result in e.attributes() {
        let attr = attr_result.map_err(|e| GpxFeedError::Xml(e.into()))?;
        if attr.key.local_name().as_ref() == b"creator" {
            return Ok(Some(String::from_utf8_lossy(&attr.value).into_owned()));
        }
    }
    Ok(None)
}

/// Parse a `<trk>` element.
fn parse_track<'a>(reader: &mut Reader<&'a [u8]>) -> Result<Track> {
    let mut track = Track::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"name" => track.name = Some(read_text_owned(reader, &e)?),
                b"trkseg" => track.segments.push(parse_segment(reader)?),
                _ => {
                    reader.read_to_end(e.name()).map_err(GpxFeedError::Xml)?;
                }
            },
            Ok(Event::End(e)) if e.local_name().as_ref() == b"trk" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(GpxFeedError::Xml(e)),
            _ => {}
        }
    }

    Ok(track)
}

/// Parse a `<trkseg>` element.
fn parse_segment<'a>(reader: &mut Reader<&'a [u8]>) -> Result<Segment> {
    let mut segment = Segment::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"trkpt" => {
                    if let Some(pt) = parse_point(&e, reader)? {
                        segment.points.push(pt);
                    }
                }
                _ => {
                    reader.read_to_end(e.name()).map_err(GpxFeedError::Xml)?;
                }
            },
            Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"trkpt" {
                    if let Ok((lat, lon)) = parse_lat_lon(&e) {
                        let pt = TrackPoint::new(lat, lon);
                        if pt.is_valid() {
                            segment.points.push(pt);
                        } else {
                            warn!("skipping <trkpt> with out-of-range position {lat},{lon}");
                        }
                    }
                }
            }
            Ok(Event::End(e)) if e.local_name().as_ref() == b"trkseg" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(GpxFeedError::Xml(e)),
            _ => {}
        }
    }

    Ok(segment)
}

/// Parse lat/lon attributes from a `<trkpt>` start tag.
fn parse_lat_lon(e: &BytesStart<'_>) -> Result<(f64, f64)> {
    let mut lat: Option<f64> = None;
    let mut lon: Option<f64> = None;

    for attr_result in e.attributes() {
        let attr = attr_result.map_err(|e| GpxFeedError::Xml(e.into()))?;
        let key = attr.key.local_name();
        let val = std::str::from_utf8(&attr.value).unwrap_or_default();
        match key.as_ref() {
            b"lat" => {
                lat = Some(val.parse::<f64>().map_err(|_| {
                    GpxFeedError::InvalidAttribute {
                        element: "trkpt",
                        attribute: "lat",
                        value: val.to_string(),
                    }
                })?);
            }
            b"lon" => {
                lon = Some(val.parse::<f64>().map_err(|_| {
                    GpxFeedError::InvalidAttribute {
                        element: "trkpt",
                        attribute: "lon",
                        value: val.to_string(),
                    }
                })?);
            }
            _ => {}
        }
    }

    let lat = lat.ok_or(GpxFeedError::MissingAttribute {
        element: "trkpt",
        attribute: "lat",
    })?;
    let lon = lon.ok_or(GpxFeedError::MissingAttribute {
        element: "trkpt",
        attribute: "lon",
    })?;

    Ok((lat, lon))
}

/// Parse a `<trkpt>` element and its children. Called after receiving
/// `Event::Start` for the point element. Points without usable
/// coordinates yield `None`.
fn parse_point<'a>(
    start: &BytesStart<'a>,
    reader: &mut Reader<&'a [u8]>,
) -> Result<Option<TrackPoint>> {
    let (lat, lon) = match parse_lat_lon(start) {
        Ok(coords) => coords,
        Err(e) => {
            warn!("skipping <trkpt>: {e}");
            reader.read_to_end(start.name()).map_err(GpxFeedError::Xml)?;
            return Ok(None);
        }
    };

    let mut point = TrackPoint::new(lat, lon);
    if !point.is_valid() {
        warn!("skipping <trkpt> with out-of-range position {lat},{lon}");
        reader.read_to_end(start.name()).map_err(GpxFeedError::Xml)?;
        return Ok(None);
    }

    let end_name = start.name().0.to_vec();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"ele" => {
                    let text = reader.read_text(e.name()).map_err(GpxFeedError::Xml)?;
                    point.elevation = text.trim().parse::<f64>().ok();
                }
                b"time" => {
                    let text = reader.read_text(e.name()).map_err(GpxFeedError::Xml)?;
                    point.time = PointTime::parse(&text);
                    if point.time.is_none() {
                        warn!("unparseable <time> value '{}', treating as missing", text.trim());
                    }
                }
                b"extensions" => {
                    parse_extensions(reader, &mut point.extensions)?;
                }
                _ => {
                    reader.read_to_end(e.name()).map_err(GpxFeedError::Xml)?;
                }
            },
            Ok(Event::End(e)) if e.name().0 == end_name.as_slice() => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(GpxFeedError::Xml(e)),
            _ => {}
        }
    }

    Ok(Some(point))
}

/// Collect every text-bearing leaf element under `<extensions>`,
/// recording its qualified tag and trimmed text. Covers both the Garmin
/// `TrackPointExtension` nesting and flat extension layouts.
fn parse_extensions<'a>(
    reader: &mut Reader<&'a [u8]>,
    extensions: &mut Vec<PointExtension>,
) -> Result<()> {
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => parse_extension_element(&e, reader, extensions)?,
            Ok(Event::End(e)) if e.local_name().as_ref() == b"extensions" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(GpxFeedError::Xml(e)),
            _ => {}
        }
    }
    Ok(())
}

fn parse_extension_element<'a>(
    start: &BytesStart<'a>,
    reader: &mut Reader<&'a [u8]>,
    extensions: &mut Vec<PointExtension>,
) -> Result<()> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let end_name = start.name().0.to_vec();
    let mut text = String::new();
    let mut had_children = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                had_children = true;
                parse_extension_element(&e, reader, extensions)?;
            }
            Ok(Event::Text(e)) => {
                text.push_str(std::str::from_utf8(e.as_ref()).unwrap_or_default());
            }
            Ok(Event::CData(e)) => {
                text.push_str(std::str::from_utf8(e.as_ref()).unwrap_or_default());
            }
            Ok(Event::End(e)) if e.name().0 == end_name.as_slice() => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(GpxFeedError::Xml(e)),
            _ => {}
        }
    }

    let trimmed = text.trim();
    if !had_children && !trimmed.is_empty() {
        extensions.push(PointExtension {
            tag,
            value: trimmed.to_string(),
        });
    }

    Ok(())
}

/// Read text content of an element as an owned String.
/// Handles regular text, CDATA sections, and entity references.
fn read_text_owned<'a>(reader: &mut Reader<&'a [u8]>, start: &BytesStart<'_>) -> Result<String> {
    let end_name = start.name().0.to_vec();
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Text(e)) => {
                text.push_str(std::str::from_utf8(e.as_ref()).unwrap_or_default());
            }
            Ok(Event::CData(e)) => {
                text.push_str(std::str::from_utf8(e.as_ref()).unwrap_or_default());
            }
            Ok(Event::GeneralRef(e)) => {
                if let Ok(Some(ch)) = e.resolve_char_ref() {
                    text.push(ch);
                } else {
                    // Predefined XML entities: amp, lt, gt, quot, apos
                    let name = std::str::from_utf8(e.as_ref()).unwrap_or_default();
                    match name {
                        "amp" => text.push('&'),
                        "lt" => text.push('<'),
                        "gt" => text.push('>'),
                        "quot" => text.push('"'),
                        "apos" => text.push('\''),
                        _ => {}
                    }
                }
            }
            Ok(Event::End(e)) if e.name().0 == end_name.as_slice() => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(GpxFeedError::Xml(e)),
            _ => {}
        }
    }

    Ok(text)
}
