//! Tests for error module

use gpxfeed::error::GpxFeedError;

#[test]
fn test_missing_attribute_display() {
    let err = GpxFeedError::MissingAttribute {
        element: "trkpt",
        attribute: "lat",
    };
    let msg = err.to_string();
    assert!(msg.contains("trkpt"));
    assert!(msg.contains("lat"));
}

#[test]
fn test_invalid_attribute_display() {
    let err = GpxFeedError::InvalidAttribute {
        element: "trkpt",
        attribute: "lon",
        value: "east".to_string(),
    };
    let msg = err.to_string();
    assert!(msg.contains("lon"));
    assert!(msg.contains("east"));
}

#[test]
fn test_not_gpx_display() {
    assert!(GpxFeedError::NotGpx.to_string().contains("GPX"));
}

#[test]
fn test_io_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let err: GpxFeedError = io.into();
    assert!(matches!(err, GpxFeedError::Io(_)));
}
