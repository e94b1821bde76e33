//! Unified error handling for GPX parsing and analysis.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GpxFeedError>;

/// Errors surfaced while reading or parsing a GPX file.
///
/// Insufficient-data conditions (too few samples, zero moving time,
/// missing timestamps) are not errors; they degrade to absent values in
/// the emitted records.
#[derive(Debug, Error)]
pub enum GpxFeedError {
    #[error("failed to read GPX file: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("not a GPX document: no <gpx> root element")]
    NotGpx,

    #[error("missing attribute '{attribute}' on <{element}>")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("invalid value '{value}' for attribute '{attribute}' on <{element}>")]
    InvalidAttribute {
        element: &'static str,
        attribute: &'static str,
        value: String,
    },
}
