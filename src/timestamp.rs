//! Timestamp parsing and epoch normalization.
//!
//! GPX `<time>` values are usually RFC 3339 with an offset, but naive
//! ISO-8601 values occur in the wild. Both are carried explicitly so the
//! epoch conversion can honor the difference: naive values are treated as
//! UTC, while aware values are measured against 1970-01-01T00:00:00 at
//! their own offset.

use time::format_description::well_known::{Iso8601, Rfc3339};
use time::macros::{datetime, format_description};
use time::{OffsetDateTime, PrimitiveDateTime};

/// A point-in-time from a GPX file, aware or naive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointTime {
    /// Carries a UTC offset.
    Aware(OffsetDateTime),
    /// No offset recorded; treated as UTC.
    Naive(PrimitiveDateTime),
}

impl PointTime {
    /// Parse a GPX `<time>` text value. Returns `None` for text that is
    /// neither RFC 3339 nor naive ISO-8601.
    pub fn parse(text: &str) -> Option<PointTime> {
        let trimmed = text.trim();
        if let Ok(t) = OffsetDateTime::parse(trimmed, &Rfc3339) {
            return Some(PointTime::Aware(t));
        }
        if let Ok(t) = PrimitiveDateTime::parse(trimmed, &Iso8601::DEFAULT) {
            return Some(PointTime::Naive(t));
        }
        None
    }

    /// Seconds since 1970-01-01T00:00:00 in this value's own frame:
    /// UTC for naive values, the value's offset for aware ones.
    pub fn epoch_seconds(&self) -> f64 {
        match self {
            PointTime::Naive(t) => (*t - datetime!(1970-01-01 00:00:00)).as_seconds_f64(),
            PointTime::Aware(t) => {
                let reference = datetime!(1970-01-01 00:00:00).assume_offset(t.offset());
                (*t - reference).as_seconds_f64()
            }
        }
    }

    /// Format as `YYYY-MM-DD HH:MM:SS +ZZZZ`. Naive values render as UTC.
    pub fn format_event_ts(&self) -> String {
        let format = format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second] \
             [offset_hour sign:mandatory][offset_minute]"
        );
        let aware = match self {
            PointTime::Aware(t) => *t,
            PointTime::Naive(t) => t.assume_utc(),
        };
        aware.format(&format).unwrap_or_default()
    }
}

/// Epoch seconds for an optional point time; missing values fall back to
/// the current wall-clock time. This fabricates a timestamp rather than
/// failing; use [`epoch_seconds_at`] when determinism matters.
pub fn epoch_seconds(time: Option<&PointTime>) -> f64 {
    epoch_seconds_at(time, OffsetDateTime::now_utc())
}

/// Deterministic variant of [`epoch_seconds`]: `now` supplies the
/// missing-timestamp fallback.
pub fn epoch_seconds_at(time: Option<&PointTime>, now: OffsetDateTime) -> f64 {
    match time {
        Some(t) => t.epoch_seconds(),
        None => (now - OffsetDateTime::UNIX_EPOCH).as_seconds_f64(),
    }
}
