//! Sample statistics over f64 collections.

use crate::stream::SampleSet;
use crate::TrackStats;

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n-1 denominator); `None` below two samples.
pub fn stdev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

/// Round to `decimals` decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

impl TrackStats {
    /// Finalize the statistics block from a walk's sample collections.
    /// Absent fields mean insufficient samples: means need at least one,
    /// standard deviations at least two.
    pub fn from_samples(samples: &SampleSet) -> Self {
        Self {
            hr_avg: mean(&samples.heart_rates).map(|v| round_to(v, 0)),
            hr_stddev: stdev(&samples.heart_rates).map(|v| round_to(v, 6)),
            speed_avg: mean(&samples.speeds).map(|v| round_to(v, 3)),
            speed_stdev: stdev(&samples.speeds).map(|v| round_to(v, 6)),
            tempo_avg: mean(&samples.tempos).map(|v| round_to(v, 1)),
            tempo_stdev: stdev(&samples.tempos).map(|v| round_to(v, 6)),
        }
    }
}
