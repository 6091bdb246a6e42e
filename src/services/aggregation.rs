//! Daily summary statistics over a sensor's readings.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailySummary {
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AggregationError {
    #[error("No readings to aggregate")]
    EmptySeries,
}

/// Summarize the non-null readings of one day.
///
/// Quartiles use linear interpolation between the closest ranks of the
/// sorted sample, so `[1, 2, 3, 4, 5]` gives `q1 = 2`, `median = 3`,
/// `q3 = 4`.
///
/// # Errors
///
/// Returns [`AggregationError::EmptySeries`] when there is nothing to
/// summarize (no readings, or only nulls/NaNs).
pub fn summarize(values: &[Option<f64>]) -> Result<DailySummary, AggregationError> {
    let mut sorted: Vec<f64> = values
        .iter()
        .flatten()
        .copied()
        .filter(|v| !v.is_nan())
        .collect();

    if sorted.is_empty() {
        return Err(AggregationError::EmptySeries);
    }

    sorted.sort_by(f64::total_cmp);

    Ok(DailySummary {
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        q1: percentile(&sorted, 25.0),
        median: percentile(&sorted, 50.0),
        q3: percentile(&sorted, 75.0),
    })
}

/// `p`-th percentile (0..=100) of an ascending, non-empty slice.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}
