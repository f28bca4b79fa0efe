//! Percentiles with linear interpolation between closest ranks.

/// The `q`-th percentile (0.0..=100.0) of `sorted`, which must be sorted
/// ascending and non-empty.
///
/// The rank is `q / 100 * (n - 1)`; fractional ranks interpolate linearly
/// between the two neighbouring values.
pub fn percentile(sorted: &[f32], q: f32) -> f32 {
    debug_assert!(!sorted.is_empty());
    let rank = (q / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f32;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f32;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}
