//! Percentile Computation
//!
//! Order statistics over retained timing samples. Tail percentiles (p90, p99)
//! are reported next to the median so slow outliers stay visible.

/// Percentile (0-100) of an ascending-sorted slice, `None` when empty.
///
/// Uses linear interpolation between nearest ranks; out-of-range percentiles
/// are clamped.
///
/// # Examples
///
/// ```
/// # use roundbench_stats::percentile_of_sorted;
/// let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(percentile_of_sorted(&sorted, 50.0), Some(3.0));
/// assert_eq!(percentile_of_sorted(&[], 50.0), None);
/// ```
pub fn percentile_of_sorted(sorted: &[f64], percentile: f64) -> Option<f64> {
    let n = sorted.len();
    match n {
        0 => return None,
        1 => return Some(sorted[0]),
        _ => {}
    }

    let p = (percentile / 100.0).clamp(0.0, 1.0);
    let rank = p * (n - 1) as f64;
    let lower_idx = rank.floor() as usize;
    let upper_idx = (lower_idx + 1).min(n - 1);
    let fraction = rank - lower_idx as f64;

    Some(sorted[lower_idx] + fraction * (sorted[upper_idx] - sorted[lower_idx]))
}

/// Median of an ascending-sorted slice, `None` when empty.
///
/// Odd counts give the middle element, even counts the mean of the two
/// middle elements.
pub fn median_of_sorted(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let mid = n / 2;
    if n % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: u32) -> Vec<f64> {
        (1..=n).map(f64::from).collect()
    }

    #[test]
    fn test_quartiles() {
        let sorted = ramp(100);
        let p25 = percentile_of_sorted(&sorted, 25.0).unwrap();
        let p75 = percentile_of_sorted(&sorted, 75.0).unwrap();

        assert!((p25 - 25.75).abs() < 1e-9);
        assert!((p75 - 75.25).abs() < 1e-9);
    }

    #[test]
    fn test_tail_percentiles() {
        let sorted = ramp(100);
        let p90 = percentile_of_sorted(&sorted, 90.0).unwrap();
        let p99 = percentile_of_sorted(&sorted, 99.0).unwrap();
        assert!(p90 > 89.0 && p90 < 91.0);
        assert!(p99 > 98.0 && p99 < 100.0);
    }

    #[test]
    fn test_single_sample() {
        assert_eq!(percentile_of_sorted(&[42.0], 99.0), Some(42.0));
        assert_eq!(median_of_sorted(&[42.0]), Some(42.0));
    }

    #[test]
    fn test_empty_samples() {
        assert_eq!(percentile_of_sorted(&[], 50.0), None);
        assert_eq!(percentile_of_sorted(&[], 99.0), None);
        assert_eq!(median_of_sorted(&[]), None);
    }

    #[test]
    fn test_out_of_range_percentile_clamps() {
        let sorted = [1.0, 2.0, 3.0];
        assert_eq!(percentile_of_sorted(&sorted, 150.0), Some(3.0));
        assert_eq!(percentile_of_sorted(&sorted, -5.0), Some(1.0));
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median_of_sorted(&[1.0, 3.0, 5.0]), Some(3.0));
        assert_eq!(median_of_sorted(&[1.0, 3.0, 5.0, 7.0]), Some(4.0));
    }
}
