//! Peak detection on a sampled curve (Franck–Hertz plate current).
//!
//! A peak is a local maximum whose topographic prominence reaches a threshold.
//! The curve must rise into `y[i]` and fall after it; a flat top counts once,
//! at its left edge, and a plateau that rises again or runs off the end of the
//! data is not a peak.
//! Prominence is the height of the peak above the higher of the two lowest
//! points reachable on each side before the curve climbs above the peak.

use crate::domain::Sample;

/// A detected peak.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    /// Index into the input samples.
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub prominence: f64,
}

/// Find peaks with `prominence >= min_prominence`, in input order.
pub fn find_peaks(samples: &[Sample], min_prominence: f64) -> Vec<Peak> {
    let n = samples.len();
    if n < 3 {
        return Vec::new();
    }

    let mut peaks = Vec::new();
    for i in 1..(n - 1) {
        let y0 = samples[i].y;
        if !y0.is_finite() {
            continue;
        }
        if !(samples[i - 1].y < y0) {
            continue;
        }
        let after = samples[i + 1..].iter().map(|s| s.y).find(|&y| y != y0);
        if !after.is_some_and(|y| y < y0) {
            continue;
        }

        let mut left_min = y0;
        for s in samples[..i].iter().rev() {
            if s.y > y0 {
                break;
            }
            left_min = left_min.min(s.y);
        }
        let mut right_min = y0;
        for s in &samples[i + 1..] {
            if s.y > y0 {
                break;
            }
            right_min = right_min.min(s.y);
        }

        let prominence = (y0 - left_min.max(right_min)).max(0.0);
        if prominence >= min_prominence {
            peaks.push(Peak {
                index: i,
                x: samples[i].x,
                y: y0,
                prominence,
            });
        }
    }
    peaks
}

/// Mean distance along `x` between successive peaks.
///
/// For a Franck–Hertz curve this is the first excitation potential of the
/// filling gas. `None` with fewer than two peaks.
pub fn mean_peak_spacing(peaks: &[Peak]) -> Option<f64> {
    if peaks.len() < 2 {
        return None;
    }
    let first = peaks[0].x;
    let last = peaks[peaks.len() - 1].x;
    Some((last - first) / (peaks.len() - 1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::zip_samples;

    #[test]
    fn finds_isolated_maxima() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let ys = [0.0, 5.0, 1.0, 1.0, 8.0, 2.0, 3.0];
        let peaks = find_peaks(&zip_samples(&xs, &ys), 1.0);
        let at: Vec<f64> = peaks.iter().map(|p| p.x).collect();
        assert_eq!(at, vec![1.0, 4.0]);
        assert_eq!(peaks[0].prominence, 4.0);
        assert_eq!(peaks[1].prominence, 6.0);
    }

    #[test]
    fn small_wiggles_are_filtered_by_prominence() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let ys = [0.0, 10.0, 9.5, 9.8, 2.0, 6.0, 0.0];
        let peaks = find_peaks(&zip_samples(&xs, &ys), 1.0);
        let at: Vec<f64> = peaks.iter().map(|p| p.x).collect();
        assert_eq!(at, vec![1.0, 5.0]);
    }

    #[test]
    fn plateau_counts_once() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = [0.0, 3.0, 3.0, 3.0, 0.0];
        let peaks = find_peaks(&zip_samples(&xs, &ys), 0.5);
        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0].index, 1);
    }

    #[test]
    fn plateau_that_rises_again_is_not_a_peak() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = [0.0, 3.0, 3.0, 5.0, 0.0];
        let peaks = find_peaks(&zip_samples(&xs, &ys), 0.0);
        let at: Vec<f64> = peaks.iter().map(|p| p.x).collect();
        assert_eq!(at, vec![3.0]);
        assert_eq!(peaks[0].prominence, 5.0);
    }

    #[test]
    fn rising_edge_at_end_of_data_is_not_a_peak() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [0.0, 2.0, 2.0, 2.0];
        assert!(find_peaks(&zip_samples(&xs, &ys), 0.0).is_empty());
    }

    #[test]
    fn spacing_of_regular_peaks() {
        let peaks: Vec<Peak> = [10.0, 15.0, 20.0, 25.0]
            .iter()
            .enumerate()
            .map(|(i, &x)| Peak { index: i, x, y: 1.0, prominence: 1.0 })
            .collect();
        assert_eq!(mean_peak_spacing(&peaks), Some(5.0));
        assert_eq!(mean_peak_spacing(&peaks[..1]), None);
    }

    #[test]
    fn too_short_input_has_no_peaks() {
        assert!(find_peaks(&zip_samples(&[0.0, 1.0], &[0.0, 1.0]), 0.0).is_empty());
    }
}
