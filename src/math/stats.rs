//! Goodness-of-fit statistics shared by every fitter.

use crate::domain::{FitQuality, Sample};

/// Compute SSE / RMSE / R² of a fitted function over the samples.
///
/// `predict` is evaluated at each sample's `x`. An empty slice yields a zeroed
/// quality record.
pub fn fit_quality(samples: &[Sample], predict: impl Fn(f64) -> f64) -> FitQuality {
    let n = samples.len();
    if n == 0 {
        return FitQuality {
            sse: 0.0,
            rmse: 0.0,
            r_squared: 1.0,
            n: 0,
        };
    }

    let mean_y = samples.iter().map(|s| s.y).sum::<f64>() / n as f64;

    let mut sse = 0.0;
    let mut sst = 0.0;
    for s in samples {
        let r = s.y - predict(s.x);
        sse += r * r;
        sst += (s.y - mean_y) * (s.y - mean_y);
    }

    let r_squared = if sst > 0.0 { 1.0 - sse / sst } else { 1.0 };

    FitQuality {
        sse,
        rmse: (sse / n as f64).sqrt(),
        r_squared,
        n,
    }
}

/// Minimum and maximum of the finite values, or `None` if there are none.
pub fn finite_range(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        if v.is_finite() {
            min = min.min(v);
            max = max.max(v);
        }
    }
    if min.is_finite() && max.is_finite() {
        Some((min, max))
    } else {
        None
    }
}
