//! Descriptive statistics shared by the static charts.

// Sample sizes are converted to f64 for averaging
#![allow(clippy::cast_precision_loss)]

/// Arithmetic mean, `None` for an empty input.
#[must_use]
pub fn mean<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    let (sum, n) = values.into_iter().fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Round half away from zero to `places` decimals.
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

/// Quantile of sorted data using linear interpolation between closest ranks.
#[must_use]
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let pos = q * (sorted.len() - 1) as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let lower = pos.floor() as usize;
    let upper = (lower + 1).min(sorted.len() - 1);
    let weight = pos - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

/// Five-number summary with Tukey fences, as drawn by a box plot.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub n: usize,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Smallest observation within `q1 - 1.5 * IQR`.
    pub lower_fence: f64,
    /// Largest observation within `q3 + 1.5 * IQR`.
    pub upper_fence: f64,
    pub mean: f64,
    /// Observations beyond either fence, ascending.
    pub outliers: Vec<f64>,
}

impl BoxStats {
    /// Summarise a sample. Returns `None` when it is empty.
    #[must_use]
    pub fn from_values(mut values: Vec<f64>) -> Option<Self> {
        values.retain(|v| v.is_finite());
        values.sort_unstable_by(f64::total_cmp);

        let q1 = quantile(&values, 0.25)?;
        let median = quantile(&values, 0.5)?;
        let q3 = quantile(&values, 0.75)?;
        let iqr = q3 - q1;
        let (low_limit, high_limit) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

        // The quartiles always lie inside the limits, so both searches find a value
        let lower_fence = values.iter().copied().find(|&v| v >= low_limit).unwrap_or(q1);
        let upper_fence = values.iter().rev().copied().find(|&v| v <= high_limit).unwrap_or(q3);
        let outliers = values.iter().copied().filter(|&v| v < lower_fence || v > upper_fence).collect();

        Some(Self {
            n: values.len(),
            q1,
            median,
            q3,
            lower_fence,
            upper_fence,
            mean: mean(values.iter().copied())?,
            outliers,
        })
    }
}

/// Ordinary least squares fit of `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub n: usize,
}

impl LinearFit {
    /// Fit a line through `(x, y)` points.
    ///
    /// Returns `None` with fewer than two points or when every `x` is equal.
    #[must_use]
    pub fn fit(points: &[(f64, f64)]) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        let mean_x = mean(points.iter().map(|p| p.0))?;
        let mean_y = mean(points.iter().map(|p| p.1))?;

        let (sxx, sxy, syy) = points.iter().fold((0.0, 0.0, 0.0), |(sxx, sxy, syy), &(x, y)| {
            let (dx, dy) = (x - mean_x, y - mean_y);
            (sxx + dx * dx, sxy + dx * dy, syy + dy * dy)
        });
        if sxx == 0.0 {
            return None;
        }

        let slope = sxy / sxx;
        let intercept = mean_y - slope * mean_x;
        // A flat response is fitted exactly
        let r_squared = if syy == 0.0 { 1.0 } else { (sxy * sxy) / (sxx * syy) };

        Some(Self { slope, intercept, r_squared, n: points.len() })
    }

    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}
