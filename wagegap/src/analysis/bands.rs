//! Job-prestige bands for the faceted income chart.
//!
//! The observed prestige range is cut into six equal-width, right-closed
//! intervals. The lowest edge is pulled down by 0.1% of the range so the
//! minimum itself falls in the first band.

use crate::domain::CleanedTable;

pub const BAND_COUNT: usize = 6;

/// Band labels in ascending prestige order.
pub const BAND_LABELS: [&str; BAND_COUNT] = ["lowest", "low", "mid-low", "mid-high", "high", "highest"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrestigeBands {
    edges: [f64; BAND_COUNT + 1],
}

impl PrestigeBands {
    /// Bands spanning `[min, max]`. `None` for non-finite or inverted input.
    #[must_use]
    pub fn from_range(min: f64, max: f64) -> Option<Self> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return None;
        }
        let (mut lo, mut hi) = (min, max);
        if lo == hi {
            // Degenerate range: widen both sides
            let pad = if lo == 0.0 { 0.001 } else { 0.001 * lo.abs() };
            lo -= pad;
            hi += pad;
        }

        let width = hi - lo;
        let mut edges = [0.0; BAND_COUNT + 1];
        for (i, edge) in edges.iter_mut().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let offset = width * i as f64 / BAND_COUNT as f64;
            *edge = lo + offset;
        }
        edges[BAND_COUNT] = hi;
        if min < max {
            edges[0] -= width * 0.001;
        }
        Some(Self { edges })
    }

    /// Bands spanning the observed values. `None` when there are none.
    #[must_use]
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Option<Self> {
        let (min, max) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })?;
        Self::from_range(min, max)
    }

    /// `(label, lower, upper)` for each band, lower exclusive, upper inclusive.
    pub fn intervals(&self) -> impl Iterator<Item = (&'static str, f64, f64)> + '_ {
        BAND_LABELS.iter().zip(self.edges.windows(2)).map(|(label, w)| (*label, w[0], w[1]))
    }

    /// Index of the band containing `value`, `None` outside the range.
    #[must_use]
    pub fn band_of(&self, value: f64) -> Option<usize> {
        if !(value > self.edges[0] && value <= self.edges[BAND_COUNT]) {
            return None;
        }
        self.edges[1..].iter().position(|&upper| value <= upper)
    }
}

/// A respondent kept for the faceted chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BandedIncome {
    pub band: usize,
    pub sex: String,
    pub income: f64,
    pub job_prestige: f64,
}

/// Drop rows missing prestige, income or sex, then assign prestige bands
/// computed over what remains.
#[must_use]
pub fn band_income_by_prestige(table: &CleanedTable) -> Option<(PrestigeBands, Vec<BandedIncome>)> {
    let complete: Vec<(&str, f64, f64)> = table
        .iter()
        .filter_map(|r| Some((r.sex.as_deref()?, r.income?, r.job_prestige?)))
        .collect();

    let bands = PrestigeBands::from_values(complete.iter().map(|&(_, _, prestige)| prestige))?;
    let banded = complete
        .into_iter()
        .filter_map(|(sex, income, job_prestige)| {
            Some(BandedIncome { band: bands.band_of(job_prestige)?, sex: sex.to_string(), income, job_prestige })
        })
        .collect();
    Some((bands, banded))
}
