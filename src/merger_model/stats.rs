use itertools::Itertools;
use sampling::{HistF64, Histogram};
use serde::{Serialize, Deserialize};

/// Percentiles used as +- 1 sigma proxies
pub const LOWER_PERCENTILE: f64 = 15.9;
pub const MEDIAN_PERCENTILE: f64 = 50.0;
pub const UPPER_PERCENTILE: f64 = 84.1;

/// Percentile `p` (in percent) of an ascending slice.
///
/// Linear interpolation between the two closest order statistics,
/// rank = p/100 * (n-1). Returns None for an empty slice.
pub fn percentile_of_sorted(sorted: &[f64], p: f64) -> Option<f64>
{
    let last = sorted.len().checked_sub(1)?;
    let rank = (p / 100.0).clamp(0.0, 1.0) * last as f64;
    let lo = rank.floor() as usize;
    let hi = (lo + 1).min(last);
    let frac = rank - lo as f64;
    let left = sorted[lo];
    Some(left + (sorted[hi] - left) * frac)
}

/// Median and asymmetric 1 sigma interval of a set of merger counts
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MergerCountSummary{
    pub median: f64,
    pub lower: f64,
    pub upper: f64,
    /// median - lower
    pub lower_offset: f64,
    /// upper - median
    pub upper_offset: f64
}

impl MergerCountSummary{
    /// None if `sorted` is empty
    pub fn from_sorted(sorted: &[f64]) -> Option<Self>
    {
        let median = percentile_of_sorted(sorted, MEDIAN_PERCENTILE)?;
        let lower = percentile_of_sorted(sorted, LOWER_PERCENTILE)?;
        let upper = percentile_of_sorted(sorted, UPPER_PERCENTILE)?;
        Some(
            Self{
                median,
                lower,
                upper,
                lower_offset: median - lower,
                upper_offset: upper - median
            }
        )
    }
}

/// Histogram of merger counts, binned between the smallest and the largest count
#[derive(Debug, Clone)]
pub struct MergerCountHist{
    hist: HistF64,
    /// values the histogram refused, should stay 0
    pub missed: usize
}

impl MergerCountHist{
    /// None if `sorted` is empty
    pub fn from_sorted(sorted: &[f64], bins: usize) -> Option<Self>
    {
        let left = *sorted.first()?;
        let last = *sorted.last()?;
        // right border is exclusive, widen it a little so the maximum is counted
        let (left, right) = if last > left {
            let pad = ((last - left) * 1e-9).max(last.abs() * 1e-12);
            (left, last + pad)
        } else {
            (left - 0.5, left + 0.5)
        };
        let mut hist = HistF64::new(left, right, bins.max(1)).ok()?;
        let mut missed = 0;
        for &val in sorted {
            if hist.increment(val).is_err() {
                missed += 1;
            }
        }
        if missed > 0 {
            tracing::warn!(missed, "merger counts outside of histogram range");
        }
        Some(Self { hist, missed })
    }

    pub fn total(&self) -> usize
    {
        self.hist.hist().iter().sum()
    }

    /// (bin_left, bin_right, hits, density)
    pub fn bin_iter(&'_ self) -> impl Iterator<Item=(f64, f64, usize, f64)> + '_
    {
        let borders = self.hist.borders();
        let bin_size = borders[1] - borders[0];
        let norm_factor = (self.total() as f64 * bin_size).recip();
        self.hist.bin_hits_iter()
            .map(
                move |(bin, hits)|
                {
                    (bin[0], bin[1], hits, hits as f64 * norm_factor)
                }
            )
    }
}

/// Sorts ascending, non-finite values are dropped
pub fn sorted_finite<I>(iter: I) -> Vec<f64>
where I: IntoIterator<Item = f64>
{
    iter.into_iter()
        .filter(|v| v.is_finite())
        .sorted_unstable_by(f64::total_cmp)
        .collect()
}
