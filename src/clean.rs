use crate::config::CleanConfig;
use crate::series::Series;

/// Closed interval of accepted values.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    /// Compute the bounds from the empirical quantiles of the series values.
    ///
    /// Returns `None` for an empty series.
    pub fn from_series(series: &Series, lower_q: f64, upper_q: f64) -> Option<Self> {
        let mut sorted: Vec<_> = series.values().collect();
        sorted.sort_by(f64::total_cmp);
        Some(Self {
            lower: quantile_of_sorted(&sorted, lower_q)?,
            upper: quantile_of_sorted(&sorted, upper_q)?,
        })
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// Compute the `q` quantile (`q` in `[0, 1]`) of values sorted in ascending order.
///
/// Interpolates linearly between the two nearest order statistics, so the
/// result is `sorted[q * (n - 1)]` with fractional ranks blended.
pub fn quantile_of_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }

    let rank = q * (sorted.len() - 1) as f64;
    let i_low = rank.floor() as usize;
    let i_high = rank.ceil() as usize;

    let low = sorted[i_low];
    let high = sorted[i_high];
    Some(low + (rank - i_low as f64) * (high - low))
}

/// Remove the values outside the configured quantile range.
///
/// Returns the clean series, in the original order, together with the
/// bounds that were applied (`None` when the raw series is empty).
pub fn remove_outliers(raw: &Series, cfg: &CleanConfig) -> (Series, Option<Bounds>) {
    let Some(bounds) = Bounds::from_series(raw, cfg.lower_quantile, cfg.upper_quantile) else {
        return (Series::default(), None);
    };

    let clean = raw.filter(|rec| bounds.contains(rec.value as f64));
    (clean, Some(bounds))
}
