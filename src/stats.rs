use crate::clean::quantile_of_sorted;
use crate::series::Series;
use chrono::{Datelike, Month};
use std::collections::BTreeMap;

/// Calendar months in January to December order.
pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Three-letter month label, e.g. `Jan`.
pub fn month_abbrev(month: Month) -> &'static str {
    &month.name()[..3]
}

pub struct Accumulator {
    n_vals: usize,
    mean: f64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self {
            n_vals: 0,
            mean: 0.0,
        }
    }

    pub fn add(&mut self, val: f64) {
        self.n_vals += 1;
        self.mean += (val - self.mean) / self.n_vals as f64;
    }

    pub fn mean(&self) -> f64 {
        if self.n_vals == 0 {
            return f64::NAN;
        }
        self.mean
    }
}

/// Average value of one (year, month) pair.
#[derive(Debug, PartialEq, Clone)]
pub struct MonthlyMean {
    pub year: i32,
    pub month: Month,
    pub mean: f64,
}

/// Average the series per (year, month), ordered by year then month.
///
/// Only pairs with at least one observation appear.
pub fn monthly_means(series: &Series) -> Vec<MonthlyMean> {
    let mut acc_map: BTreeMap<(i32, u32), Accumulator> = BTreeMap::new();
    for rec in series.records() {
        acc_map
            .entry((rec.date.year(), rec.date.month0()))
            .or_insert_with(Accumulator::new)
            .add(rec.value as f64);
    }

    acc_map
        .into_iter()
        .map(|((year, month0), acc)| MonthlyMean {
            year,
            month: MONTHS[month0 as usize],
            mean: acc.mean(),
        })
        .collect()
}

/// Values grouped by calendar year, years ascending.
pub fn values_by_year(series: &Series) -> BTreeMap<i32, Vec<f64>> {
    let mut groups: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
    for rec in series.records() {
        groups.entry(rec.date.year()).or_default().push(rec.value as f64);
    }
    groups
}

/// Values grouped by calendar month, indexed January = 0.
pub fn values_by_month(series: &Series) -> [Vec<f64>; 12] {
    let mut groups: [Vec<f64>; 12] = Default::default();
    for rec in series.records() {
        groups[rec.date.month0() as usize].push(rec.value as f64);
    }
    groups
}

/// Box-and-whisker summary of one group.
///
/// Whiskers reach the most extreme observations within `1.5 * IQR` of the
/// box; everything beyond them is a flier.
#[derive(Debug, PartialEq, Clone)]
pub struct BoxSummary {
    pub whisker_low: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_high: f64,
    pub fliers: Vec<f64>,
}

impl BoxSummary {
    const WHISKER_IQR: f64 = 1.5;

    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile_of_sorted(&sorted, 0.25)?;
        let median = quantile_of_sorted(&sorted, 0.5)?;
        let q3 = quantile_of_sorted(&sorted, 0.75)?;

        let reach = Self::WHISKER_IQR * (q3 - q1);
        let (fence_low, fence_high) = (q1 - reach, q3 + reach);

        // Quartiles lie inside the fences, so both searches succeed.
        let whisker_low = sorted
            .iter()
            .copied()
            .find(|&val| val >= fence_low)
            .unwrap_or(q1);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&val| val <= fence_high)
            .unwrap_or(q3);

        let fliers = sorted
            .into_iter()
            .filter(|&val| val < whisker_low || val > whisker_high)
            .collect();

        Some(Self {
            whisker_low,
            q1,
            median,
            q3,
            whisker_high,
            fliers,
        })
    }

    /// Smallest and largest value the box draws, fliers included.
    pub fn extent(&self) -> (f64, f64) {
        let low = self.fliers.iter().copied().fold(self.whisker_low, f64::min);
        let high = self.fliers.iter().copied().fold(self.whisker_high, f64::max);
        (low, high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Record;
    use crate::series::tests::date;

    fn series_from(records: &[(i32, u32, u32, i64)]) -> Series {
        Series::new(
            records
                .iter()
                .map(|&(y, m, d, value)| Record {
                    date: date(y, m, d),
                    value,
                })
                .collect(),
        )
    }

    #[test]
    fn monthly_means_per_year_and_month() {
        let series = series_from(&[
            (2017, 3, 2, 40),
            (2016, 5, 9, 10),
            (2016, 5, 10, 20),
            (2016, 7, 1, 7),
            (2017, 3, 1, 50),
            (2017, 1, 5, 1),
        ]);

        let means = monthly_means(&series);
        assert_eq!(
            means,
            vec![
                MonthlyMean { year: 2016, month: Month::May, mean: 15.0 },
                MonthlyMean { year: 2016, month: Month::July, mean: 7.0 },
                MonthlyMean { year: 2017, month: Month::January, mean: 1.0 },
                MonthlyMean { year: 2017, month: Month::March, mean: 45.0 },
            ]
        );
        assert!(monthly_means(&Series::default()).is_empty());
    }

    #[test]
    fn accumulator_matches_arithmetic_mean() {
        let vals = [3.0, 8.0, 1.0, 12.0];
        let mut acc = Accumulator::new();
        vals.iter().for_each(|&val| acc.add(val));
        assert!((acc.mean() - 6.0).abs() < 1e-12);
        assert!(Accumulator::new().mean().is_nan());
    }

    #[test]
    fn groups_by_year_and_month() {
        let series = series_from(&[
            (2018, 12, 31, 3),
            (2016, 12, 1, 1),
            (2017, 1, 1, 2),
        ]);

        let by_year = values_by_year(&series);
        assert_eq!(by_year.keys().copied().collect::<Vec<_>>(), vec![2016, 2017, 2018]);

        let by_month = values_by_month(&series);
        assert_eq!(by_month[0], vec![2.0]);
        assert_eq!(by_month[11], vec![3.0, 1.0]);
        assert!(by_month[1..11].iter().all(Vec::is_empty));
    }

    #[test]
    fn box_summary_marks_fliers() {
        let mut values: Vec<_> = (1..=9).map(f64::from).collect();
        values.push(100.0);

        let summary = BoxSummary::from_values(&values).expect("summary must exist");
        assert_eq!(summary.q1, 3.25);
        assert_eq!(summary.median, 5.5);
        assert_eq!(summary.q3, 7.75);
        assert_eq!(summary.whisker_low, 1.0);
        assert_eq!(summary.whisker_high, 9.0);
        assert_eq!(summary.fliers, vec![100.0]);
        assert_eq!(summary.extent(), (1.0, 100.0));

        assert_eq!(BoxSummary::from_values(&[]), None);
    }

    #[test]
    fn month_labels() {
        assert_eq!(month_abbrev(Month::January), "Jan");
        assert_eq!(month_abbrev(Month::September), "Sep");
        assert_eq!(MONTHS[11].name(), "December");
    }
}
