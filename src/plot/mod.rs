//! Rendering of the clean series into PNG charts.

pub mod bar;
pub mod boxes;
pub mod line;

use plotters::style::HSLColor;
use std::ops::Range;

const FONT: &str = "sans-serif";

/// Distinct color for category `idx` out of `n_cats`.
fn category_color(idx: usize, n_cats: usize) -> HSLColor {
    HSLColor(idx as f64 / n_cats.max(1) as f64, 0.65, 0.55)
}

/// Range covering all `vals` with a 5% margin on each side.
///
/// Falls back to `0..1` when there is nothing finite to show.
fn padded_range<I: IntoIterator<Item = f64>>(vals: I) -> Range<f64> {
    let (low, high) = vals
        .into_iter()
        .filter(|val| val.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(low, high), val| {
            (low.min(val), high.max(val))
        });

    if low > high {
        return 0.0..1.0;
    }
    if low == high {
        return (low - 1.0)..(high + 1.0);
    }
    let margin = 0.05 * (high - low);
    (low - margin)..(high + margin)
}

/// Categorical x axis laid out on integer slots.
///
/// Category `idx` owns the slots `idx * width .. (idx + 1) * width` and its
/// label is printed under the middle slot.
struct Categories {
    labels: Vec<String>,
    width: i32,
}

impl Categories {
    fn new(labels: Vec<String>, width: i32) -> Self {
        Self { labels, width }
    }

    fn len(&self) -> usize {
        self.labels.len()
    }

    fn range(&self) -> Range<i32> {
        0..(self.len() as i32 * self.width).max(1)
    }

    fn start(&self, idx: usize) -> i32 {
        idx as i32 * self.width
    }

    fn center(&self, idx: usize) -> i32 {
        self.start(idx) + self.width / 2
    }

    /// Number of x labels to request so that every slot gets a tick.
    fn n_ticks(&self) -> usize {
        self.range().len() + 1
    }

    fn label(&self, x: &i32) -> String {
        if x.rem_euclid(self.width) != self.width / 2 {
            return String::new();
        }
        usize::try_from(x.div_euclid(self.width))
            .ok()
            .and_then(|idx| self.labels.get(idx))
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clean::{Bounds, remove_outliers};
    use crate::config::CleanConfig;
    use crate::series::tests::{ScratchDir, date};
    use crate::series::{Record, Series};
    use chrono::Days;

    fn draw_all(series: &Series, scratch: &ScratchDir) {
        let files = [
            scratch.file("line_plot.png"),
            scratch.file("bar_plot.png"),
            scratch.file("box_plot.png"),
        ];
        line::draw_line_plot(series, &files[0]).expect("failed to draw line plot");
        bar::draw_bar_plot(series, &files[1]).expect("failed to draw bar plot");
        boxes::draw_box_plot(series, &files[2]).expect("failed to draw box plot");

        for file in files {
            assert!(file.is_file(), "missing {file:?}");
        }
    }

    #[test]
    fn padded_range_handles_degenerate_input() {
        assert_eq!(padded_range([]), 0.0..1.0);
        assert_eq!(padded_range([f64::NAN]), 0.0..1.0);
        assert_eq!(padded_range([5.0, 5.0]), 4.0..6.0);
        assert_eq!(padded_range([0.0, 100.0, 40.0]), -5.0..105.0);
    }

    #[test]
    fn categories_label_middle_slot_only() {
        let cats = Categories::new(vec!["2016".into(), "2017".into()], 14);
        assert_eq!(cats.range(), 0..28);
        assert_eq!(cats.center(1), 21);
        assert_eq!(cats.label(&7), "2016");
        assert_eq!(cats.label(&21), "2017");
        assert_eq!(cats.label(&8), "");
        assert_eq!(cats.label(&35), "");
        assert_eq!(cats.label(&-7), "");
        assert_eq!(cats.n_ticks(), 29);

        let empty = Categories::new(Vec::new(), 4);
        assert_eq!(empty.range(), 0..1);
    }

    #[test]
    fn empty_series_renders_every_plot() {
        let scratch = ScratchDir::new("plot_empty");
        draw_all(&Series::default(), &scratch);
    }

    #[test]
    fn constant_series_survives_cleaning_and_renders() {
        let start = date(2016, 5, 9);
        let raw = Series::new(
            (0..50)
                .map(|i_day| Record {
                    date: start + Days::new(i_day),
                    value: 7,
                })
                .collect(),
        );

        let (clean, bounds) = remove_outliers(&raw, &CleanConfig::default());
        assert_eq!(bounds, Some(Bounds { lower: 7.0, upper: 7.0 }));
        assert_eq!(clean, raw);

        let scratch = ScratchDir::new("plot_constant");
        draw_all(&clean, &scratch);
    }
}
