use super::{FONT, padded_range};
use crate::series::Series;
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use plotters::prelude::*;
use std::{ops::Range, path::Path};

const SIZE: (u32, u32) = (1400, 500);
const TITLE: &str = "Daily freeCodeCamp Forum Page Views 5/2016-12/2019";
const LINE_COLOR: RGBColor = RGBColor(214, 39, 40);

/// Draw the series as one continuous line over time.
pub fn draw_line_plot<P: AsRef<Path>>(series: &Series, file: P) -> Result<()> {
    let points: Vec<_> = series
        .records()
        .iter()
        .map(|rec| (rec.date.num_days_from_ce(), rec.value as f64))
        .collect();

    let root = BitMapBackend::new(file.as_ref(), SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(TITLE, (FONT, 22))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(
            day_range(points.iter().map(|&(day, _)| day)),
            padded_range(points.iter().map(|&(_, val)| val)),
        )?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Page Views")
        .x_labels(12)
        .x_label_formatter(&format_day)
        .y_label_formatter(&|val| format!("{val:.0}"))
        .draw()?;

    chart.draw_series(LineSeries::new(points, LINE_COLOR.stroke_width(1)))?;

    root.present()?;
    Ok(())
}

/// Days since the common era spanned by `days`, at least one day wide.
fn day_range<I: IntoIterator<Item = i32>>(days: I) -> Range<i32> {
    let (first, last) = days
        .into_iter()
        .fold((i32::MAX, i32::MIN), |(first, last), day| {
            (first.min(day), last.max(day))
        });

    if first > last {
        return 0..1;
    }
    if first == last {
        return (first - 1)..(last + 1);
    }
    first..last
}

fn format_day(day: &i32) -> String {
    NaiveDate::from_num_days_from_ce_opt(*day)
        .map(|date| date.format("%Y-%m").to_string())
        .unwrap_or_default()
}
