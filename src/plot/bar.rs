use super::{Categories, FONT, category_color, padded_range};
use crate::series::Series;
use crate::stats::{MONTHS, MonthlyMean, monthly_means};
use anyhow::Result;
use plotters::{coord::Shift, prelude::*};
use std::path::Path;

const SIZE: (u32, u32) = (1400, 700);
const LEGEND_WIDTH: u32 = 160;

/// Slots per year: one per month plus one on each side as a gap.
const SLOTS_PER_YEAR: i32 = MONTHS.len() as i32 + 2;

/// Draw the average value of every (year, month) pair as grouped bars.
///
/// Each year is one cluster with its months in calendar order; months
/// without observations leave a gap instead of a zero bar.
pub fn draw_bar_plot<P: AsRef<Path>>(series: &Series, file: P) -> Result<()> {
    let means = monthly_means(series);
    let years = years_of(&means);
    let cats = Categories::new(
        years.iter().map(|year| year.to_string()).collect(),
        SLOTS_PER_YEAR,
    );

    let root = BitMapBackend::new(file.as_ref(), SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let (chart_area, legend_area) = root.split_horizontally((SIZE.0 - LEGEND_WIDTH) as i32);

    // Bars grow from zero, so zero is always in view.
    let y_range = padded_range(means.iter().map(|mm| mm.mean).chain([0.0]));
    let mut chart = ChartBuilder::on(&chart_area)
        .caption("Months", (FONT, 22))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(cats.range(), y_range)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Years")
        .y_desc("Average Page Views")
        .x_labels(cats.n_ticks())
        .x_label_formatter(&|x| cats.label(x))
        .y_label_formatter(&|val| format!("{val:.0}"))
        .draw()?;

    for (i_month, &month) in MONTHS.iter().enumerate() {
        let color = category_color(i_month, MONTHS.len());
        let bars = means
            .iter()
            .filter(|mm| mm.month == month)
            .filter_map(|mm| {
                let i_year = years.binary_search(&mm.year).ok()?;
                let (x0, x1) = bar_span(&cats, i_year, i_month);
                Some(Rectangle::new([(x0, 0.0), (x1, mm.mean)], color.filled()))
            });
        chart.draw_series(bars)?;
    }

    draw_legend(&legend_area)?;

    root.present()?;
    Ok(())
}

/// Distinct years present in `means`, ascending.
fn years_of(means: &[MonthlyMean]) -> Vec<i32> {
    let mut years: Vec<_> = means.iter().map(|mm| mm.year).collect();
    years.dedup();
    years
}

/// Horizontal extent of the bar for month `i_month` in year cluster `i_year`.
fn bar_span(cats: &Categories, i_year: usize, i_month: usize) -> (i32, i32) {
    let x0 = cats.start(i_year) + 1 + i_month as i32;
    (x0, x0 + 1)
}

fn draw_legend(area: &DrawingArea<BitMapBackend<'_>, Shift>) -> Result<()> {
    let (x, y0) = (10, 40);
    let row_height = 24;

    area.draw(&Text::new("Months", (x, y0 - 28), (FONT, 18).into_font()))?;
    for (i_month, month) in MONTHS.iter().enumerate() {
        let y = y0 + i_month as i32 * row_height;
        let color = category_color(i_month, MONTHS.len());
        area.draw(&Rectangle::new([(x, y), (x + 16, y + 16)], color.filled()))?;
        area.draw(&Text::new(month.name(), (x + 24, y), (FONT, 15).into_font()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Month;

    #[test]
    fn years_are_unique_and_ascending() {
        let means = vec![
            MonthlyMean { year: 2016, month: Month::May, mean: 1.0 },
            MonthlyMean { year: 2016, month: Month::June, mean: 2.0 },
            MonthlyMean { year: 2018, month: Month::January, mean: 3.0 },
        ];
        assert_eq!(years_of(&means), vec![2016, 2018]);
    }

    #[test]
    fn bars_fill_cluster_in_calendar_order() {
        let cats = Categories::new(vec!["2016".into(), "2017".into()], SLOTS_PER_YEAR);

        assert_eq!(bar_span(&cats, 0, 0), (1, 2));
        assert_eq!(bar_span(&cats, 0, 11), (12, 13));
        assert_eq!(bar_span(&cats, 1, 0), (15, 16));

        // January to December sit symmetrically around the year label.
        let (first, _) = bar_span(&cats, 1, 0);
        let (_, last) = bar_span(&cats, 1, 11);
        assert_eq!(first + last, 2 * cats.center(1));
    }
}
