use super::{Categories, FONT, category_color, padded_range};
use crate::series::Series;
use crate::stats::{BoxSummary, MONTHS, month_abbrev, values_by_month, values_by_year};
use anyhow::Result;
use plotters::{coord::Shift, prelude::*};
use std::path::Path;

const SIZE: (u32, u32) = (1500, 600);

/// Slots per category: the box takes the middle two.
const SLOTS_PER_BOX: i32 = 4;

/// One box per category, `None` where the category has no observations.
struct Panel<'a> {
    title: &'a str,
    x_desc: &'a str,
    cats: Categories,
    boxes: Vec<Option<BoxSummary>>,
}

/// Draw year-wise and month-wise box plots side by side.
pub fn draw_box_plot<P: AsRef<Path>>(series: &Series, file: P) -> Result<()> {
    let by_year = values_by_year(series);
    let by_month = values_by_month(series);

    let trend = Panel {
        title: "Year-wise Box Plot (Trend)",
        x_desc: "Year",
        cats: Categories::new(
            by_year.keys().map(|year| year.to_string()).collect(),
            SLOTS_PER_BOX,
        ),
        boxes: by_year
            .values()
            .map(|vals| BoxSummary::from_values(vals))
            .collect(),
    };
    let seasonality = Panel {
        title: "Month-wise Box Plot (Seasonality)",
        x_desc: "Month",
        cats: Categories::new(
            MONTHS.iter().map(|&month| month_abbrev(month).to_string()).collect(),
            SLOTS_PER_BOX,
        ),
        boxes: by_month
            .iter()
            .map(|vals| BoxSummary::from_values(vals))
            .collect(),
    };

    let root = BitMapBackend::new(file.as_ref(), SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let areas = root.split_evenly((1, 2));
    for (area, panel) in areas.iter().zip([trend, seasonality]) {
        draw_panel(area, &panel)?;
    }

    root.present()?;
    Ok(())
}

fn draw_panel(area: &DrawingArea<BitMapBackend<'_>, Shift>, panel: &Panel<'_>) -> Result<()> {
    let y_range = padded_range(
        panel
            .boxes
            .iter()
            .flatten()
            .flat_map(|summary| {
                let (low, high) = summary.extent();
                [low, high]
            }),
    );

    let mut chart = ChartBuilder::on(area)
        .caption(panel.title, (FONT, 20))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(panel.cats.range(), y_range)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(panel.x_desc)
        .y_desc("Page Views")
        .x_labels(panel.cats.n_ticks())
        .x_label_formatter(&|x| panel.cats.label(x))
        .y_label_formatter(&|val| format!("{val:.0}"))
        .draw()?;

    for (idx, summary) in panel.boxes.iter().enumerate() {
        let Some(summary) = summary else {
            continue;
        };
        let color = category_color(idx, panel.cats.len());
        let center = panel.cats.center(idx);
        let (left, right) = (center - 1, center + 1);

        let corners = [(left, summary.q1), (right, summary.q3)];
        chart.draw_series([
            Rectangle::new(corners, color.filled()),
            Rectangle::new(corners, BLACK.stroke_width(1)),
        ])?;

        let median = [(left, summary.median), (right, summary.median)];
        let whisker_low = [(center, summary.whisker_low), (center, summary.q1)];
        let whisker_high = [(center, summary.q3), (center, summary.whisker_high)];
        let cap_low = [(center - 1, summary.whisker_low), (center + 1, summary.whisker_low)];
        let cap_high = [(center - 1, summary.whisker_high), (center + 1, summary.whisker_high)];
        chart.draw_series(
            [median, whisker_low, whisker_high, cap_low, cap_high]
                .into_iter()
                .map(|segment| PathElement::new(segment.to_vec(), BLACK.stroke_width(1))),
        )?;

        chart.draw_series(
            summary
                .fliers
                .iter()
                .map(|&val| Circle::new((center, val), 3, BLACK.stroke_width(1))),
        )?;
    }

    Ok(())
}
