use crate::clean::remove_outliers;
use crate::config::Config;
use crate::plot::{bar::draw_bar_plot, boxes::draw_box_plot, line::draw_line_plot};
use crate::source::{self, Origin};
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const CLEAN_FILE: &str = "clean_page_views.csv";
pub const LINE_PLOT_FILE: &str = "line_plot.png";
pub const BAR_PLOT_FILE: &str = "bar_plot.png";
pub const BOX_PLOT_FILE: &str = "box_plot.png";

/// Outcome of a complete analysis run.
#[derive(Debug)]
pub struct Report {
    pub origin: Origin,
    pub n_raw: usize,
    pub n_clean: usize,
    pub out_dir: PathBuf,
}

impl Report {
    /// Fixed confirmation naming the written artifacts.
    pub fn summary(&self) -> String {
        format!(
            "Images saved in {}: {LINE_PLOT_FILE}, {BAR_PLOT_FILE}, {BOX_PLOT_FILE}\n\
             Clean data saved: {CLEAN_FILE}",
            self.out_dir.display()
        )
    }
}

pub struct Manager {
    cfg: Config,
}

impl Manager {
    pub fn new(cfg: Config) -> Self {
        Self { cfg }
    }

    /// Load, clean, save and plot the series.
    pub fn run(&self) -> Result<Report> {
        let out_dir = self.out_dir();
        fs::create_dir_all(out_dir).with_context(|| format!("failed to create {out_dir:?}"))?;

        let (raw, origin) = source::load(&self.cfg).context("failed to load raw series")?;
        log::info!("loaded {} records from {origin}", raw.len());

        let (clean, bounds) = remove_outliers(&raw, &self.cfg.clean);
        match bounds {
            Some(bounds) => log::info!(
                "kept {} of {} records within [{}, {}]",
                clean.len(),
                raw.len(),
                bounds.lower,
                bounds.upper
            ),
            None => log::info!("raw series is empty, nothing to clean"),
        }

        let clean_file = self.out_file(CLEAN_FILE);
        clean
            .write_csv(&clean_file)
            .with_context(|| format!("failed to save {clean_file:?}"))?;
        log::info!("saved {clean_file:?}");

        let line_file = self.out_file(LINE_PLOT_FILE);
        draw_line_plot(&clean, &line_file)
            .with_context(|| format!("failed to draw {line_file:?}"))?;
        log::info!("saved {line_file:?}");

        let bar_file = self.out_file(BAR_PLOT_FILE);
        draw_bar_plot(&clean, &bar_file).with_context(|| format!("failed to draw {bar_file:?}"))?;
        log::info!("saved {bar_file:?}");

        let box_file = self.out_file(BOX_PLOT_FILE);
        draw_box_plot(&clean, &box_file).with_context(|| format!("failed to draw {box_file:?}"))?;
        log::info!("saved {box_file:?}");

        Ok(Report {
            origin,
            n_raw: raw.len(),
            n_clean: clean.len(),
            out_dir: out_dir.to_path_buf(),
        })
    }

    fn out_dir(&self) -> &Path {
        &self.cfg.output.dir
    }

    fn out_file(&self, name: &str) -> PathBuf {
        self.out_dir().join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_names_every_artifact() {
        let report = Report {
            origin: Origin::Synthetic,
            n_raw: 10,
            n_clean: 8,
            out_dir: PathBuf::from("output1"),
        };
        assert_eq!(
            report.summary(),
            "Images saved in output1: line_plot.png, bar_plot.png, box_plot.png\n\
             Clean data saved: clean_page_views.csv"
        );
    }
}
