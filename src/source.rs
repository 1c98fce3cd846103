use crate::config::{Config, Source};
use crate::series::Series;
use crate::synth;
use anyhow::{Context, Result, bail};
use std::fmt;

/// Where a loaded series actually came from.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Origin {
    File,
    Synthetic,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::File => write!(f, "input file"),
            Origin::Synthetic => write!(f, "synthetic generator"),
        }
    }
}

/// Load the raw series according to the configured source.
///
/// In [`Source::Auto`] mode a missing input file is not an error: the
/// synthetic series is used instead and only a warning is logged.
pub fn load(cfg: &Config) -> Result<(Series, Origin)> {
    let file = &cfg.input.file;

    let origin = match cfg.input.source {
        Source::Auto if file.exists() => Origin::File,
        Source::Auto => {
            log::warn!("{file:?} not found, falling back to synthetic data");
            Origin::Synthetic
        }
        Source::File if !file.exists() => bail!("input file {file:?} does not exist"),
        Source::File => Origin::File,
        Source::Synthetic => Origin::Synthetic,
    };

    let series = match origin {
        Origin::File => Series::read_csv(file).with_context(|| format!("failed to read {file:?}"))?,
        Origin::Synthetic => {
            synth::generate(&cfg.synthetic).context("failed to generate synthetic series")?
        }
    };

    Ok((series, origin))
}
