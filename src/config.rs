use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, fs, ops::RangeBounds, path::Path, path::PathBuf};

/// Where the raw series comes from.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Read the input file if it exists, otherwise synthesize a series.
    #[default]
    Auto,
    /// Always read the input file; a missing file is an error.
    File,
    /// Always synthesize a series.
    Synthetic,
}

/// Analysis configuration parameters.
///
/// Every field has a default, so an empty TOML document is a valid
/// configuration. See [`Config::from_file`] for loading.
#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub input: InputConfig,
    pub clean: CleanConfig,
    pub synthetic: SyntheticConfig,
    pub output: OutputConfig,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// CSV file with a `date` column and one value column.
    pub file: PathBuf,
    pub source: Source,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("fcc-forum-pageviews.csv"),
            source: Source::Auto,
        }
    }
}

/// Quantile cut-offs used to remove outliers.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CleanConfig {
    pub lower_quantile: f64,
    pub upper_quantile: f64,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            lower_quantile: 0.025,
            upper_quantile: 0.975,
        }
    }
}

/// Parameters of the synthetic fallback series.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyntheticConfig {
    /// First date (inclusive), written as a quoted `YYYY-MM-DD` string.
    pub start: NaiveDate,
    /// Last date (inclusive), written as a quoted `YYYY-MM-DD` string.
    pub end: NaiveDate,
    pub seed: u64,
    /// Level the random walk starts from.
    pub base: f64,
    /// Standard deviation of each random walk step.
    pub step_std_dev: f64,
    /// Amplitude of the seasonal sine component.
    pub amplitude: f64,
    /// Number of half periods of the sine over the whole range.
    pub half_cycles: f64,
}

const SYNTHETIC_START: NaiveDate = match NaiveDate::from_ymd_opt(2016, 5, 9) {
    Some(date) => date,
    None => panic!("invalid synthetic start date"),
};
const SYNTHETIC_END: NaiveDate = match NaiveDate::from_ymd_opt(2019, 12, 3) {
    Some(date) => date,
    None => panic!("invalid synthetic end date"),
};

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            start: SYNTHETIC_START,
            end: SYNTHETIC_END,
            seed: 42,
            base: 20_000.0,
            step_std_dev: 2_000.0,
            amplitude: 3_000.0,
            half_cycles: 40.0,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory receiving the clean CSV and the images.
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output1"),
        }
    }
}

impl Config {
    /// Load a [`Config`] from a TOML file.
    ///
    /// Missing sections and fields take their default values.
    /// Performs validation on all parameters before returning.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;

        let config: Config = toml::from_str(&contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_path(&self.input.file).context("invalid input file")?;
        check_path(&self.output.dir).context("invalid output directory")?;

        check_num(self.clean.lower_quantile, 0.0..=1.0).context("invalid lower quantile")?;
        check_num(self.clean.upper_quantile, 0.0..=1.0).context("invalid upper quantile")?;
        if self.clean.lower_quantile > self.clean.upper_quantile {
            bail!("lower quantile must not exceed upper quantile");
        }

        let syn = &self.synthetic;
        if syn.start > syn.end {
            bail!("synthetic start {} must not be after end {}", syn.start, syn.end);
        }
        check_num(syn.step_std_dev, 0.0..f64::INFINITY)
            .context("invalid synthetic step standard deviation")?;
        check_num(syn.base, f64::MIN..f64::MAX).context("invalid synthetic base")?;
        check_num(syn.amplitude, f64::MIN..f64::MAX).context("invalid synthetic amplitude")?;
        check_num(syn.half_cycles, f64::MIN..f64::MAX)
            .context("invalid synthetic number of half cycles")?;

        Ok(())
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}

fn check_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        bail!("path must not be empty");
    }
    Ok(())
}
