use crate::config::SyntheticConfig;
use crate::series::{Record, Series};
use anyhow::{Context, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;

/// Generate a deterministic daily series standing in for real page views.
///
/// Values follow a Gaussian random walk around `base` plus a sine component
/// that completes `half_cycles` half periods over the whole date range.
pub fn generate(cfg: &SyntheticConfig) -> Result<Series> {
    let mut rng = ChaCha12Rng::seed_from_u64(cfg.seed);
    let step_dist =
        Normal::new(0.0, cfg.step_std_dev).context("failed to construct step distribution")?;

    let dates: Vec<_> = cfg.start.iter_days().take_while(|&date| date <= cfg.end).collect();
    let n_days = dates.len();
    let phase_step = if n_days > 1 {
        cfg.half_cycles * PI / (n_days - 1) as f64
    } else {
        0.0
    };

    let mut walk = 0.0;
    let records = dates
        .into_iter()
        .enumerate()
        .map(|(i_day, date)| {
            walk += step_dist.sample(&mut rng);
            let season = (phase_step * i_day as f64).sin() * cfg.amplitude;
            // Truncates toward zero.
            let value = (cfg.base + walk + season) as i64;
            Record { date, value }
        })
        .collect();

    Ok(Series::new(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::tests::date;

    #[test]
    fn covers_fixed_date_range() {
        let series = generate(&SyntheticConfig::default()).expect("failed to generate series");
        let records = series.records();

        assert_eq!(records.len(), 1304);
        assert_eq!(records[0].date, date(2016, 5, 9));
        assert_eq!(records[records.len() - 1].date, date(2019, 12, 3));
        assert!(records.windows(2).all(|pair| pair[0].date.succ_opt() == Some(pair[1].date)));
    }

    #[test]
    fn same_seed_same_series() {
        let cfg = SyntheticConfig::default();
        let series_a = generate(&cfg).expect("failed to generate series");
        let series_b = generate(&cfg).expect("failed to generate series");
        assert_eq!(series_a, series_b);

        let other = SyntheticConfig { seed: 7, ..cfg };
        assert_ne!(generate(&other).expect("failed to generate series"), series_a);
    }

    #[test]
    fn zero_noise_gives_pure_seasonal_signal() {
        let cfg = SyntheticConfig {
            start: date(2020, 1, 1),
            end: date(2020, 1, 5),
            step_std_dev: 0.0,
            base: 100.0,
            amplitude: 10.0,
            half_cycles: 1.0,
            ..SyntheticConfig::default()
        };
        let values: Vec<_> = generate(&cfg)
            .expect("failed to generate series")
            .records()
            .iter()
            .map(|rec| rec.value)
            .collect();

        // sin over [0, pi] in four steps: 0, 0.707, 1, 0.707, 0.
        assert_eq!(values, vec![100, 107, 110, 107, 100]);
    }

    #[test]
    fn single_day_range() {
        let cfg = SyntheticConfig {
            end: SyntheticConfig::default().start,
            ..SyntheticConfig::default()
        };
        assert_eq!(generate(&cfg).expect("failed to generate series").len(), 1);
    }
}
