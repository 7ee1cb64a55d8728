//! Demand forecasting over a reconstructed sales series.

use crate::noise::NoiseSource;
use crate::series::SeriesPoint;

/// Horizon used when the caller does not ask for a specific one.
pub const DEFAULT_FORECAST_HORIZON_DAYS: usize = 30;

/// Trailing window for the moving-average demand estimate.
const MOVING_AVERAGE_WINDOW: usize = 5;

/// Per-step jitter standard deviation, relative to the smoothed level.
const JITTER_FRACTION: f64 = 0.1;

/// Moving-average demand forecaster.
///
/// Deliberately a placeholder smoothing model, not a trained predictor: it
/// exists to produce a plausible, bounded, non-negative demand trajectory
/// cheaply. The only non-determinism is the injected noise source.
#[derive(Debug, Clone)]
pub struct ForecastEngine<N: NoiseSource> {
    noise: N,
}

impl<N: NoiseSource> ForecastEngine<N> {
    pub fn new(noise: N) -> Self {
        Self { noise }
    }

    /// Forecast demand for each of the next `horizon_days` days.
    ///
    /// A series shorter than the moving-average window degrades to a flat
    /// rounded mean (zero for an empty series) with no jitter. Otherwise
    /// every step is the trailing moving average at the end of the series
    /// plus an independent Gaussian perturbation, clamped at zero; there is
    /// no autoregressive feedback between steps.
    pub fn forecast(&mut self, series: &[SeriesPoint], horizon_days: usize) -> Vec<u32> {
        if series.len() < MOVING_AVERAGE_WINDOW {
            let level = round_non_negative(mean_quantity(series));
            return vec![level; horizon_days];
        }

        let window = MOVING_AVERAGE_WINDOW.min(series.len());
        let last_ma = mean_quantity(&series[series.len() - window..]);
        let std_dev = JITTER_FRACTION * last_ma;

        (0..horizon_days)
            .map(|_| round_non_negative(last_ma + self.noise.sample(std_dev)))
            .collect()
    }
}

fn mean_quantity(series: &[SeriesPoint]) -> f64 {
    if series.is_empty() {
        return 0.0;
    }
    let total: u64 = series.iter().map(|point| u64::from(point.quantity)).sum();
    total as f64 / series.len() as f64
}

fn round_non_negative(value: f64) -> u32 {
    let rounded = value.round();
    if rounded > 0.0 { rounded as u32 } else { 0 }
}
