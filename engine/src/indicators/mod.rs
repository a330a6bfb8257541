// Technical indicators module
//
// Every indicator is a pure function over price slices returning a series
// index-aligned with its input, plus a calculator struct implementing
// `IndicatorCalculator` for name-based dispatch. Positions without enough
// history are `None`. Invalid parameters (zero window, window longer than the
// input, non-positive multiplier) give an all-`None` series, never a panic.
pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod registry;
pub mod rsi;
pub mod sma;
pub mod stochastic;
pub mod williams_r;

pub use atr::{atr, true_range, Atr};
pub use bollinger::{bollinger_bands, Bollinger, BollingerOutput};
pub use ema::{ema, ema_defined, Ema};
pub use macd::{macd, Macd, MacdOutput};
pub use registry::{build_calculator, IndicatorKind};
pub use rsi::{rsi, Rsi};
pub use sma::{sma, sma_defined, Sma};
pub use stochastic::{stochastic, Stochastic, StochasticOutput};
pub use williams_r::{williams_r, WilliamsR};

use serde_json::Value;
use shared::models::{Indicator, IndicatorSeries, PricePoint};

// Common trait for all indicators
pub trait IndicatorCalculator: Send + Sync {
    fn name(&self) -> &str;
    fn parameters(&self) -> Value; // Parameters used for this indicator instance
    /// One `Indicator` per output line, each as long as `data`.
    fn calculate(&self, data: &[PricePoint]) -> Vec<Indicator>;
}

/// True when the series carries no value at all (empty or warm-up only).
pub fn is_undefined(series: &[Option<f64>]) -> bool {
    series.iter().all(Option::is_none)
}

pub(crate) fn undefined(len: usize) -> IndicatorSeries {
    vec![None; len]
}

pub(crate) fn is_valid_window(window: usize, len: usize) -> bool {
    window > 0 && window <= len
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator). Needs at least two values.
pub(crate) fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Highest high and lowest low over `highs[start..=end]` / `lows[start..=end]`.
pub(crate) fn trailing_range(highs: &[f64], lows: &[f64], start: usize, end: usize) -> (f64, f64) {
    let highest = highs[start..=end].iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let lowest = lows[start..=end].iter().copied().fold(f64::INFINITY, f64::min);
    (highest, lowest)
}

pub(crate) fn closes(data: &[PricePoint]) -> Vec<f64> {
    data.iter().map(|p| p.close).collect()
}

pub(crate) fn single_line(calc: &dyn IndicatorCalculator, values: IndicatorSeries) -> Vec<Indicator> {
    vec![Indicator {
        name: calc.name().to_string(),
        parameters: calc.parameters(),
        values,
    }]
}

#[cfg(test)]
pub(crate) mod test_util {
    use chrono::{Duration, TimeZone, Utc};
    use shared::models::PricePoint;

    pub const TOLERANCE: f64 = 1e-9;

    pub fn points_from_closes(closes: &[f64]) -> Vec<PricePoint> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PricePoint::new(start + Duration::hours(i as i64), c))
            .collect()
    }

    pub fn assert_close(actual: Option<f64>, expected: f64) {
        let value = actual.unwrap_or_else(|| panic!("expected {}, got None", expected));
        assert!((value - expected).abs() < TOLERANCE, "{} != {}", value, expected);
    }

    pub fn assert_series_eq(actual: &[Option<f64>], expected: &[Option<f64>]) {
        assert_eq!(actual.len(), expected.len(), "Series differ in length");
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            match (a, e) {
                (None, None) => {}
                (Some(a), Some(e)) => {
                    assert!((a - e).abs() < TOLERANCE, "Mismatch at index {}: {} != {}", i, a, e)
                }
                _ => panic!("Definedness mismatch at index {}: {:?} vs {:?}", i, a, e),
            }
        }
    }
}
