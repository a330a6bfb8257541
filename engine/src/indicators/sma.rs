// Simple Moving Average (SMA) indicator implementation
use super::{closes, is_valid_window, mean, single_line, undefined, IndicatorCalculator};
use serde_json::Value;
use shared::models::{Indicator, IndicatorSeries, PricePoint};

/// Mean of the `window` most recent values ending at each index.
pub fn sma(values: &[f64], window: usize) -> IndicatorSeries {
    if !is_valid_window(window, values.len()) {
        return undefined(values.len());
    }

    let mut results = undefined(window - 1);
    results.extend(values.windows(window).map(|w| Some(mean(w))));
    results
}

/// SMA over a series that may itself contain undefined entries. A position is
/// defined only when every value in its trailing window is.
pub fn sma_defined(series: &[Option<f64>], window: usize) -> IndicatorSeries {
    if !is_valid_window(window, series.len()) {
        return undefined(series.len());
    }

    let mut results = undefined(window - 1);
    results.extend(series.windows(window).map(|w| {
        let sum = w.iter().try_fold(0.0, |acc, v| v.map(|v| acc + v))?;
        Some(sum / window as f64)
    }));
    results
}

pub struct Sma {
    name: String,
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("SMA({})", period),
            period,
        }
    }
}

impl IndicatorCalculator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[PricePoint]) -> Vec<Indicator> {
        single_line(self, sma(&closes(data), self.period))
    }
}
