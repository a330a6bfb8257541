// Exponential Moving Average (EMA) indicator implementation
use super::{closes, is_valid_window, mean, single_line, undefined, IndicatorCalculator};
use serde_json::Value;
use shared::models::{Indicator, IndicatorSeries, PricePoint};

/// EMA with `alpha = 2 / (window + 1)`, seeded with the SMA of the first
/// `window` values at index `window - 1`.
pub fn ema(values: &[f64], window: usize) -> IndicatorSeries {
    if !is_valid_window(window, values.len()) {
        return undefined(values.len());
    }

    let multiplier = 2.0 / (window as f64 + 1.0);
    let mut results = undefined(window - 1);

    let mut previous_ema = mean(&values[..window]);
    results.push(Some(previous_ema));

    for &price in &values[window..] {
        let ema = price * multiplier + previous_ema * (1.0 - multiplier);
        results.push(Some(ema));
        previous_ema = ema;
    }
    results
}

/// EMA over the defined part of an indicator series.
///
/// The input is expected to be an undefined prefix followed by defined values
/// (the shape every indicator here produces). Smoothing runs over the first
/// contiguous defined run; anything after a later gap stays undefined.
pub fn ema_defined(series: &[Option<f64>], window: usize) -> IndicatorSeries {
    let mut results = undefined(series.len());
    let Some(start) = series.iter().position(Option::is_some) else {
        return results;
    };

    let run: Vec<f64> = series[start..].iter().map_while(|v| *v).collect();
    for (offset, value) in ema(&run, window).into_iter().enumerate() {
        results[start + offset] = value;
    }
    results
}

pub struct Ema {
    name: String,
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("EMA({})", period),
            period,
        }
    }
}

impl IndicatorCalculator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[PricePoint]) -> Vec<Indicator> {
        single_line(self, ema(&closes(data), self.period))
    }
}
