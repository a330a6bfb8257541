// Relative Strength Index (RSI) indicator implementation
use super::{closes, is_valid_window, single_line, undefined, IndicatorCalculator};
use serde_json::Value;
use shared::models::{Indicator, IndicatorSeries, PricePoint};

/// RSI with Wilder smoothing of average gain and loss.
///
/// The first sample has no predecessor, so its change counts as zero. The
/// seed averages the first `window` gains and losses, which puts the first
/// value at index `window - 1`. No losses in the window reads as 100.
pub fn rsi(values: &[f64], window: usize) -> IndicatorSeries {
    if !is_valid_window(window, values.len()) {
        return undefined(values.len());
    }

    let (gains, losses): (Vec<f64>, Vec<f64>) = values
        .iter()
        .enumerate()
        .map(|(i, &price)| {
            let change = if i == 0 { 0.0 } else { price - values[i - 1] };
            (change.max(0.0), (-change).max(0.0))
        })
        .unzip();

    let period = window as f64;
    let mut results = undefined(window - 1);

    // Calculate initial average gain and loss
    let mut avg_gain = gains[..window].iter().sum::<f64>() / period;
    let mut avg_loss = losses[..window].iter().sum::<f64>() / period;
    results.push(Some(relative_strength(avg_gain, avg_loss)));

    for i in window..values.len() {
        avg_gain = (avg_gain * (period - 1.0) + gains[i]) / period;
        avg_loss = (avg_loss * (period - 1.0) + losses[i]) / period;
        results.push(Some(relative_strength(avg_gain, avg_loss)));
    }
    results
}

fn relative_strength(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

pub struct Rsi {
    name: String,
    period: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("RSI({})", period),
            period,
        }
    }
}

impl IndicatorCalculator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[PricePoint]) -> Vec<Indicator> {
        single_line(self, rsi(&closes(data), self.period))
    }
}
