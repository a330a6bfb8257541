// Average True Range (ATR) implementation
use super::{is_valid_window, single_line, sma, undefined, IndicatorCalculator};
use serde_json::Value;
use shared::models::{Indicator, IndicatorSeries, PricePoint};

pub const DEFAULT_PERIOD: usize = 14;

/// True range per sample. The first sample has no previous close, so its
/// range is just high minus low.
pub fn true_range(highs: &[f64], lows: &[f64], closes: &[f64]) -> Vec<f64> {
    highs
        .iter()
        .zip(lows)
        .enumerate()
        .map(|(i, (&high, &low))| {
            let span = high - low;
            match i.checked_sub(1).and_then(|prev| closes.get(prev)) {
                Some(&prev_close) => span
                    .max((high - prev_close).abs())
                    .max((low - prev_close).abs()),
                None => span,
            }
        })
        .collect()
}

/// Simple rolling mean of the true range.
pub fn atr(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> IndicatorSeries {
    let len = closes.len();
    if highs.len() != len || lows.len() != len || !is_valid_window(period, len) {
        return undefined(len);
    }
    sma(&true_range(highs, lows, closes), period)
}

pub struct Atr {
    name: String,
    period: usize,
}

impl Atr {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("ATR({})", period),
            period,
        }
    }
}

impl IndicatorCalculator for Atr {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[PricePoint]) -> Vec<Indicator> {
        let highs: Vec<f64> = data.iter().map(PricePoint::high_or_close).collect();
        let lows: Vec<f64> = data.iter().map(PricePoint::low_or_close).collect();
        let closes: Vec<f64> = data.iter().map(|p| p.close).collect();
        single_line(self, atr(&highs, &lows, &closes, self.period))
    }
}
