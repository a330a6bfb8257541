// Williams %R implementation
use super::{is_valid_window, single_line, trailing_range, undefined, IndicatorCalculator};
use serde_json::Value;
use shared::models::{Indicator, IndicatorSeries, PricePoint};

pub const DEFAULT_PERIOD: usize = 14;

/// `-100 * (HH - close) / (HH - LL)`, in `[-100, 0]`. Undefined on a flat range.
pub fn williams_r(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> IndicatorSeries {
    let len = closes.len();
    if highs.len() != len || lows.len() != len || !is_valid_window(period, len) {
        return undefined(len);
    }

    let mut results = undefined(period - 1);
    for i in (period - 1)..len {
        let (highest, lowest) = trailing_range(highs, lows, i + 1 - period, i);
        let range = highest - lowest;
        results.push((range != 0.0).then(|| -100.0 * (highest - closes[i]) / range));
    }
    results
}

pub struct WilliamsR {
    name: String,
    period: usize,
}

impl WilliamsR {
    pub fn new(period: usize) -> Self {
        Self {
            name: "Williams_R".to_string(),
            period,
        }
    }
}

impl IndicatorCalculator for WilliamsR {
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
        single_line(self, williams_r(&highs, &lows, &closes, self.period))
    }
}
