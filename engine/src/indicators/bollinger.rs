// Bollinger Bands indicator implementation
use super::{closes, mean, sample_std_dev, undefined, IndicatorCalculator};
use serde::Serialize;
use serde_json::Value;
use shared::models::{Indicator, IndicatorSeries, PricePoint};

pub const DEFAULT_PERIOD: usize = 20;
pub const DEFAULT_MULTIPLIER: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BollingerOutput {
    pub upper: IndicatorSeries,
    pub middle: IndicatorSeries,
    pub lower: IndicatorSeries,
}

impl BollingerOutput {
    fn undefined(len: usize) -> Self {
        Self {
            upper: undefined(len),
            middle: undefined(len),
            lower: undefined(len),
        }
    }
}

/// SMA middle band with bands `k` sample standard deviations above and below.
///
/// A window below 2 has no sample deviation and a non-positive or non-finite
/// `k` is not a band; both give undefined output.
pub fn bollinger_bands(values: &[f64], window: usize, k: f64) -> BollingerOutput {
    if window < 2 || window > values.len() || !k.is_finite() || k <= 0.0 {
        return BollingerOutput::undefined(values.len());
    }

    let mut output = BollingerOutput::undefined(window - 1);
    for w in values.windows(window) {
        let middle = mean(w);
        let width = sample_std_dev(w).map(|sd| k * sd);
        output.middle.push(Some(middle));
        output.upper.push(width.map(|d| middle + d));
        output.lower.push(width.map(|d| middle - d));
    }
    output
}

pub struct Bollinger {
    name: String,
    period: usize,
    multiplier: f64,
}

impl Bollinger {
    pub fn new(period: usize, multiplier: f64) -> Self {
        Self {
            name: format!("BB({},{})", period, multiplier),
            period,
            multiplier,
        }
    }
}

impl Default for Bollinger {
    fn default() -> Self {
        Self::new(DEFAULT_PERIOD, DEFAULT_MULTIPLIER)
    }
}

impl IndicatorCalculator for Bollinger {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period, "multiplier": self.multiplier })
    }

    fn calculate(&self, data: &[PricePoint]) -> Vec<Indicator> {
        let bands = bollinger_bands(&closes(data), self.period, self.multiplier);
        let parameters = self.parameters();
        [
            ("BB_Upper", bands.upper),
            ("BB_Middle", bands.middle),
            ("BB_Lower", bands.lower),
        ]
        .into_iter()
        .map(|(name, values)| Indicator {
            name: name.to_string(),
            parameters: parameters.clone(),
            values,
        })
        .collect()
    }
}
