// Stochastic Oscillator (%K / %D) implementation
use super::{is_valid_window, sma_defined, trailing_range, undefined, IndicatorCalculator};
use serde::Serialize;
use serde_json::Value;
use shared::models::{Indicator, IndicatorSeries, PricePoint};

pub const DEFAULT_K_PERIOD: usize = 14;
pub const DEFAULT_D_PERIOD: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StochasticOutput {
    pub k: IndicatorSeries,
    pub d: IndicatorSeries,
}

/// %K is where the close sits inside the trailing high/low range, in percent.
/// A flat range (highest high equals lowest low) leaves %K undefined there.
/// %D is the SMA of %K.
pub fn stochastic(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    k_period: usize,
    d_period: usize,
) -> StochasticOutput {
    let len = closes.len();
    if highs.len() != len || lows.len() != len || !is_valid_window(k_period, len) {
        return StochasticOutput {
            k: undefined(len),
            d: undefined(len),
        };
    }

    let mut k = undefined(k_period - 1);
    for i in (k_period - 1)..len {
        let (highest, lowest) = trailing_range(highs, lows, i + 1 - k_period, i);
        let range = highest - lowest;
        k.push((range != 0.0).then(|| 100.0 * (closes[i] - lowest) / range));
    }

    let d = sma_defined(&k, d_period);
    StochasticOutput { k, d }
}

pub struct Stochastic {
    name: String,
    k_period: usize,
    d_period: usize,
}

impl Stochastic {
    pub fn new(k_period: usize, d_period: usize) -> Self {
        Self {
            name: format!("STOCH({},{})", k_period, d_period),
            k_period,
            d_period,
        }
    }
}

impl Default for Stochastic {
    fn default() -> Self {
        Self::new(DEFAULT_K_PERIOD, DEFAULT_D_PERIOD)
    }
}

impl IndicatorCalculator for Stochastic {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "k_period": self.k_period, "d_period": self.d_period })
    }

    fn calculate(&self, data: &[PricePoint]) -> Vec<Indicator> {
        let highs: Vec<f64> = data.iter().map(PricePoint::high_or_close).collect();
        let lows: Vec<f64> = data.iter().map(PricePoint::low_or_close).collect();
        let closes: Vec<f64> = data.iter().map(|p| p.close).collect();
        let output = stochastic(&highs, &lows, &closes, self.k_period, self.d_period);
        let parameters = self.parameters();
        vec![
            Indicator {
                name: "Stoch_K".to_string(),
                parameters: parameters.clone(),
                values: output.k,
            },
            Indicator {
                name: "Stoch_D".to_string(),
                parameters,
                values: output.d,
            },
        ]
    }
}
