// Moving Average Convergence Divergence (MACD) indicator implementation
use super::{closes, ema, ema_defined, IndicatorCalculator};
use serde::Serialize;
use serde_json::Value;
use shared::models::{Indicator, IndicatorSeries, PricePoint};

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

/// MACD output, every line index-aligned with the input prices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacdOutput {
    /// Fast EMA minus slow EMA, defined once both EMAs are.
    pub macd_line: IndicatorSeries,
    /// EMA of the defined part of the MACD line.
    pub signal_line: IndicatorSeries,
    /// MACD line minus signal line.
    pub histogram: IndicatorSeries,
}

pub fn macd(values: &[f64], fast: usize, slow: usize, signal: usize) -> MacdOutput {
    let fast_ema = ema(values, fast);
    let slow_ema = ema(values, slow);

    let macd_line: IndicatorSeries = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| Some((*f)? - (*s)?))
        .collect();

    let signal_line = if signal == 0 {
        vec![None; values.len()]
    } else {
        ema_defined(&macd_line, signal)
    };

    let histogram = macd_line
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| Some((*m)? - (*s)?))
        .collect();

    MacdOutput {
        macd_line,
        signal_line,
        histogram,
    }
}

/// MACD indicator.
pub struct Macd {
    name: String,
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Macd {
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Self {
        Self {
            name: format!("MACD({},{},{})", fast_period, slow_period, signal_period),
            fast_period,
            slow_period,
            signal_period,
        }
    }

    pub fn calculate_macd(&self, data: &[PricePoint]) -> MacdOutput {
        macd(&closes(data), self.fast_period, self.slow_period, self.signal_period)
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new(DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
    }
}

impl IndicatorCalculator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({
            "fast": self.fast_period,
            "slow": self.slow_period,
            "signal": self.signal_period,
        })
    }

    fn calculate(&self, data: &[PricePoint]) -> Vec<Indicator> {
        let output = self.calculate_macd(data);
        let parameters = self.parameters();
        [
            ("MACD", output.macd_line),
            ("MACD_Signal", output.signal_line),
            ("MACD_Histogram", output.histogram),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_util::{assert_close, points_from_closes};

    fn wave(len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0 + i as f64 * 0.2)
            .collect()
    }

    #[test]
    fn test_macd_line_is_difference_of_emas() {
        let prices = wave(60);
        let out = macd(&prices, 12, 26, 9);
        let fast = ema(&prices, 12);
        let slow = ema(&prices, 26);

        for i in 0..prices.len() {
            match (fast[i], slow[i]) {
                (Some(f), Some(s)) => assert_eq!(out.macd_line[i], Some(f - s)),
                _ => assert_eq!(out.macd_line[i], None),
            }
        }
        assert!(out.macd_line[..25].iter().all(Option::is_none));
        assert!(out.macd_line[25..].iter().all(Option::is_some));
    }

    #[test]
    fn test_signal_and_histogram_alignment() {
        let prices = wave(60);
        let out = macd(&prices, 12, 26, 9);
        // signal starts 9 - 1 samples after the MACD line
        let signal_start = 25 + 8;
        assert!(out.signal_line[..signal_start].iter().all(Option::is_none));
        assert!(out.histogram[..signal_start].iter().all(Option::is_none));

        let seed: f64 = out.macd_line[25..=signal_start].iter().flatten().sum::<f64>() / 9.0;
        assert_close(out.signal_line[signal_start], seed);

        for i in signal_start..prices.len() {
            let expected = out.macd_line[i].unwrap() - out.signal_line[i].unwrap();
            assert_eq!(out.histogram[i], Some(expected));
        }
    }

    #[test]
    fn test_macd_insufficient_data() {
        let prices = wave(20);
        let out = macd(&prices, 12, 26, 9);
        assert_eq!(out.macd_line, vec![None; 20]);
        assert_eq!(out.signal_line, vec![None; 20]);
        assert_eq!(out.histogram, vec![None; 20]);
    }

    #[test]
    fn test_macd_line_without_enough_points_for_signal() {
        let prices = wave(30);
        let out = macd(&prices, 12, 26, 9);
        assert!(out.macd_line[25].is_some());
        assert!(out.signal_line.iter().all(Option::is_none));
        assert!(out.histogram.iter().all(Option::is_none));
    }

    #[test]
    fn test_macd_zero_signal_period() {
        let out = macd(&wave(40), 12, 26, 0);
        assert!(out.macd_line[30].is_some());
        assert!(out.signal_line.iter().all(Option::is_none));
    }

    #[test]
    fn test_macd_calculator_produces_three_lines() {
        let data = points_from_closes(&wave(50));
        let lines = Macd::default().calculate(&data);
        let names: Vec<_> = lines.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["MACD", "MACD_Signal", "MACD_Histogram"]);
        assert!(lines.iter().all(|l| l.values.len() == 50));
        assert_eq!(lines[0].parameters["slow"], 26);
    }
}
