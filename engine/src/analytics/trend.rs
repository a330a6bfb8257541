// Reading of the latest indicator values as a trend summary
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Signal {
    Bullish,
    Bearish,
    Overbought,
    Oversold,
    Neutral,
}

/// Latest defined values the trend summary is built from.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrendInputs {
    pub sma_short: Option<f64>,
    pub sma_long: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrendAnalysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ma_trend: Option<Signal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi_signal: Option<Signal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macd_signal: Option<Signal>,
}

/// Components whose inputs are undefined are left out.
pub fn analyze_trend(inputs: &TrendInputs, overbought: f64, oversold: f64) -> TrendAnalysis {
    let crossover = |fast: Option<f64>, slow: Option<f64>| {
        let (fast, slow) = (fast?, slow?);
        Some(if fast > slow { Signal::Bullish } else { Signal::Bearish })
    };

    let rsi_signal = inputs.rsi.map(|rsi| {
        if rsi > overbought {
            Signal::Overbought
        } else if rsi < oversold {
            Signal::Oversold
        } else {
            Signal::Neutral
        }
    });

    TrendAnalysis {
        ma_trend: crossover(inputs.sma_short, inputs.sma_long),
        rsi_signal,
        macd_signal: crossover(inputs.macd, inputs.macd_signal),
    }
}
