// Simplified Fear & Greed index
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sentiment {
    ExtremeFear,
    Fear,
    Neutral,
    Greed,
    ExtremeGreed,
}

impl Sentiment {
    fn from_index(index: f64) -> Self {
        if index >= 75.0 {
            Sentiment::ExtremeGreed
        } else if index >= 55.0 {
            Sentiment::Greed
        } else if index >= 45.0 {
            Sentiment::Neutral
        } else if index >= 25.0 {
            Sentiment::Fear
        } else {
            Sentiment::ExtremeFear
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FearGreed {
    pub index: f64,
    pub sentiment: Sentiment,
}

/// Weighted blend of momentum (RSI), calm (low volatility), volume and price
/// change, each mapped to 0..=100. `volatility`, `volume_change` and
/// `price_change` are percentages.
pub fn fear_greed_index(rsi: f64, volatility: f64, volume_change: f64, price_change: f64) -> FearGreed {
    let rsi_score = if (0.0..=100.0).contains(&rsi) { rsi } else { 50.0 };
    let volatility_score = (100.0 - volatility * 2.0).clamp(0.0, 100.0);
    let volume_score = (50.0 + volume_change).clamp(0.0, 100.0);
    let price_score = (50.0 + price_change).clamp(0.0, 100.0);

    let raw = rsi_score * 0.3 + volatility_score * 0.25 + volume_score * 0.25 + price_score * 0.2;
    let index = (raw * 10.0).round() / 10.0;
    FearGreed {
        index,
        sentiment: Sentiment::from_index(raw),
    }
}
