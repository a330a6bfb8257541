use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One value per input sample; `None` marks positions without enough history.
pub type IndicatorSeries = Vec<Option<f64>>;

/// A single sample of an asset's price history.
///
/// Only `close` is mandatory. Sources that deliver plain price ticks leave the
/// OHLC and volume fields empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
    #[serde(default)]
    pub open: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub volume: Option<f64>,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, close: f64) -> Self {
        Self {
            timestamp,
            close,
            open: None,
            high: None,
            low: None,
            volume: None,
        }
    }

    pub fn high_or_close(&self) -> f64 {
        self.high.unwrap_or(self.close)
    }

    pub fn low_or_close(&self) -> f64 {
        self.low.unwrap_or(self.close)
    }
}

/// Ordered price history of one asset, ascending by timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: String,
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, points: Vec<PricePoint>) -> Self {
        Self {
            symbol: symbol.into(),
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.points.iter().map(PricePoint::high_or_close).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.points.iter().map(PricePoint::low_or_close).collect()
    }

    pub fn volumes(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.volume).collect()
    }
}

/// A named indicator line, index-aligned with the series it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    pub name: String,
    pub parameters: serde_json::Value,
    pub values: IndicatorSeries,
}

impl Indicator {
    /// Most recent defined value, if any.
    pub fn latest(&self) -> Option<f64> {
        self.values.iter().rev().find_map(|v| *v)
    }

    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}
