// Holds the latest price snapshot per asset
use super::validation::{validate_series, SeriesIssue};
use chrono::{DateTime, Utc};
use shared::models::{PricePoint, PriceSeries};
use std::collections::HashMap;

pub struct MarketDataStore {
    // One cleaned series per symbol, replaced wholesale on every refresh.
    data: HashMap<String, PriceSeries>,
    // Problems found in the raw input before cleaning, keyed like `data`.
    issues: HashMap<String, Vec<SeriesIssue>>,
}

impl MarketDataStore {
    pub fn new() -> Self {
        MarketDataStore {
            data: HashMap::new(),
            issues: HashMap::new(),
        }
    }

    /// Stores a fresh snapshot for `symbol`, replacing the previous one.
    /// Returns how many points survived cleaning.
    pub fn replace_series(&mut self, symbol: &str, points: Vec<PricePoint>) -> usize {
        let issues = validate_series(&points);
        if !issues.is_empty() {
            tracing::warn!(symbol, ?issues, "Price series violates ordering contract, cleaning before storing");
        }
        self.issues.insert(symbol.to_string(), issues);

        let received = points.len();
        let cleaned = clean_points(points);
        if cleaned.len() != received {
            tracing::warn!(symbol, received, kept = cleaned.len(), "Dropped invalid or duplicate price points");
        }
        let kept = cleaned.len();
        self.data.insert(symbol.to_string(), PriceSeries::new(symbol, cleaned));
        kept
    }

    pub fn get_series(
        &self,
        symbol: &str,
        from_timestamp: Option<DateTime<Utc>>,
        to_timestamp: Option<DateTime<Utc>>,
    ) -> Option<PriceSeries> {
        self.data.get(symbol).map(|series| {
            let points = series
                .points
                .iter()
                .filter(|p| from_timestamp.map_or(true, |start| p.timestamp >= start))
                .filter(|p| to_timestamp.map_or(true, |end| p.timestamp <= end))
                .cloned()
                .collect();
            PriceSeries::new(symbol, points)
        })
    }

    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        symbols
    }

    /// Issues found in the input of the last `replace_series` call for `symbol`.
    pub fn load_issues(&self, symbol: &str) -> Vec<SeriesIssue> {
        self.issues.get(symbol).cloned().unwrap_or_default()
    }

    pub fn remove(&mut self, symbol: &str) -> Option<PriceSeries> {
        self.issues.remove(symbol);
        self.data.remove(symbol)
    }
}

impl Default for MarketDataStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Drops points without a usable positive close, sorts by timestamp and keeps
/// the first point of each timestamp.
pub fn clean_points(mut points: Vec<PricePoint>) -> Vec<PricePoint> {
    points.retain(|p| p.close.is_finite() && p.close > 0.0);
    // stable sort keeps arrival order among equal timestamps
    points.sort_by_key(|p| p.timestamp);
    points.dedup_by_key(|p| p.timestamp);
    points
}
