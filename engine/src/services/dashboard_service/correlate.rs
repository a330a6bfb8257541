// Handlers for cross-asset comparisons: return correlation and normalized performance
use std::sync::Arc;
use tokio::sync::RwLock;

use super::calculate_indicator::snapshot;
use crate::analytics::{align_series, correlation_matrix, normalized_performance, CorrelationMatrix};
use crate::data::market_data::MarketDataStore;
use crate::error::EngineError;
use shared::models::{Indicator, PriceSeries};

/// Snapshots of `symbols`, or of every stored asset when `symbols` is empty,
/// restricted to their common timestamps.
async fn aligned_snapshots(
    symbols: &[String],
    market_data_store: &Arc<RwLock<MarketDataStore>>,
) -> Result<Vec<PriceSeries>, EngineError> {
    let symbols = if symbols.is_empty() {
        market_data_store.read().await.symbols()
    } else {
        symbols.to_vec()
    };

    let mut series = Vec::with_capacity(symbols.len());
    for symbol in &symbols {
        series.push(snapshot(symbol, market_data_store).await?);
    }
    Ok(align_series(&series))
}

/// Correlates the returns of `symbols` over their common timestamps.
pub async fn handle_correlate(
    symbols: &[String],
    market_data_store: Arc<RwLock<MarketDataStore>>,
) -> Result<CorrelationMatrix, EngineError> {
    let aligned = aligned_snapshots(symbols, &market_data_store).await?;
    tracing::debug!(assets = aligned.len(), common_points = aligned.first().map_or(0, |s| s.len()), "Correlating aligned series");
    Ok(correlation_matrix(&aligned))
}

/// Percent performance of each asset since the first common timestamp, one
/// line per symbol, for plotting assets on a shared axis.
pub async fn handle_compare_performance(
    symbols: &[String],
    market_data_store: Arc<RwLock<MarketDataStore>>,
) -> Result<Vec<Indicator>, EngineError> {
    let aligned = aligned_snapshots(symbols, &market_data_store).await?;
    Ok(aligned
        .iter()
        .map(|series| Indicator {
            name: format!("Performance_{}", series.symbol),
            parameters: serde_json::json!({
                "symbol": series.symbol,
                "base_timestamp": series.points.first().map(|p| p.timestamp),
            }),
            values: normalized_performance(&series.closes()),
        })
        .collect())
}
