// Handler for computing one named indicator on a stored series
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::EngineSettings;
use crate::data::market_data::MarketDataStore;
use crate::error::EngineError;
use crate::indicators::build_calculator;
use shared::models::{Indicator, PriceSeries};

/// Owned snapshot of `symbol`, or a not-found error when nothing usable is stored.
pub(crate) async fn snapshot(
    symbol: &str,
    market_data_store: &Arc<RwLock<MarketDataStore>>,
) -> Result<PriceSeries, EngineError> {
    let store = market_data_store.read().await;
    let series = store.get_series(symbol, None, None);
    drop(store); // release the lock before computing

    match series {
        Some(series) if !series.is_empty() => Ok(series),
        _ => {
            tracing::warn!(symbol, "No price data found for symbol");
            Err(EngineError::MarketDataError(format!("Price data not found for symbol '{}'", symbol)))
        }
    }
}

pub async fn handle_calculate_indicator(
    symbol: &str,
    indicator_type: &str,
    parameters: &str,
    market_data_store: Arc<RwLock<MarketDataStore>>,
    settings: &EngineSettings,
) -> Result<Vec<Indicator>, EngineError> {
    let params: serde_json::Value = if parameters.trim().is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_str(parameters).map_err(|e| {
            tracing::error!(indicator_type, parameters, error_detail = ?e, "Invalid JSON parameters for indicator");
            EngineError::ProcessingError(format!(
                "Invalid JSON parameters for indicator '{}': {}",
                indicator_type, e
            ))
        })?
    };

    let calculator = build_calculator(indicator_type, &params, &settings.indicators)?;
    let series = snapshot(symbol, &market_data_store).await?;
    let lines = calculator.calculate(&series.points);

    if lines.iter().all(|line| line.defined_count() == 0) {
        tracing::debug!(symbol, indicator = calculator.name(), points = series.len(), "Not enough data for indicator");
    }
    Ok(lines)
}
