// Handler for loading a CSV price history into the store
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::data::csv_parser::PriceCsvParser;
use crate::data::market_data::MarketDataStore;
use crate::error::EngineError;

pub async fn handle_load_csv_data(
    symbol: &str,
    file_path: &Path,
    market_data_store: Arc<RwLock<MarketDataStore>>,
) -> Result<usize, EngineError> {
    let series = PriceCsvParser::load_series_from_csv(file_path, symbol).map_err(|e| {
        tracing::error!(symbol, path = %file_path.display(), error_detail = ?e, "Failed to load price CSV");
        EngineError::from(e)
    })?;

    let mut store = market_data_store.write().await;
    let stored = store.replace_series(symbol, series.points);
    tracing::debug!(symbol, count = stored, "Stored price series");
    Ok(stored)
}
