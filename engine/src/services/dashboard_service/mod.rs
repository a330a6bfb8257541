// engine/src/services/dashboard_service/mod.rs
// Entry points used by the refresh loop and by any UI collaborator. Each
// operation lives in its own handler module; this struct only holds the
// shared store and settings and dispatches.
use crate::analytics::CorrelationMatrix;
use crate::config::EngineSettings;
use crate::data::market_data::MarketDataStore;
use crate::error::EngineError;
use shared::models::Indicator;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

pub mod calculate_indicator;
pub mod compute_dashboard;
pub mod correlate;
pub mod load_csv_data;
pub mod refresh;

pub use compute_dashboard::DashboardSnapshot;
pub use refresh::{run_refresh_loop, RefreshReport};

pub struct DashboardService {
    market_data_store: Arc<RwLock<MarketDataStore>>,
    settings: Arc<EngineSettings>,
}

impl DashboardService {
    pub fn new(market_data_store: Arc<RwLock<MarketDataStore>>, settings: EngineSettings) -> Self {
        DashboardService {
            market_data_store,
            settings: Arc::new(settings),
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn market_data_store(&self) -> Arc<RwLock<MarketDataStore>> {
        self.market_data_store.clone()
    }

    pub async fn load_csv_data(&self, symbol: &str, file_path: &Path) -> Result<usize, EngineError> {
        tracing::info!(symbol, path = %file_path.display(), "Received load request, dispatching to handler.");
        load_csv_data::handle_load_csv_data(symbol, file_path, self.market_data_store.clone()).await
    }

    pub async fn calculate_indicator(
        &self,
        symbol: &str,
        indicator_type: &str,
        parameters: &str,
    ) -> Result<Vec<Indicator>, EngineError> {
        tracing::info!(symbol, indicator_type, parameters, "Received indicator request, dispatching to handler.");
        calculate_indicator::handle_calculate_indicator(
            symbol,
            indicator_type,
            parameters,
            self.market_data_store.clone(),
            &self.settings,
        )
        .await
    }

    pub async fn correlate(&self, symbols: &[String]) -> Result<CorrelationMatrix, EngineError> {
        tracing::info!(?symbols, "Received correlation request, dispatching to handler.");
        correlate::handle_correlate(symbols, self.market_data_store.clone()).await
    }

    pub async fn compare_performance(&self, symbols: &[String]) -> Result<Vec<Indicator>, EngineError> {
        tracing::info!(?symbols, "Received performance comparison request, dispatching to handler.");
        correlate::handle_compare_performance(symbols, self.market_data_store.clone()).await
    }

    pub async fn compute_dashboard(&self, symbol: &str) -> Result<DashboardSnapshot, EngineError> {
        tracing::info!(symbol, "Received dashboard request, dispatching to handler.");
        compute_dashboard::handle_compute_dashboard(symbol, self.market_data_store.clone(), &self.settings).await
    }

    /// One full refresh tick: reload every configured asset and recompute.
    pub async fn refresh(&self) -> Result<RefreshReport, EngineError> {
        refresh::handle_refresh(self).await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use shared::models::PricePoint;
    use std::io::Write;
    use tempfile::NamedTempFile;

    pub fn create_test_service(settings: EngineSettings) -> DashboardService {
        DashboardService::new(Arc::new(RwLock::new(MarketDataStore::new())), settings)
    }

    pub fn hourly_points(closes: &[f64]) -> Vec<PricePoint> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let mut p = PricePoint::new(start + Duration::hours(i as i64), c);
                p.volume = Some(1000.0 + i as f64);
                p
            })
            .collect()
    }

    pub fn wave(len: usize, phase: f64) -> Vec<f64> {
        (0..len)
            .map(|i| 100.0 + ((i as f64 + phase) * 0.4).sin() * 4.0 + i as f64 * 0.1)
            .collect()
    }

    pub fn create_dummy_csv(closes: &[f64]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "timestamp,close,volume").unwrap();
        for p in hourly_points(closes) {
            writeln!(file, "{},{},{}", p.timestamp.timestamp_millis(), p.close, p.volume.unwrap()).unwrap();
        }
        file.flush().unwrap();
        file
    }

    pub async fn store_series(service: &DashboardService, symbol: &str, closes: &[f64]) {
        let store = service.market_data_store();
        let mut store = store.write().await;
        store.replace_series(symbol, hourly_points(closes));
    }
}
