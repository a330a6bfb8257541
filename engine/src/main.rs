// Engine main entry point: periodic refresh loop
use engine::config::settings::EngineSettings;
use engine::data::market_data::MarketDataStore;
use engine::services::{run_refresh_loop, DashboardService};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout carries only the JSON snapshots
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    info!("Starting indicator engine...");

    let settings = match std::env::args().nth(1) {
        Some(path) => EngineSettings::load(&path)?,
        None => {
            info!("No settings file given, using defaults");
            EngineSettings::default()
        }
    };
    let period = Duration::from_secs(settings.refresh_interval_secs);
    info!(interval_secs = settings.refresh_interval_secs, assets = settings.assets.len(), "Refresh loop configured");

    let market_data_store = Arc::new(RwLock::new(MarketDataStore::new()));
    let service = DashboardService::new(market_data_store, settings);

    let reports = run_refresh_loop(&service, period, tokio::signal::ctrl_c(), std::io::stdout()).await?;
    info!(reports, "Indicator engine stopped");

    Ok(())
}
