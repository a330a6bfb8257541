// One tick of the refresh loop, and the loop that drives it
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::future::Future;
use std::io::Write;
use std::time::Duration;

use super::compute_dashboard::DashboardSnapshot;
use super::DashboardService;
use crate::analytics::CorrelationMatrix;
use crate::error::EngineError;
use shared::models::Indicator;
use shared::utils::{format_currency, format_percentage};

#[derive(Debug, Clone, Serialize)]
pub struct AssetLoad {
    pub symbol: String,
    pub points: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshReport {
    pub refreshed_at: DateTime<Utc>,
    pub loaded: Vec<AssetLoad>,
    /// Assets whose source could not be read this tick, with the reason.
    pub failed: Vec<(String, String)>,
    pub dashboard: DashboardSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation: Option<CorrelationMatrix>,
    /// Normalized performance of every asset that loaded this tick.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub performance: Vec<Indicator>,
}

/// Reloads every configured asset, then recomputes the primary asset's
/// dashboard and the cross-asset comparisons from scratch. An asset that
/// fails to load is dropped from the store so no earlier tick's prices leak
/// into this one. A failing secondary asset is reported, not fatal; without
/// the primary asset the tick fails.
pub async fn handle_refresh(service: &DashboardService) -> Result<RefreshReport, EngineError> {
    let settings = service.settings();
    let mut loaded = Vec::new();
    let mut failed = Vec::new();

    for asset in &settings.assets {
        match service.load_csv_data(&asset.symbol, &asset.csv_path).await {
            Ok(points) => loaded.push(AssetLoad {
                symbol: asset.symbol.clone(),
                points,
            }),
            Err(e) => {
                tracing::warn!(symbol = %asset.symbol, error = %e, "Skipping asset for this refresh");
                service.market_data_store().write().await.remove(&asset.symbol);
                failed.push((asset.symbol.clone(), e.to_string()));
            }
        }
    }

    let dashboard = service.compute_dashboard(&settings.primary_symbol).await?;

    let stored_symbols = service.market_data_store().read().await.symbols();
    let (correlation, performance) = if stored_symbols.len() >= 2 {
        let correlation = match service.correlate(&stored_symbols).await {
            Ok(matrix) => Some(matrix),
            Err(e) => {
                tracing::warn!(error = %e, "Correlation skipped for this refresh");
                None
            }
        };
        let performance = match service.compare_performance(&stored_symbols).await {
            Ok(lines) => lines,
            Err(e) => {
                tracing::warn!(error = %e, "Performance comparison skipped for this refresh");
                Vec::new()
            }
        };
        (correlation, performance)
    } else {
        (None, Vec::new())
    };

    tracing::info!(
        symbol = %settings.primary_symbol,
        loaded = loaded.len(),
        failed = failed.len(),
        "Refresh complete"
    );

    Ok(RefreshReport {
        refreshed_at: Utc::now(),
        loaded,
        failed,
        dashboard,
        correlation,
        performance,
    })
}

/// Refreshes on every `period` tick, writing each report as one JSON line to
/// `sink`, until `shutdown` resolves. A failed tick is logged and the loop
/// carries on. Returns how many reports were written.
pub async fn run_refresh_loop<F, W>(
    service: &DashboardService,
    period: Duration,
    shutdown: F,
    mut sink: W,
) -> Result<usize, EngineError>
where
    F: Future,
    W: Write,
{
    let mut ticker = tokio::time::interval(period);
    let mut written = 0;
    // Created once and polled first on every pass, so a shutdown that fires
    // during a refresh is seen on the next pass.
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => {
                tracing::info!(reports = written, "Shutdown requested, stopping refresh loop");
                return Ok(written);
            }
            _ = ticker.tick() => {
                match service.refresh().await {
                    Ok(report) => {
                        tracing::info!(
                            symbol = %report.dashboard.symbol,
                            price = %format_currency(report.dashboard.latest_price, "$"),
                            change_pct = %format_percentage(report.dashboard.price_change_pct, 2),
                            "Dashboard refreshed"
                        );
                        writeln!(sink, "{}", serde_json::to_string(&report)?)?;
                        sink.flush()?;
                        written += 1;
                    }
                    Err(e) => tracing::error!(error = %e, "Refresh failed, retrying on next tick"),
                }
            }
        }
    }
}
