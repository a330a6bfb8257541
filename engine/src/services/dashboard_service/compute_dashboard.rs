// Handler for the full per-asset dashboard pass
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::calculate_indicator::snapshot;
use crate::analytics::{
    analyze_trend, annualized_volatility, fear_greed_index, max_drawdown, percentage_change, sharpe_ratio,
    FearGreed, TrendAnalysis, TrendInputs,
};
use crate::config::EngineSettings;
use crate::data::market_data::MarketDataStore;
use crate::data::validation::SeriesIssue;
use crate::error::EngineError;
use crate::indicators::{macd, rsi, sma, IndicatorKind};
use shared::models::{Indicator, PriceSeries};

/// Everything the dashboard shows for one asset after a refresh.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub symbol: String,
    pub generated_at: DateTime<Utc>,
    pub points: usize,
    pub latest_price: Option<f64>,
    pub latest_timestamp: Option<DateTime<Utc>>,
    /// Change from the first to the last close of the window, in percent.
    pub price_change_pct: Option<f64>,
    pub volume_change_pct: Option<f64>,
    pub indicators: Vec<Indicator>,
    pub trend: TrendAnalysis,
    /// Latest annualised volatility, in percent.
    pub volatility_pct: Option<f64>,
    pub sharpe_ratio: Option<f64>,
    pub max_drawdown_pct: Option<f64>,
    pub fear_greed: Option<FearGreed>,
    /// Ordering or price problems found in the raw input before it was cleaned.
    pub issues: Vec<SeriesIssue>,
}

fn last_value(series: &[Option<f64>]) -> Option<f64> {
    series.last().copied().flatten()
}

/// Change between the last two reported volumes.
fn volume_change(series: &PriceSeries) -> Option<f64> {
    let mut volumes = series.volumes().into_iter().rev().flatten();
    let latest = volumes.next()?;
    let previous = volumes.next()?;
    percentage_change(previous, latest)
}

/// Pure computation of a snapshot from an owned series and the issues its
/// source had at load time.
pub fn build_snapshot(
    series: &PriceSeries,
    issues: Vec<SeriesIssue>,
    settings: &EngineSettings,
) -> Result<DashboardSnapshot, EngineError> {
    let defaults = &settings.indicators;
    let closes = series.closes();

    let mut indicators = Vec::new();
    for name in &settings.selected_indicators {
        let kind = IndicatorKind::parse(name, &serde_json::Value::Null, defaults)?;
        indicators.extend(kind.calculator().calculate(&series.points));
    }

    let macd_output = macd(&closes, defaults.macd.fast, defaults.macd.slow, defaults.macd.signal);
    let trend_inputs = TrendInputs {
        sma_short: last_value(&sma(&closes, defaults.sma_period)),
        sma_long: last_value(&sma(&closes, defaults.sma_long_period)),
        rsi: last_value(&rsi(&closes, defaults.rsi.period)),
        macd: last_value(&macd_output.macd_line),
        macd_signal: last_value(&macd_output.signal_line),
    };
    let trend = analyze_trend(&trend_inputs, defaults.rsi.overbought, defaults.rsi.oversold);

    let price_change_pct = match (closes.first(), closes.last()) {
        (Some(&first), Some(&last)) => percentage_change(first, last),
        _ => None,
    };
    let volume_change_pct = volume_change(series);
    let volatility_pct =
        last_value(&annualized_volatility(&closes, settings.analytics.volatility_window)).map(|v| v * 100.0);

    let fear_greed = match (trend_inputs.rsi, volatility_pct) {
        (Some(rsi), Some(volatility)) => Some(fear_greed_index(
            rsi,
            volatility,
            volume_change_pct.unwrap_or(0.0),
            price_change_pct.unwrap_or(0.0),
        )),
        _ => None,
    };

    Ok(DashboardSnapshot {
        symbol: series.symbol.clone(),
        generated_at: Utc::now(),
        points: series.len(),
        latest_price: series.latest().map(|p| p.close),
        latest_timestamp: series.latest().map(|p| p.timestamp),
        price_change_pct,
        volume_change_pct,
        indicators,
        trend,
        volatility_pct,
        sharpe_ratio: sharpe_ratio(&closes, settings.analytics.risk_free_rate),
        max_drawdown_pct: max_drawdown(&closes),
        fear_greed,
        issues,
    })
}

pub async fn handle_compute_dashboard(
    symbol: &str,
    market_data_store: Arc<RwLock<MarketDataStore>>,
    settings: &EngineSettings,
) -> Result<DashboardSnapshot, EngineError> {
    let series = snapshot(symbol, &market_data_store).await?;
    let issues = market_data_store.read().await.load_issues(symbol);
    let dashboard = build_snapshot(&series, issues, settings)?;
    tracing::debug!(
        symbol,
        points = dashboard.points,
        indicators = dashboard.indicators.len(),
        "Computed dashboard snapshot"
    );
    Ok(dashboard)
}
