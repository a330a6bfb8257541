// Engine settings, loaded from a JSON file or taken from the defaults below
use crate::error::EngineError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    /// Seconds between two recomputation passes.
    pub refresh_interval_secs: u64,
    pub primary_symbol: String,
    pub assets: Vec<AssetSource>,
    /// Indicator names as understood by `IndicatorKind::parse`.
    pub selected_indicators: Vec<String>,
    pub indicators: IndicatorDefaults,
    pub analytics: AnalyticsSettings,
}

/// Where the fetch collaborator drops the price history of one asset.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AssetSource {
    pub symbol: String,
    pub csv_path: PathBuf,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct IndicatorDefaults {
    pub sma_period: usize,
    /// Slow average of the moving-average trend reading.
    pub sma_long_period: usize,
    pub ema_period: usize,
    pub rsi: RsiSetting,
    pub macd: MacdSetting,
    pub bollinger: BollingerSetting,
    pub stochastic: StochasticSetting,
    pub williams_period: usize,
    pub atr_period: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RsiSetting {
    pub period: usize,
    pub overbought: f64,
    pub oversold: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MacdSetting {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BollingerSetting {
    pub period: usize,
    pub multiplier: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StochasticSetting {
    pub k_period: usize,
    pub d_period: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AnalyticsSettings {
    pub volatility_window: usize,
    pub risk_free_rate: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            refresh_interval_secs: 300,
            primary_symbol: "bitcoin".to_string(),
            assets: Vec::new(),
            selected_indicators: vec!["SMA_20".to_string(), "SMA_50".to_string(), "RSI".to_string()],
            indicators: IndicatorDefaults::default(),
            analytics: AnalyticsSettings::default(),
        }
    }
}

impl Default for IndicatorDefaults {
    fn default() -> Self {
        IndicatorDefaults {
            sma_period: 20,
            sma_long_period: 50,
            ema_period: 12,
            rsi: RsiSetting::default(),
            macd: MacdSetting::default(),
            bollinger: BollingerSetting::default(),
            stochastic: StochasticSetting::default(),
            williams_period: 14,
            atr_period: 14,
        }
    }
}

impl Default for RsiSetting {
    fn default() -> Self {
        RsiSetting {
            period: 14,
            overbought: 70.0,
            oversold: 30.0,
        }
    }
}

impl Default for MacdSetting {
    fn default() -> Self {
        MacdSetting {
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

impl Default for BollingerSetting {
    fn default() -> Self {
        BollingerSetting {
            period: 20,
            multiplier: 2.0,
        }
    }
}

impl Default for StochasticSetting {
    fn default() -> Self {
        StochasticSetting {
            k_period: 14,
            d_period: 3,
        }
    }
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        AnalyticsSettings {
            volatility_window: 30,
            risk_free_rate: 0.02,
        }
    }
}

impl EngineSettings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            EngineError::ConfigError(format!("Failed to read settings file '{}': {}", path.display(), e))
        })?;
        let settings = Self::from_json_str(&raw)?;
        tracing::info!(path = %path.display(), assets = settings.assets.len(), "Loaded engine settings");
        Ok(settings)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, EngineError> {
        let settings: EngineSettings = serde_json::from_str(raw)
            .map_err(|e| EngineError::ConfigError(format!("Malformed settings: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Only rejects what would stall the refresh loop. Indicator parameters
    /// are not validated here: bad windows just produce undefined series.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.refresh_interval_secs == 0 {
            return Err(EngineError::ConfigError("refresh_interval_secs must be greater than 0".to_string()));
        }
        if self.assets.iter().any(|a| a.symbol.trim().is_empty()) {
            return Err(EngineError::ConfigError("asset symbol must not be empty".to_string()));
        }
        Ok(())
    }
}
