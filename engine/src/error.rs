use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Market data store error: {0}")]
    MarketDataError(String),

    // Unknown indicator names or unparsable parameters. Numeric edge cases
    // (short history, zero variance) never end up here.
    #[error("Indicator configuration error: {0}")]
    IndicatorError(String),

    #[error("Internal processing error: {0}")]
    ProcessingError(String),

    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

impl EngineError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, EngineError::MarketDataError(msg) if msg.to_lowercase().contains("not found"))
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::ProcessingError(format!("JSON error: {}", err))
    }
}
