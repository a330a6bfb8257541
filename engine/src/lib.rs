// Engine library root
// Indicator computation over price series, plus the data intake, settings
// and service layer the dashboard refresh loop is built on.

pub mod analytics;
pub mod config;
pub mod data;
pub mod error;
pub mod indicators;
pub mod services;

pub use error::EngineError;
