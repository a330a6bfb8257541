// Data models and display helpers shared by the indicator engine and its consumers.
pub mod models;
pub mod utils;
