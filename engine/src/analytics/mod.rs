// Market statistics derived from price series: returns, correlation, risk
// figures and the dashboard's trend and sentiment readings.
pub mod correlation;
pub mod returns;
pub mod risk;
pub mod sentiment;
pub mod trend;

pub use correlation::{align_series, correlation_matrix, pearson, CorrelationMatrix};
pub use returns::{log_returns, normalized_performance, pct_returns, percentage_change};
pub use risk::{annualized_volatility, max_drawdown, sharpe_ratio};
pub use sentiment::{fear_greed_index, FearGreed, Sentiment};
pub use trend::{analyze_trend, Signal, TrendAnalysis, TrendInputs};
