// Name-based construction of indicator calculators
use super::{Atr, Bollinger, Ema, IndicatorCalculator, Macd, Rsi, Sma, Stochastic, WilliamsR};
use crate::config::settings::IndicatorDefaults;
use crate::error::EngineError;
use serde_json::Value;

/// A fully parameterised indicator selection.
#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorKind {
    Sma(usize),
    Ema(usize),
    Rsi(usize),
    Macd { fast: usize, slow: usize, signal: usize },
    Bollinger { period: usize, multiplier: f64 },
    Stochastic { k_period: usize, d_period: usize },
    WilliamsR(usize),
    Atr(usize),
}

fn period_param(params: &Value, key: &str, default: usize) -> usize {
    params
        .get(key)
        .and_then(Value::as_u64)
        .map_or(default, |v| v as usize)
}

impl IndicatorKind {
    /// Parses a dashboard selection such as `SMA_50`, `RSI` or
    /// `Bollinger_Bands`, or a plain type name (`sma`, `macd`, ...) whose
    /// parameters come from `params`. Missing parameters fall back to
    /// `defaults`.
    pub fn parse(name: &str, params: &Value, defaults: &IndicatorDefaults) -> Result<Self, EngineError> {
        let lowered = name.trim().to_lowercase();

        // "SMA_20" / "EMA_12" carry their period in the name
        if let Some((prefix, period)) = lowered.split_once('_') {
            if let Ok(period) = period.parse::<usize>() {
                match prefix {
                    "sma" => return Ok(IndicatorKind::Sma(period)),
                    "ema" => return Ok(IndicatorKind::Ema(period)),
                    _ => {}
                }
            }
        }

        let kind = match lowered.as_str() {
            "sma" => IndicatorKind::Sma(period_param(params, "period", defaults.sma_period)),
            "ema" => IndicatorKind::Ema(period_param(params, "period", defaults.ema_period)),
            "rsi" => IndicatorKind::Rsi(period_param(params, "period", defaults.rsi.period)),
            "macd" => IndicatorKind::Macd {
                fast: period_param(params, "fast", defaults.macd.fast),
                slow: period_param(params, "slow", defaults.macd.slow),
                signal: period_param(params, "signal", defaults.macd.signal),
            },
            "bollinger_bands" | "bollinger" | "bb" => IndicatorKind::Bollinger {
                period: period_param(params, "period", defaults.bollinger.period),
                multiplier: params
                    .get("multiplier")
                    .and_then(Value::as_f64)
                    .unwrap_or(defaults.bollinger.multiplier),
            },
            "stochastic" | "stoch" => IndicatorKind::Stochastic {
                k_period: period_param(params, "k_period", defaults.stochastic.k_period),
                d_period: period_param(params, "d_period", defaults.stochastic.d_period),
            },
            "williams_r" | "williams" => {
                IndicatorKind::WilliamsR(period_param(params, "period", defaults.williams_period))
            }
            "atr" => IndicatorKind::Atr(period_param(params, "period", defaults.atr_period)),
            _ => {
                tracing::error!(indicator_type = %name, "Unknown indicator type requested");
                return Err(EngineError::IndicatorError(format!("Unknown indicator type: {}", name)));
            }
        };
        Ok(kind)
    }

    pub fn calculator(&self) -> Box<dyn IndicatorCalculator> {
        match *self {
            IndicatorKind::Sma(period) => Box::new(Sma::new(period)),
            IndicatorKind::Ema(period) => Box::new(Ema::new(period)),
            IndicatorKind::Rsi(period) => Box::new(Rsi::new(period)),
            IndicatorKind::Macd { fast, slow, signal } => Box::new(Macd::new(fast, slow, signal)),
            IndicatorKind::Bollinger { period, multiplier } => Box::new(Bollinger::new(period, multiplier)),
            IndicatorKind::Stochastic { k_period, d_period } => Box::new(Stochastic::new(k_period, d_period)),
            IndicatorKind::WilliamsR(period) => Box::new(WilliamsR::new(period)),
            IndicatorKind::Atr(period) => Box::new(Atr::new(period)),
        }
    }
}

/// Parses `indicator_type` with its JSON parameters and returns the calculator.
pub fn build_calculator(
    indicator_type: &str,
    params: &Value,
    defaults: &IndicatorDefaults,
) -> Result<Box<dyn IndicatorCalculator>, EngineError> {
    IndicatorKind::parse(indicator_type, params, defaults).map(|kind| kind.calculator())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(name: &str, params: Value) -> Result<IndicatorKind, EngineError> {
        IndicatorKind::parse(name, &params, &IndicatorDefaults::default())
    }

    #[test]
    fn test_dashboard_selection_names() {
        assert_eq!(parse("SMA_20", Value::Null).unwrap(), IndicatorKind::Sma(20));
        assert_eq!(parse("SMA_50", Value::Null).unwrap(), IndicatorKind::Sma(50));
        assert_eq!(parse("EMA_26", Value::Null).unwrap(), IndicatorKind::Ema(26));
        assert_eq!(parse("RSI", Value::Null).unwrap(), IndicatorKind::Rsi(14));
        assert_eq!(
            parse("MACD", Value::Null).unwrap(),
            IndicatorKind::Macd { fast: 12, slow: 26, signal: 9 }
        );
        assert_eq!(
            parse("Bollinger_Bands", Value::Null).unwrap(),
            IndicatorKind::Bollinger { period: 20, multiplier: 2.0 }
        );
        assert_eq!(
            parse("Stochastic", Value::Null).unwrap(),
            IndicatorKind::Stochastic { k_period: 14, d_period: 3 }
        );
        assert_eq!(parse("Williams_R", Value::Null).unwrap(), IndicatorKind::WilliamsR(14));
        assert_eq!(parse("ATR", Value::Null).unwrap(), IndicatorKind::Atr(14));
    }

    #[test]
    fn test_json_parameters_override_defaults() {
        assert_eq!(parse("sma", json!({ "period": 5 })).unwrap(), IndicatorKind::Sma(5));
        assert_eq!(
            parse("bollinger", json!({ "period": 10, "multiplier": 1.5 })).unwrap(),
            IndicatorKind::Bollinger { period: 10, multiplier: 1.5 }
        );
        assert_eq!(
            parse("macd", json!({ "fast": 5 })).unwrap(),
            IndicatorKind::Macd { fast: 5, slow: 26, signal: 9 }
        );
        // wrong type falls back to the default
        assert_eq!(parse("rsi", json!({ "period": "seven" })).unwrap(), IndicatorKind::Rsi(14));
    }

    #[test]
    fn test_zero_period_is_accepted() {
        // degrades to an undefined series at calculation time
        let calc = build_calculator("sma", &json!({ "period": 0 }), &IndicatorDefaults::default()).unwrap();
        assert_eq!(calc.name(), "SMA(0)");
    }

    #[test]
    fn test_unknown_indicator() {
        let err = parse("ichimoku", Value::Null).unwrap_err();
        assert!(matches!(err, EngineError::IndicatorError(_)));
        assert!(err.to_string().contains("ichimoku"));
    }
}
