use super::returns::pct_returns;
use crate::indicators::sample_std_dev;
use shared::models::IndicatorSeries;

// Crypto markets trade every day of the year.
const PERIODS_PER_YEAR: f64 = 365.0;

/// Rolling sample standard deviation of simple returns over `window`
/// returns, annualised. Windows that reach back past the first sample are
/// undefined.
pub fn annualized_volatility(prices: &[f64], window: usize) -> IndicatorSeries {
    let returns = pct_returns(prices);
    if window < 2 || window > returns.len() {
        return vec![None; returns.len()];
    }

    let mut results = vec![None; window - 1];
    results.extend(returns.windows(window).map(|w| {
        let values: Vec<f64> = w.iter().copied().collect::<Option<_>>()?;
        sample_std_dev(&values).map(|sd| sd * PERIODS_PER_YEAR.sqrt())
    }));
    results
}

/// Annualised Sharpe ratio of the whole series. Undefined with fewer than two
/// returns or when returns never move.
pub fn sharpe_ratio(prices: &[f64], risk_free_rate: f64) -> Option<f64> {
    let returns: Vec<f64> = pct_returns(prices).into_iter().flatten().collect();
    let sd = sample_std_dev(&returns)?;
    if sd == 0.0 {
        return None;
    }

    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    let annual_return = (1.0 + mean).powf(PERIODS_PER_YEAR) - 1.0;
    let annual_volatility = sd * PERIODS_PER_YEAR.sqrt();
    Some((annual_return - risk_free_rate) / annual_volatility)
}

/// Deepest fall from a running peak, in percent (zero or negative).
pub fn max_drawdown(prices: &[f64]) -> Option<f64> {
    let mut peak = f64::NEG_INFINITY;
    let mut worst: Option<f64> = None;
    for &price in prices {
        peak = peak.max(price);
        if peak <= 0.0 {
            continue;
        }
        let drawdown = (price - peak) / peak;
        worst = Some(worst.map_or(drawdown, |w: f64| w.min(drawdown)));
    }
    worst.map(|w| w * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volatility_window() {
        let prices = [100.0, 110.0, 99.0, 108.9];
        let vol = annualized_volatility(&prices, 2);
        // the window at index 1 includes the undefined first return
        assert_eq!(vol[0], None);
        assert_eq!(vol[1], None);
        // returns at 2 and 3: -0.1 and +0.1 -> sample sd = sqrt(0.02)
        let expected = 0.02f64.sqrt() * 365f64.sqrt();
        assert!((vol[3].unwrap() - expected).abs() < 1e-9);
        assert!(vol[2].is_some());
    }

    #[test]
    fn test_volatility_invalid_window() {
        assert_eq!(annualized_volatility(&[1.0, 2.0, 3.0], 1), vec![None; 3]);
        assert_eq!(annualized_volatility(&[1.0, 2.0, 3.0], 4), vec![None; 3]);
    }

    #[test]
    fn test_sharpe_ratio() {
        assert_eq!(sharpe_ratio(&[100.0], 0.02), None);
        assert_eq!(sharpe_ratio(&[100.0, 100.0, 100.0], 0.02), None);
        let rising = [100.0, 101.0, 103.0, 102.0, 105.0];
        assert!(sharpe_ratio(&rising, 0.02).unwrap() > 0.0);
    }

    #[test]
    fn test_max_drawdown() {
        let dd = max_drawdown(&[100.0, 120.0, 90.0, 130.0, 117.0]).unwrap();
        assert!((dd + 25.0).abs() < 1e-9);
        assert_eq!(max_drawdown(&[1.0, 2.0, 3.0]), Some(0.0));
        assert_eq!(max_drawdown(&[]), None);
    }
}
