use shared::models::IndicatorSeries;

/// Simple returns `p[i] / p[i-1] - 1`. The first entry, and any entry whose
/// previous price is zero, is undefined.
pub fn pct_returns(prices: &[f64]) -> IndicatorSeries {
    let mut results = Vec::with_capacity(prices.len());
    if prices.is_empty() {
        return results;
    }
    results.push(None);
    results.extend(
        prices
            .windows(2)
            .map(|w| (w[0] != 0.0).then(|| w[1] / w[0] - 1.0)),
    );
    results
}

/// Log returns `ln(p[i] / p[i-1])`; undefined unless both prices are positive.
pub fn log_returns(prices: &[f64]) -> IndicatorSeries {
    let mut results = Vec::with_capacity(prices.len());
    if prices.is_empty() {
        return results;
    }
    results.push(None);
    results.extend(
        prices
            .windows(2)
            .map(|w| (w[0] > 0.0 && w[1] > 0.0).then(|| (w[1] / w[0]).ln())),
    );
    results
}

/// Percentage move from `old_value` to `new_value`; undefined when starting from zero.
pub fn percentage_change(old_value: f64, new_value: f64) -> Option<f64> {
    if old_value == 0.0 || !old_value.is_finite() || !new_value.is_finite() {
        return None;
    }
    Some((new_value - old_value) / old_value * 100.0)
}

/// Performance relative to the first sample, in percent, for comparing
/// assets on one axis.
pub fn normalized_performance(prices: &[f64]) -> IndicatorSeries {
    match prices.first() {
        Some(&first) if first != 0.0 => prices.iter().map(|p| Some((p / first - 1.0) * 100.0)).collect(),
        _ => vec![None; prices.len()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pct_returns() {
        let r = pct_returns(&[100.0, 110.0, 99.0, 0.0, 5.0]);
        assert_eq!(r.len(), 5);
        assert_eq!(r[0], None);
        assert!((r[1].unwrap() - 0.1).abs() < 1e-12);
        assert!((r[2].unwrap() + 0.1).abs() < 1e-12);
        assert_eq!(r[3], Some(-1.0));
        assert_eq!(r[4], None);
        assert!(pct_returns(&[]).is_empty());
    }

    #[test]
    fn test_log_returns() {
        let r = log_returns(&[1.0, std::f64::consts::E, 0.0]);
        assert_eq!(r[0], None);
        assert!((r[1].unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(r[2], None);
    }

    #[test]
    fn test_percentage_change() {
        assert_eq!(percentage_change(50.0, 75.0), Some(50.0));
        assert_eq!(percentage_change(0.0, 75.0), None);
    }

    #[test]
    fn test_normalized_performance() {
        assert_eq!(
            normalized_performance(&[200.0, 250.0, 100.0]),
            vec![Some(0.0), Some(25.0), Some(-50.0)]
        );
        assert_eq!(normalized_performance(&[0.0, 1.0]), vec![None, None]);
    }
}
