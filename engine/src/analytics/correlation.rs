//! Pearson correlation between return series.

use super::returns::pct_returns;
use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::models::PriceSeries;
use std::collections::HashSet;

/// Pearson correlation over the positions where both series are defined.
///
/// Undefined with fewer than two such positions or when either side has zero
/// variance over them. Series of different length are compared over their
/// common prefix.
pub fn pearson(a: &[Option<f64>], b: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .zip(b)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    // a constant side has no variance even when its float mean is inexact
    let (first_a, first_b) = pairs[0];
    if pairs.iter().all(|(x, _)| *x == first_a) || pairs.iter().all(|(_, y)| *y == first_b) {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_a = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_b = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (mut cov, mut var_a, mut var_b) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let (dx, dy) = (x - mean_a, y - mean_b);
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    if var_a == 0.0 || var_b == 0.0 {
        return None;
    }
    // rounding can push a perfect correlation just past 1
    Some((cov / (var_a * var_b).sqrt()).clamp(-1.0, 1.0))
}

/// Symmetric matrix of return correlations between several assets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub symbols: Vec<String>,
    /// `values[i][j]` correlates `symbols[i]` with `symbols[j]`.
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.symbols.iter().position(|s| s == a)?;
        let j = self.symbols.iter().position(|s| s == b)?;
        self.values[i][j]
    }
}

/// Correlates the percentage returns of every pair of series.
///
/// Series are aligned by index, so callers pass snapshots that share one
/// timestamp grid.
pub fn correlation_matrix(series: &[PriceSeries]) -> CorrelationMatrix {
    let returns: Vec<_> = series.iter().map(|s| pct_returns(&s.closes())).collect();
    let values = returns
        .iter()
        .map(|a| returns.iter().map(|b| pearson(a, b)).collect())
        .collect();

    CorrelationMatrix {
        symbols: series.iter().map(|s| s.symbol.clone()).collect(),
        values,
    }
}

/// Restricts every series to the timestamps present in all of them, so that
/// equal indices refer to the same instant.
pub fn align_series(series: &[PriceSeries]) -> Vec<PriceSeries> {
    let Some((first, rest)) = series.split_first() else {
        return Vec::new();
    };

    let mut common: HashSet<DateTime<Utc>> = first.points.iter().map(|p| p.timestamp).collect();
    for other in rest {
        let stamps: HashSet<DateTime<Utc>> = other.points.iter().map(|p| p.timestamp).collect();
        common.retain(|ts| stamps.contains(ts));
    }

    series
        .iter()
        .map(|s| {
            let points = s.points.iter().filter(|p| common.contains(&p.timestamp)).cloned().collect();
            PriceSeries::new(s.symbol.clone(), points)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_util::points_from_closes;

    fn defined(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_self_correlation_is_one() {
        let a = defined(&[1.0, 3.0, 2.0, 5.0, 4.0]);
        assert_eq!(pearson(&a, &a), Some(1.0));
    }

    #[test]
    fn test_perfect_negative_correlation() {
        let a = defined(&[1.0, 2.0, 3.0]);
        let b = defined(&[6.0, 4.0, 2.0]);
        assert!((pearson(&a, &b).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_known_value() {
        // x = 1..5, y = [2, 4, 5, 4, 5]: cov 6, var_x 10, var_y 6 -> 6 / sqrt(60)
        let x = defined(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let y = defined(&[2.0, 4.0, 5.0, 4.0, 5.0]);
        let expected = 6.0 / 60.0f64.sqrt();
        assert!((pearson(&x, &y).unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_constant_series_is_undefined() {
        let a = defined(&[2.0, 2.0, 2.0]);
        let b = defined(&[1.0, 2.0, 3.0]);
        assert_eq!(pearson(&a, &b), None);
        assert_eq!(pearson(&b, &a), None);
    }

    #[test]
    fn test_inexact_constant_series_is_undefined() {
        // 0.1 has no exact binary form, so its float mean drifts off the samples
        let a = vec![Some(0.1); 3];
        let b = defined(&[1.0, 2.0, 4.0]);
        assert_eq!(pearson(&a, &b), None);
        assert_eq!(pearson(&b, &a), None);
    }

    #[test]
    fn test_needs_two_overlapping_points() {
        let a = [None, Some(1.0), Some(2.0)];
        let b = [Some(5.0), Some(3.0), None];
        assert_eq!(pearson(&a, &b), None);
        assert_eq!(pearson(&[], &[]), None);
    }

    #[test]
    fn test_correlation_matrix() {
        let btc = PriceSeries::new("bitcoin", points_from_closes(&[100.0, 110.0, 99.0, 120.0]));
        let eth = PriceSeries::new("ethereum", points_from_closes(&[10.0, 11.0, 9.9, 12.0]));
        let flat = PriceSeries::new("stable", points_from_closes(&[1.0, 1.0, 1.0, 1.0]));
        let matrix = correlation_matrix(&[btc, eth, flat]);

        assert_eq!(matrix.symbols, ["bitcoin", "ethereum", "stable"]);
        assert!((matrix.get("bitcoin", "ethereum").unwrap() - 1.0).abs() < 1e-9);
        assert!((matrix.get("bitcoin", "bitcoin").unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(matrix.get("stable", "bitcoin"), None);
        assert_eq!(matrix.get("bitcoin", "dogecoin"), None);
    }

    #[test]
    fn test_align_series_keeps_common_timestamps() {
        let btc = PriceSeries::new("bitcoin", points_from_closes(&[1.0, 2.0, 3.0, 4.0]));
        let mut eth_points = points_from_closes(&[10.0, 20.0, 30.0, 40.0]);
        eth_points.remove(1);
        let eth = PriceSeries::new("ethereum", eth_points);

        let aligned = align_series(&[btc, eth]);
        assert_eq!(aligned[0].closes(), vec![1.0, 3.0, 4.0]);
        assert_eq!(aligned[1].closes(), vec![10.0, 30.0, 40.0]);
        assert!(align_series(&[]).is_empty());
    }
}
