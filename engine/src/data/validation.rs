// Read-only checks of the ordering contract on incoming price series.
// Nothing here repairs data; see `market_data::clean_points` for that.
use serde::Serialize;
use shared::models::PricePoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SeriesIssue {
    Empty,
    NonAscending { index: usize },
    DuplicateTimestamp { index: usize },
    NonPositivePrice { index: usize },
}

pub fn validate_series(points: &[PricePoint]) -> Vec<SeriesIssue> {
    if points.is_empty() {
        return vec![SeriesIssue::Empty];
    }

    let mut issues = Vec::new();
    for (index, point) in points.iter().enumerate() {
        if !(point.close.is_finite() && point.close > 0.0) {
            issues.push(SeriesIssue::NonPositivePrice { index });
        }
        if index == 0 {
            continue;
        }
        let previous = points[index - 1].timestamp;
        if point.timestamp < previous {
            issues.push(SeriesIssue::NonAscending { index });
        } else if point.timestamp == previous {
            issues.push(SeriesIssue::DuplicateTimestamp { index });
        }
    }
    issues
}
