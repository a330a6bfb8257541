// Display formatting for values shown next to the charts.
// Undefined values render as "N/A" instead of "NaN".

const NOT_AVAILABLE: &str = "N/A";

/// Formats a currency amount with a K/M/B/T suffix, e.g. `$1.23M`.
pub fn format_currency(value: Option<f64>, currency_symbol: &str) -> String {
    let value = match value {
        Some(v) if v.is_finite() => v,
        _ => return NOT_AVAILABLE.to_string(),
    };

    let abs_value = value.abs();
    if abs_value >= 1e12 {
        format!("{}{:.2}T", currency_symbol, value / 1e12)
    } else if abs_value >= 1e9 {
        format!("{}{:.2}B", currency_symbol, value / 1e9)
    } else if abs_value >= 1e6 {
        format!("{}{:.2}M", currency_symbol, value / 1e6)
    } else if abs_value >= 1e3 {
        format!("{}{:.2}K", currency_symbol, value / 1e3)
    } else {
        format!("{}{:.2}", currency_symbol, value)
    }
}

pub fn format_percentage(value: Option<f64>, decimal_places: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.*}", decimal_places, v),
        _ => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_timestamp(timestamp: &chrono::DateTime<chrono::Utc>, format_str: &str) -> String {
    timestamp.format(format_str).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_format_currency_suffixes() {
        assert_eq!(format_currency(Some(12.346), "$"), "$12.35");
        assert_eq!(format_currency(Some(1_500.0), "$"), "$1.50K");
        assert_eq!(format_currency(Some(2_250_000.0), "$"), "$2.25M");
        assert_eq!(format_currency(Some(-3_000_000_000.0), "$"), "$-3.00B");
        assert_eq!(format_currency(Some(1.2e12), "€"), "€1.20T");
    }

    #[test]
    fn test_format_undefined() {
        assert_eq!(format_currency(None, "$"), "N/A");
        assert_eq!(format_currency(Some(f64::NAN), "$"), "N/A");
        assert_eq!(format_percentage(None, 2), "N/A");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(Some(3.14159), 2), "3.14");
        assert_eq!(format_percentage(Some(-0.5), 1), "-0.5");
    }

    #[test]
    fn test_format_timestamp() {
        let ts = Utc.with_ymd_and_hms(2024, 12, 30, 18, 20, 0).unwrap();
        assert_eq!(format_timestamp(&ts, "%Y-%m-%d %H:%M:%S"), "2024-12-30 18:20:00");
    }
}
