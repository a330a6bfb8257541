use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, StringRecord};
use shared::models::{PricePoint, PriceSeries};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

// Timestamps arrive either as Unix milliseconds (the upstream market API's
// format) or as RFC 3339 strings.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(millis) = s.parse::<i64>() {
        return DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| anyhow!("Timestamp '{}' is out of range", s));
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| anyhow!("Failed to parse timestamp '{}': {}", s, e))
}

fn parse_price(s: &str, column: &str) -> Result<f64> {
    s.trim()
        .parse::<f64>()
        .map_err(|e| anyhow!("Failed to parse '{}' value '{}': {}", column, s, e))
}

pub struct PriceCsvParser;

impl PriceCsvParser {
    // CSV Header: timestamp,open,high,low,close,volume
    // Example Row: 1704067200000,42280.1,42550.0,42100.5,42410.3,1534.2
    // Only timestamp and close (or price) are required; empty optional cells are None.
    pub fn load_series_from_csv(file_path: impl AsRef<Path>, symbol: &str) -> Result<PriceSeries> {
        let file_path = file_path.as_ref();
        let file = File::open(file_path)
            .with_context(|| format!("Failed to open CSV file '{}'", file_path.display()))?;
        let series = Self::parse_series(BufReader::new(file), symbol)?;
        tracing::debug!(symbol, path = %file_path.display(), count = series.len(), "Parsed price CSV");
        Ok(series)
    }

    pub fn parse_series<R: Read>(reader: R, symbol: &str) -> Result<PriceSeries> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: StringRecord = rdr.headers()?.iter().map(|h| h.to_lowercase()).collect();
        let timestamp_col = Self::column(&headers, &["timestamp", "time", "date"])
            .ok_or_else(|| anyhow!("Missing 'timestamp' column in CSV header"))?;
        let close_col = Self::column(&headers, &["close", "price"])
            .ok_or_else(|| anyhow!("Missing 'close' column in CSV header"))?;
        let open_col = Self::column(&headers, &["open"]);
        let high_col = Self::column(&headers, &["high"]);
        let low_col = Self::column(&headers, &["low"]);
        let volume_col = Self::column(&headers, &["volume"]);

        let mut points = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let line = idx + 2;
            let record = result.with_context(|| format!("Error reading CSV record at line {}", line))?;

            let timestamp_str = Self::required(&record, timestamp_col, "timestamp", line)?;
            let close_str = Self::required(&record, close_col, "close", line)?;

            let timestamp = parse_timestamp(timestamp_str)
                .with_context(|| format!("Error parsing 'timestamp' at line {}", line))?;
            let close = parse_price(close_str, "close")
                .with_context(|| format!("Error parsing 'close' at line {}", line))?;

            points.push(PricePoint {
                timestamp,
                close,
                open: Self::optional(&record, open_col, "open", line)?,
                high: Self::optional(&record, high_col, "high", line)?,
                low: Self::optional(&record, low_col, "low", line)?,
                volume: Self::optional(&record, volume_col, "volume", line)?,
            });
        }
        Ok(PriceSeries::new(symbol, points))
    }

    fn column(headers: &StringRecord, names: &[&str]) -> Option<usize> {
        headers.iter().position(|h| names.contains(&h))
    }

    fn required<'a>(record: &'a StringRecord, col: usize, name: &str, line: usize) -> Result<&'a str> {
        record
            .get(col)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| anyhow!("Missing '{}' field in CSV record at line {}", name, line))
    }

    fn optional(record: &StringRecord, col: Option<usize>, name: &str, line: usize) -> Result<Option<f64>> {
        match col.and_then(|c| record.get(c)).filter(|v| !v.is_empty()) {
            Some(raw) => parse_price(raw, name)
                .map(Some)
                .with_context(|| format!("Error parsing '{}' at line {}", name, line)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Timelike};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_parse_timestamp_millis() {
        let dt = parse_timestamp("1704067200000").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_rfc3339() {
        let dt = parse_timestamp("2024-12-30T18:20:00+02:00").unwrap();
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.hour(), 16);
        assert!(parse_timestamp("30/12/2024").is_err());
    }

    #[test]
    fn test_load_series_from_csv_valid_data() {
        let csv_content = "\
timestamp,open,high,low,close,volume
1704067200000,42280.1,42550.0,42100.5,42410.3,1534.2
2024-01-01T01:00:00Z,,,,42500,";
        let tmp_file = create_test_csv(csv_content);
        let series = PriceCsvParser::load_series_from_csv(tmp_file.path(), "bitcoin").unwrap();

        assert_eq!(series.symbol, "bitcoin");
        assert_eq!(series.len(), 2);
        let first = &series.points[0];
        assert_eq!(first.open, Some(42280.1));
        assert_eq!(first.high, Some(42550.0));
        assert_eq!(first.low, Some(42100.5));
        assert_eq!(first.close, 42410.3);
        assert_eq!(first.volume, Some(1534.2));

        let second = &series.points[1];
        assert_eq!(second.close, 42500.0);
        assert_eq!(second.open, None);
        assert_eq!(second.volume, None);
        assert_eq!(second.timestamp.minute(), 0);
    }

    #[test]
    fn test_price_column_alias() {
        let csv_content = "Timestamp,Price\n1704067200000,100.5";
        let series = PriceCsvParser::parse_series(csv_content.as_bytes(), "eth").unwrap();
        assert_eq!(series.closes(), vec![100.5]);
    }

    #[test]
    fn test_load_series_from_csv_header_only() {
        let tmp_file = create_test_csv("timestamp,close");
        let series = PriceCsvParser::load_series_from_csv(tmp_file.path(), "btc").unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_missing_close_column() {
        let result = PriceCsvParser::parse_series("timestamp,volume\n1,2".as_bytes(), "btc");
        assert!(result.unwrap_err().to_string().contains("Missing 'close' column"));
    }

    #[test]
    fn test_missing_close_value() {
        let result = PriceCsvParser::parse_series("timestamp,close\n1704067200000,".as_bytes(), "btc");
        assert!(result.unwrap_err().to_string().contains("Missing 'close' field in CSV record at line 2"));
    }

    #[test]
    fn test_invalid_number_reports_line() {
        let csv_content = "timestamp,close,high\n1704067200000,1.0,2.0\n1704070800000,1.5,abc";
        let err = PriceCsvParser::parse_series(csv_content.as_bytes(), "btc").unwrap_err();
        assert!(err.to_string().contains("Error parsing 'high' at line 3"));
    }

    #[test]
    fn test_missing_file() {
        let err = PriceCsvParser::load_series_from_csv("non_existent_file.csv", "btc").unwrap_err();
        assert!(err.to_string().contains("Failed to open CSV file"));
    }
}
