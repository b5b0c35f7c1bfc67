//! CSV candle file adapter.
//!
//! Files carry a `timestamp,open,high,low,close` header with epoch-millisecond
//! timestamps. Rows are taken in file order; nothing is sorted.

use crate::domain::candle::Candle;
use crate::domain::error::FxSignalError;
use crate::domain::timeframe::Timeframe;
use crate::ports::data_port::CandleSource;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

enum Location {
    /// One file per pair and timeframe, named `EUR_USD_1h.csv`.
    Directory(PathBuf),
    /// A single file served for any pair and timeframe.
    File(PathBuf),
}

pub struct CsvCandleAdapter {
    location: Location,
}

impl CsvCandleAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self {
            location: Location::Directory(base_path),
        }
    }

    pub fn from_file(path: PathBuf) -> Self {
        Self {
            location: Location::File(path),
        }
    }

    fn csv_path(&self, pair: &str, timeframe: Timeframe) -> PathBuf {
        match &self.location {
            Location::Directory(base) => base.join(file_name(pair, timeframe)),
            Location::File(path) => path.clone(),
        }
    }
}

/// `EUR/USD` on `1h` is stored as `EUR_USD_1h.csv`.
pub fn file_name(pair: &str, timeframe: Timeframe) -> String {
    format!("{}_{}.csv", pair.replace('/', "_"), timeframe)
}

impl CandleSource for CsvCandleAdapter {
    fn fetch_candles(
        &self,
        pair: &str,
        timeframe: Timeframe,
        count: usize,
    ) -> Result<Vec<Candle>, FxSignalError> {
        let path = self.csv_path(pair, timeframe);
        let file = File::open(&path).map_err(|e| FxSignalError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut candles = read_candles(file)?;
        let total = candles.len();
        if total > count {
            candles.drain(..total - count);
        }
        debug!(
            pair,
            %timeframe,
            file = %path.display(),
            rows = total,
            kept = candles.len(),
            "loaded candles from csv"
        );
        Ok(candles)
    }
}

pub fn read_candles<R: Read>(reader: R) -> Result<Vec<Candle>, FxSignalError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut candles = Vec::new();

    for (row, result) in rdr.deserialize::<Candle>().enumerate() {
        let candle = result.map_err(|e| FxSignalError::Data {
            reason: format!("CSV parse error: {}", e),
        })?;
        let prices = [candle.open, candle.high, candle.low, candle.close];
        if prices.iter().any(|p| !p.is_finite()) {
            return Err(FxSignalError::Data {
                reason: format!("non-finite price in data row {}", row + 1),
            });
        }
        candles.push(candle);
    }
    Ok(candles)
}

pub fn write_candles(path: &Path, candles: &[Candle]) -> Result<(), FxSignalError> {
    let mut wtr = csv::Writer::from_path(path).map_err(|e| FxSignalError::Data {
        reason: format!("failed to create {}: {}", path.display(), e),
    })?;
    for candle in candles {
        wtr.serialize(candle).map_err(|e| FxSignalError::Data {
            reason: format!("CSV write error: {}", e),
        })?;
    }
    wtr.flush()?;
    debug!(file = %path.display(), rows = candles.len(), "wrote candles to csv");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const EUR_USD_1H: &str = "timestamp,open,high,low,close\n\
        1705276800000,1.0850,1.0870,1.0840,1.0860\n\
        1705280400000,1.0860,1.0880,1.0855,1.0875\n\
        1705284000000,1.0875,1.0890,1.0865,1.0870\n";

    fn setup_test_data() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();
        fs::write(path.join("EUR_USD_1h.csv"), EUR_USD_1H).unwrap();
        fs::write(path.join("USD_JPY_5m.csv"), "timestamp,open,high,low,close\n").unwrap();
        (dir, path)
    }

    #[test]
    fn file_name_replaces_slash() {
        assert_eq!(file_name("EUR/USD", Timeframe::H1), "EUR_USD_1h.csv");
        assert_eq!(file_name("BTC/USD", Timeframe::M15), "BTC_USD_15m.csv");
    }

    #[test]
    fn fetch_candles_returns_rows_in_order() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvCandleAdapter::new(path);

        let candles = adapter.fetch_candles("EUR/USD", Timeframe::H1, 100).unwrap();
        assert_eq!(candles.len(), 3);
        assert_eq!(candles[0].timestamp, 1_705_276_800_000);
        assert_eq!(candles[0].open, 1.0850);
        assert_eq!(candles[0].high, 1.0870);
        assert_eq!(candles[0].low, 1.0840);
        assert_eq!(candles[2].close, 1.0870);
    }

    #[test]
    fn fetch_candles_keeps_most_recent() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvCandleAdapter::new(path);

        let candles = adapter.fetch_candles("EUR/USD", Timeframe::H1, 2).unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].timestamp, 1_705_280_400_000);
        assert_eq!(candles[1].timestamp, 1_705_284_000_000);
    }

    #[test]
    fn fetch_candles_empty_file_is_empty() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvCandleAdapter::new(path);
        let candles = adapter.fetch_candles("USD/JPY", Timeframe::M5, 50).unwrap();
        assert!(candles.is_empty());
    }

    #[test]
    fn fetch_candles_missing_file_is_error() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvCandleAdapter::new(path);
        let result = adapter.fetch_candles("GBP/JPY", Timeframe::H1, 50);
        assert!(matches!(result, Err(FxSignalError::Data { .. })));
    }

    #[test]
    fn single_file_serves_any_pair() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvCandleAdapter::from_file(path.join("EUR_USD_1h.csv"));
        let candles = adapter.fetch_candles("ANY/PAIR", Timeframe::M1, 10).unwrap();
        assert_eq!(candles.len(), 3);
    }

    #[test]
    fn read_candles_rejects_bad_number() {
        let data = "timestamp,open,high,low,close\n1,1.0,abc,0.9,1.0\n";
        let result = read_candles(data.as_bytes());
        assert!(matches!(result, Err(FxSignalError::Data { .. })));
    }

    #[test]
    fn read_candles_rejects_non_finite() {
        let data = "timestamp,open,high,low,close\n1,1.0,inf,0.9,1.0\n";
        let err = read_candles(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn read_candles_trims_whitespace() {
        let data = "timestamp, open, high, low, close\n1, 1.0, 1.2, 0.9, 1.1\n";
        let candles = read_candles(data.as_bytes()).unwrap();
        assert_eq!(candles[0].close, 1.1);
    }

    #[test]
    fn write_then_fetch() {
        let dir = TempDir::new().unwrap();
        let candles = vec![
            Candle {
                timestamp: 60_000,
                open: 157.0,
                high: 157.2,
                low: 156.9,
                close: 157.1,
            },
            Candle {
                timestamp: 120_000,
                open: 157.1,
                high: 157.3,
                low: 157.0,
                close: 157.25,
            },
        ];
        write_candles(&dir.path().join("USD_JPY_1m.csv"), &candles).unwrap();

        let adapter = CsvCandleAdapter::new(dir.path().to_path_buf());
        let loaded = adapter.fetch_candles("USD/JPY", Timeframe::M1, 10).unwrap();
        assert_eq!(loaded, candles);
    }
}
