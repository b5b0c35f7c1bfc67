//! Commodity Channel Index.
//!
//! TP = (H + L + C) / 3 over the trailing n candles.
//! CCI = (TP[last] - mean(TP)) / (0.015 * mean_abs_dev(TP))
//! 0 when fewer than n candles or when the mean deviation is zero.

use crate::domain::candle::Candle;

const LAMBERT_CONSTANT: f64 = 0.015;

pub fn cci(candles: &[Candle], period: usize) -> f64 {
    if period == 0 || candles.len() < period {
        return 0.0;
    }

    let window = &candles[candles.len() - period..];
    let typical: Vec<f64> = window.iter().map(Candle::typical_price).collect();
    let mean = typical.iter().sum::<f64>() / period as f64;
    let mean_dev = typical.iter().map(|tp| (tp - mean).abs()).sum::<f64>() / period as f64;

    if mean_dev == 0.0 {
        return 0.0;
    }

    (typical[period - 1] - mean) / (LAMBERT_CONSTANT * mean_dev)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn make_candles(closes: &[f64]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle {
                timestamp: i as i64 * 60_000,
                open: close,
                high: close,
                low: close,
                close,
            })
            .collect()
    }

    #[test]
    fn cci_insufficient_data() {
        assert_eq!(cci(&make_candles(&[1.0, 2.0, 3.0]), 20), 0.0);
        assert_eq!(cci(&[], 20), 0.0);
    }

    #[test]
    fn cci_flat_is_zero() {
        assert_eq!(cci(&make_candles(&[1.1; 25]), 20), 0.0);
    }

    #[test]
    fn cci_known_value() {
        // TP = 1, 2, 3, 4 → mean 2.5, mean dev 1.0 → (4 - 2.5) / 0.015 = 100
        let value = cci(&make_candles(&[1.0, 2.0, 3.0, 4.0]), 4);
        assert_abs_diff_eq!(value, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn cci_uses_trailing_window_only() {
        let value = cci(&make_candles(&[500.0, 1.0, 2.0, 3.0, 4.0]), 4);
        assert_abs_diff_eq!(value, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn cci_negative_when_below_mean() {
        let value = cci(&make_candles(&[4.0, 3.0, 2.0, 1.0]), 4);
        assert_abs_diff_eq!(value, -100.0, epsilon = 1e-9);
    }
}
