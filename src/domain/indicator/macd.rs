//! MACD (Moving Average Convergence Divergence) indicator.
//!
//! MACD Line = EMA(fast) - EMA(slow), elementwise over the whole series
//! Signal Line = EMA(signal) of MACD Line
//! Histogram = MACD Line - Signal Line, taken at the last index
//!
//! EMAs are seeded with the first value (see `series::ema`).
//! Default parameters: fast=12, slow=26, signal=9
//! Fewer than `slow` closes gives an all-zero result.

use crate::domain::indicator::Macd;
use crate::domain::indicator::series::ema;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

pub fn macd(closes: &[f64], fast: usize, slow: usize, signal_period: usize) -> Macd {
    if closes.is_empty() || slow == 0 || closes.len() < slow {
        return Macd::default();
    }

    let line = macd_line(closes, fast, slow);
    let signal_line = ema(&line, signal_period);

    let macd = line.last().copied().unwrap_or(0.0);
    let signal = signal_line.last().copied().unwrap_or(0.0);

    Macd {
        macd,
        signal,
        histogram: macd - signal,
    }
}

pub fn macd_default(closes: &[f64]) -> Macd {
    macd(closes, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
}

fn macd_line(closes: &[f64], fast: usize, slow: usize) -> Vec<f64> {
    let ema_fast = ema(closes, fast);
    let ema_slow = ema(closes, slow);
    ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| f - s)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rising(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + i as f64).collect()
    }

    #[test]
    fn macd_insufficient_is_zero() {
        assert_eq!(macd_default(&rising(25)), Macd::default());
        assert_eq!(macd_default(&[]), Macd::default());
    }

    #[test]
    fn macd_defined_at_slow_period() {
        let m = macd_default(&rising(26));
        assert!(m.macd > 0.0);
    }

    #[test]
    fn macd_histogram_equals_line_minus_signal() {
        let m = macd_default(&rising(40));
        assert!((m.histogram - (m.macd - m.signal)).abs() < f64::EPSILON);
    }

    #[test]
    fn macd_line_is_ema_fast_minus_ema_slow() {
        let closes = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0];
        let m = macd(&closes, 3, 5, 2);

        let fast = ema(&closes, 3);
        let slow = ema(&closes, 5);
        let line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal = ema(&line, 2);

        assert!((m.macd - line[9]).abs() < f64::EPSILON);
        assert!((m.signal - signal[9]).abs() < f64::EPSILON);
    }

    #[test]
    fn macd_flat_prices_are_zero() {
        let m = macd_default(&[1.1; 40]);
        assert!(m.macd.abs() < 1e-12);
        assert!(m.signal.abs() < 1e-12);
        assert!(m.histogram.abs() < 1e-12);
    }

    #[test]
    fn macd_falling_prices_negative_line() {
        let closes: Vec<f64> = (0..40).map(|i| 200.0 - i as f64).collect();
        let m = macd_default(&closes);
        assert!(m.macd < 0.0);
    }

    #[test]
    fn macd_default_constants() {
        assert_eq!(DEFAULT_FAST, 12);
        assert_eq!(DEFAULT_SLOW, 26);
        assert_eq!(DEFAULT_SIGNAL, 9);
    }
}
