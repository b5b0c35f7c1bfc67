//! Fibonacci retracement levels over a trailing lookback window.
//!
//! The window is the last `min(len, lookback)` candles and must hold at least
//! `min_candles`; otherwise all levels are zero with an `Up` trend.
//!
//! Trend is `Up` when the window's highest high comes after its lowest low.
//! Up:   level(r) = low + range * r   (level0 = low, level100 = high)
//! Down: level(r) = high - range * r  (level0 = high, level100 = low)

use crate::domain::candle::Candle;
use crate::domain::indicator::{FibTrend, FibonacciLevels};

pub const RATIOS: [f64; 7] = [0.0, 0.236, 0.382, 0.5, 0.618, 0.786, 1.0];

pub fn fibonacci_levels(candles: &[Candle], lookback: usize, min_candles: usize) -> FibonacciLevels {
    let span = candles.len().min(lookback);
    if span == 0 || span < min_candles {
        return FibonacciLevels::EMPTY;
    }
    let window = &candles[candles.len() - span..];

    // First occurrence wins on ties.
    let mut high_idx = 0;
    let mut low_idx = 0;
    for (i, candle) in window.iter().enumerate() {
        if candle.high > window[high_idx].high {
            high_idx = i;
        }
        if candle.low < window[low_idx].low {
            low_idx = i;
        }
    }

    let high = window[high_idx].high;
    let low = window[low_idx].low;
    let range = high - low;
    let trend = if high_idx > low_idx {
        FibTrend::Up
    } else {
        FibTrend::Down
    };

    let level = |ratio: f64| match trend {
        FibTrend::Up => low + range * ratio,
        FibTrend::Down => high - range * ratio,
    };

    FibonacciLevels {
        level0: level(RATIOS[0]),
        level236: level(RATIOS[1]),
        level382: level(RATIOS[2]),
        level500: level(RATIOS[3]),
        level618: level(RATIOS[4]),
        level786: level(RATIOS[5]),
        level100: level(RATIOS[6]),
        trend,
    }
}
