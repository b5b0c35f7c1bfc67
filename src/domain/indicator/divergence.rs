//! Price/RSI divergence at the latest candle.
//!
//! Compares the current close and RSI against the single lowest low and
//! highest high of the `window` candles before it:
//! - Bullish: close <= that low, RSI now > RSI at the low, and RSI at the low
//!   was below the bullish floor (default 40)
//! - Bearish: close >= that high, RSI now < RSI at the high, and RSI at the
//!   high was above the bearish floor (default 60)
//!
//! Needs `window + 1` candles; fewer gives `None`. Ties pick the earliest
//! extreme. `closes`, `lows`, `highs` and `rsi` must be index-aligned.

use crate::domain::indicator::Divergence;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DivergenceFloors {
    pub bullish: f64,
    pub bearish: f64,
}

impl Default for DivergenceFloors {
    fn default() -> Self {
        Self {
            bullish: 40.0,
            bearish: 60.0,
        }
    }
}

pub fn detect_divergence(
    closes: &[f64],
    lows: &[f64],
    highs: &[f64],
    rsi: &[f64],
    window: usize,
    floors: DivergenceFloors,
) -> Divergence {
    let n = closes.len();
    if window == 0 || n < window + 1 || lows.len() != n || highs.len() != n || rsi.len() != n {
        return Divergence::None;
    }

    let current = n - 1;
    let start = current - window;

    let mut low_idx = start;
    let mut high_idx = start;
    for i in start..current {
        if lows[i] < lows[low_idx] {
            low_idx = i;
        }
        if highs[i] > highs[high_idx] {
            high_idx = i;
        }
    }

    let close = closes[current];
    let current_rsi = rsi[current];

    if close <= lows[low_idx] && current_rsi > rsi[low_idx] && rsi[low_idx] < floors.bullish {
        return Divergence::Bullish;
    }

    if close >= highs[high_idx] && current_rsi < rsi[high_idx] && rsi[high_idx] > floors.bearish {
        return Divergence::Bearish;
    }

    Divergence::None
}
