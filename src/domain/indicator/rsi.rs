//! RSI (Relative Strength Index) indicator.
//!
//! Uses Wilder's smoothing for average gain/loss calculation:
//! - First average: simple mean of gains/losses over the first n changes
//! - Subsequent: avg = (prev_avg * (n-1) + current) / n
//!
//! Formula: RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//! If avg_loss == 0: RSI = 100
//!
//! Warmup: the first n values are neutral (50); a series with fewer than n+1
//! closes is neutral throughout.

pub const NEUTRAL_RSI: f64 = 50.0;

/// One RSI value per input close, index-aligned with `closes`.
pub fn rsi_series(closes: &[f64], period: usize) -> Vec<f64> {
    let mut values = vec![NEUTRAL_RSI; closes.len()];
    if period == 0 || closes.len() < period + 1 {
        return values;
    }

    let changes: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
    let gain = |c: f64| if c > 0.0 { c } else { 0.0 };
    let loss = |c: f64| if c < 0.0 { -c } else { 0.0 };

    let mut avg_gain = changes[..period].iter().copied().map(gain).sum::<f64>() / period as f64;
    let mut avg_loss = changes[..period].iter().copied().map(loss).sum::<f64>() / period as f64;
    values[period] = relative_strength_index(avg_gain, avg_loss);

    for i in (period + 1)..closes.len() {
        let change = changes[i - 1];
        avg_gain = (avg_gain * (period - 1) as f64 + gain(change)) / period as f64;
        avg_loss = (avg_loss * (period - 1) as f64 + loss(change)) / period as f64;
        values[i] = relative_strength_index(avg_gain, avg_loss);
    }

    values
}

/// RSI at the last close, or neutral when the series is empty.
pub fn rsi(closes: &[f64], period: usize) -> f64 {
    rsi_series(closes, period)
        .last()
        .copied()
        .unwrap_or(NEUTRAL_RSI)
}

fn relative_strength_index(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
    }
}
