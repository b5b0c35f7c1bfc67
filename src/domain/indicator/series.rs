//! Moving-average building blocks over plain `f64` sequences.
//!
//! SMA(n) = mean of the last n values; 0.0 when fewer than n are available.
//! EMA: k = 2/(n+1), seeded with the first value, then
//! EMA[i] = V[i]*k + EMA[i-1]*(1-k). Output length equals input length.

/// Mean of the last `period` values, or 0.0 when there are not enough values.
///
/// A zero here is indistinguishable from a real zero average; use [`try_sma`]
/// where that matters.
pub fn sma(values: &[f64], period: usize) -> f64 {
    try_sma(values, period).unwrap_or(0.0)
}

/// Mean of the last `period` values, `None` when there are not enough values.
pub fn try_sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Exponential moving average of every value, seeded with `values[0]`.
///
/// Used for price smoothing and for smoothing derived series (MACD signal
/// line, stochastic %K and %D).
pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    let Some(&first) = values.first() else {
        return Vec::new();
    };

    let k = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut prev = first;
    out.push(prev);

    for &value in &values[1..] {
        prev = value * k + prev * (1.0 - k);
        out.push(prev);
    }

    out
}
