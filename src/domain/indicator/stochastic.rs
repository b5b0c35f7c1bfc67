//! Slow Stochastic oscillator.
//!
//! Raw %K[i] = (C[i] - LL(n)) / (HH(n) - LL(n)) * 100, or 50 on a zero range.
//! %K = EMA(k_smooth) of raw %K, %D = EMA(d_smooth) of %K.
//! Needs at least n + k_smooth candles; otherwise {50, 50}.

use crate::domain::candle::Candle;
use crate::domain::indicator::Stochastic;
use crate::domain::indicator::series::ema;

pub fn stochastic(
    candles: &[Candle],
    period: usize,
    k_smooth: usize,
    d_smooth: usize,
) -> Stochastic {
    if period == 0 || candles.len() < period + k_smooth {
        return Stochastic::NEUTRAL;
    }

    let raw_k: Vec<f64> = candles
        .windows(period)
        .map(|window| {
            let highest = window.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
            let lowest = window.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
            let close = window[period - 1].close;
            let range = highest - lowest;
            if range == 0.0 {
                50.0
            } else {
                (close - lowest) / range * 100.0
            }
        })
        .collect();

    let k_series = ema(&raw_k, k_smooth);
    let d_series = ema(&k_series, d_smooth);

    match (k_series.last(), d_series.last()) {
        (Some(&k), Some(&d)) => Stochastic { k, d },
        _ => Stochastic::NEUTRAL,
    }
}
