//! Bollinger Bands indicator.
//!
//! Bollinger Bands consist of:
//! - Middle: Simple Moving Average (SMA) over n periods
//! - Upper: Middle + (multiplier × StdDev)
//! - Lower: Middle - (multiplier × StdDev)
//!
//! Where StdDev is population standard deviation (divides by N, not N-1).
//!
//! Default parameters: period=20, multiplier=2.0
//! Fewer than `period` closes gives all-zero bands.

use crate::domain::indicator::BollingerBands;
use crate::domain::indicator::series::try_sma;

pub fn bollinger_bands(closes: &[f64], period: usize, multiplier: f64) -> BollingerBands {
    let Some(middle) = try_sma(closes, period) else {
        return BollingerBands::default();
    };

    let window = &closes[closes.len() - period..];
    let variance: f64 = window
        .iter()
        .map(|c| {
            let diff = c - middle;
            diff * diff
        })
        .sum::<f64>()
        / period as f64;

    let stddev = variance.sqrt();

    BollingerBands {
        upper: middle + multiplier * stddev,
        middle,
        lower: middle - multiplier * stddev,
    }
}
