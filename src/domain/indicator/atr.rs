//! Average True Range and the volatility-level classifier.
//!
//! ATR(n) = mean of the true ranges of the trailing n candles. Each true
//! range uses the preceding candle's close; only the first candle of the
//! whole sequence falls back to its own open. Fewer than n candles gives 0.
//!
//! The level is a step function of ATR as a percentage of the last close,
//! evaluated highest threshold first, with a separate table for prices above
//! `VolatilityBands::large_price_cutoff`.

use crate::domain::analysis_config::VolatilityBands;
use crate::domain::candle::Candle;
use crate::domain::indicator::{VolatilityInfo, VolatilityLevel};

pub fn atr(candles: &[Candle], period: usize) -> f64 {
    if period == 0 || candles.len() < period {
        return 0.0;
    }

    let start = candles.len() - period;
    let window = &candles[start..];
    let mut prev_close = match start.checked_sub(1) {
        Some(before) => candles[before].close,
        None => window[0].open,
    };
    let mut sum = 0.0;

    for candle in window {
        sum += candle.true_range(prev_close);
        prev_close = candle.close;
    }

    sum / period as f64
}

pub fn classify_volatility(atr: f64, last_close: f64, bands: &VolatilityBands) -> VolatilityLevel {
    if last_close <= 0.0 || !atr.is_finite() {
        return VolatilityLevel::Low;
    }

    let atr_pct = atr / last_close * 100.0;
    let (moderate, high, very_high) = if last_close > bands.large_price_cutoff {
        (
            bands.large_moderate_pct,
            bands.large_high_pct,
            bands.large_very_high_pct,
        )
    } else {
        (bands.moderate_pct, bands.high_pct, bands.very_high_pct)
    };

    if atr_pct >= very_high {
        VolatilityLevel::VeryHigh
    } else if atr_pct >= high {
        VolatilityLevel::High
    } else if atr_pct >= moderate {
        VolatilityLevel::Moderate
    } else {
        VolatilityLevel::Low
    }
}

pub fn volatility(candles: &[Candle], period: usize, bands: &VolatilityBands) -> VolatilityInfo {
    let Some(last) = candles.last() else {
        return VolatilityInfo::QUIET;
    };
    if candles.len() < period {
        return VolatilityInfo::QUIET;
    }

    let atr = atr(candles, period);
    VolatilityInfo {
        atr,
        level: classify_volatility(atr, last.close, bands),
    }
}
