//! Indicator aggregation: one candle sequence in, one `Indicators` snapshot out.
//!
//! Fans out to every engine in [`crate::domain::indicator`], then rounds each
//! field for display stability: price-scale values to 5 decimals and
//! oscillators to 4. Non-finite intermediates become 0. Never fails; short
//! input produces each engine's neutral default.

use crate::domain::analysis_config::AnalysisConfig;
use crate::domain::candle::{self, Candle};
use crate::domain::indicator::atr::volatility;
use crate::domain::indicator::bollinger::bollinger_bands;
use crate::domain::indicator::cci::cci;
use crate::domain::indicator::divergence::{DivergenceFloors, detect_divergence};
use crate::domain::indicator::fibonacci::fibonacci_levels;
use crate::domain::indicator::macd::macd;
use crate::domain::indicator::rsi::{NEUTRAL_RSI, rsi_series};
use crate::domain::indicator::series::sma;
use crate::domain::indicator::stochastic::stochastic;
use crate::domain::indicator::{
    BollingerBands, FibonacciLevels, Indicators, Macd, Stochastic, VolatilityInfo,
};

pub const PRICE_DECIMALS: i32 = 5;
pub const OSCILLATOR_DECIMALS: i32 = 4;

pub fn compute_indicators(candles: &[Candle]) -> Indicators {
    compute_indicators_with(candles, &AnalysisConfig::default())
}

pub fn compute_indicators_with(candles: &[Candle], config: &AnalysisConfig) -> Indicators {
    let p = &config.periods;
    let closes = candle::closes(candles);
    let lows = candle::lows(candles);
    let highs = candle::highs(candles);

    let rsi_values = rsi_series(&closes, p.rsi);
    let rsi = rsi_values.last().copied().unwrap_or(NEUTRAL_RSI);

    let divergence = detect_divergence(
        &closes,
        &lows,
        &highs,
        &rsi_values,
        p.divergence_window,
        DivergenceFloors {
            bullish: config.thresholds.divergence_bullish_floor,
            bearish: config.thresholds.divergence_bearish_floor,
        },
    );

    let bands = bollinger_bands(&closes, p.bollinger, p.bollinger_multiplier);
    let macd = macd(&closes, p.macd_fast, p.macd_slow, p.macd_signal);
    let stoch = stochastic(candles, p.stochastic, p.stochastic_k_smooth, p.stochastic_d_smooth);
    let vol = volatility(candles, p.atr, &config.volatility);
    let fib = fibonacci_levels(candles, p.fib_lookback, p.fib_min_candles);

    Indicators {
        rsi: round_oscillator(rsi),
        sma20: round_price(sma(&closes, p.sma)),
        current_price: round_price(closes.last().copied().unwrap_or(0.0)),
        divergence,
        bollinger_bands: round_bands(bands),
        macd: round_macd(macd),
        stochastic: round_stochastic(stoch),
        atr: round_price(vol.atr),
        cci: round_oscillator(cci(candles, p.cci)),
        fibonacci: round_fibonacci(fib),
    }
}

pub fn compute_volatility(candles: &[Candle]) -> VolatilityInfo {
    compute_volatility_with(candles, &AnalysisConfig::default())
}

pub fn compute_volatility_with(candles: &[Candle], config: &AnalysisConfig) -> VolatilityInfo {
    let info = volatility(candles, config.periods.atr, &config.volatility);
    VolatilityInfo {
        atr: round_price(info.atr),
        level: info.level,
    }
}

/// Round to `decimals` places; NaN and infinities map to 0.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(decimals);
    let rounded = (value * factor).round() / factor;
    if rounded.is_finite() { rounded } else { 0.0 }
}

fn round_price(value: f64) -> f64 {
    round_to(value, PRICE_DECIMALS)
}

fn round_oscillator(value: f64) -> f64 {
    round_to(value, OSCILLATOR_DECIMALS)
}

fn round_bands(bands: BollingerBands) -> BollingerBands {
    BollingerBands {
        upper: round_price(bands.upper),
        middle: round_price(bands.middle),
        lower: round_price(bands.lower),
    }
}

// Histogram is derived from the rounded line and signal so that
// histogram == macd - signal holds on the rounded values.
fn round_macd(m: Macd) -> Macd {
    let macd = round_price(m.macd);
    let signal = round_price(m.signal);
    Macd {
        macd,
        signal,
        histogram: round_price(macd - signal),
    }
}

fn round_stochastic(s: Stochastic) -> Stochastic {
    Stochastic {
        k: round_oscillator(s.k),
        d: round_oscillator(s.d),
    }
}

fn round_fibonacci(f: FibonacciLevels) -> FibonacciLevels {
    FibonacciLevels {
        level0: round_price(f.level0),
        level236: round_price(f.level236),
        level382: round_price(f.level382),
        level500: round_price(f.level500),
        level618: round_price(f.level618),
        level786: round_price(f.level786),
        level100: round_price(f.level100),
        trend: f.trend,
    }
}
