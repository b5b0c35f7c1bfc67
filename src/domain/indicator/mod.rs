//! Technical indicator implementations.
//!
//! This module provides the output shapes of the indicator engine:
//! - `Indicators`: the immutable snapshot computed from one candle sequence
//! - `BollingerBands`, `Macd`, `Stochastic`, `FibonacciLevels`: per-indicator values
//! - `VolatilityInfo`: ATR plus its coarse classification
//! - `IndicatorType`: indicator identity + parameters, used for labelling output
//!
//! Each submodule implements one engine as free functions over slices.

pub mod atr;
pub mod bollinger;
pub mod cci;
pub mod divergence;
pub mod fibonacci;
pub mod macd;
pub mod rsi;
pub mod series;
pub mod stochastic;

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Divergence {
    Bullish,
    Bearish,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FibTrend {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Macd {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stochastic {
    pub k: f64,
    pub d: f64,
}

impl Stochastic {
    pub const NEUTRAL: Stochastic = Stochastic { k: 50.0, d: 50.0 };
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FibonacciLevels {
    pub level0: f64,
    pub level236: f64,
    pub level382: f64,
    pub level500: f64,
    pub level618: f64,
    pub level786: f64,
    pub level100: f64,
    pub trend: FibTrend,
}

impl FibonacciLevels {
    pub const EMPTY: FibonacciLevels = FibonacciLevels {
        level0: 0.0,
        level236: 0.0,
        level382: 0.0,
        level500: 0.0,
        level618: 0.0,
        level786: 0.0,
        level100: 0.0,
        trend: FibTrend::Up,
    };

    /// Levels in order from 0% to 100%.
    pub fn levels(&self) -> [f64; 7] {
        [
            self.level0,
            self.level236,
            self.level382,
            self.level500,
            self.level618,
            self.level786,
            self.level100,
        ]
    }
}

/// Fully computed indicator snapshot for one candle sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Indicators {
    pub rsi: f64,
    pub sma20: f64,
    pub current_price: f64,
    pub divergence: Divergence,
    pub bollinger_bands: BollingerBands,
    pub macd: Macd,
    pub stochastic: Stochastic,
    pub atr: f64,
    pub cci: f64,
    pub fibonacci: FibonacciLevels,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum VolatilityLevel {
    Low,
    Moderate,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl fmt::Display for VolatilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VolatilityLevel::Low => write!(f, "Low"),
            VolatilityLevel::Moderate => write!(f, "Moderate"),
            VolatilityLevel::High => write!(f, "High"),
            VolatilityLevel::VeryHigh => write!(f, "Very High"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VolatilityInfo {
    pub atr: f64,
    pub level: VolatilityLevel,
}

impl VolatilityInfo {
    pub const QUIET: VolatilityInfo = VolatilityInfo {
        atr: 0.0,
        level: VolatilityLevel::Low,
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Rsi(usize),
    Atr(usize),
    Cci(usize),
    Macd {
        fast: usize,
        slow: usize,
        signal: usize,
    },
    Stochastic {
        period: usize,
        k_smooth: usize,
        d_smooth: usize,
    },
    Bollinger {
        period: usize,
        stddev_mult_x100: u32,
    },
    Fibonacci {
        lookback: usize,
    },
    Divergence {
        window: usize,
    },
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorType::Atr(period) => write!(f, "ATR({})", period),
            IndicatorType::Cci(period) => write!(f, "CCI({})", period),
            IndicatorType::Macd { fast, slow, signal } => {
                write!(f, "MACD({},{},{})", fast, slow, signal)
            }
            IndicatorType::Stochastic {
                period,
                k_smooth,
                d_smooth,
            } => write!(f, "STOCHASTIC({},{},{})", period, k_smooth, d_smooth),
            IndicatorType::Bollinger {
                period,
                stddev_mult_x100,
            } => {
                let mult = *stddev_mult_x100 as f64 / 100.0;
                write!(f, "BOLLINGER({},{})", period, mult)
            }
            IndicatorType::Fibonacci { lookback } => write!(f, "FIBONACCI({})", lookback),
            IndicatorType::Divergence { window } => write!(f, "DIVERGENCE({})", window),
        }
    }
}
