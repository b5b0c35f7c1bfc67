//! Calibration constants for the indicator engine and the strategy rules.
//!
//! Every lookback and threshold the engine uses lives here with its default
//! value, so callers can override them from an INI file (see
//! [`build_analysis_config`]) instead of relying on inlined literals.

use crate::domain::config_validation::validate_analysis_config;
use crate::domain::error::FxSignalError;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_RSI_PERIOD: usize = 14;
pub const DEFAULT_SMA_PERIOD: usize = 20;
pub const DEFAULT_BOLLINGER_PERIOD: usize = 20;
pub const DEFAULT_BOLLINGER_MULTIPLIER: f64 = 2.0;
pub const DEFAULT_STOCHASTIC_PERIOD: usize = 14;
pub const DEFAULT_STOCHASTIC_K_SMOOTH: usize = 3;
pub const DEFAULT_STOCHASTIC_D_SMOOTH: usize = 3;
pub const DEFAULT_CCI_PERIOD: usize = 20;
pub const DEFAULT_ATR_PERIOD: usize = 14;
pub const DEFAULT_FIB_LOOKBACK: usize = 100;
pub const DEFAULT_FIB_MIN_CANDLES: usize = 50;
pub const DEFAULT_DIVERGENCE_WINDOW: usize = 15;

/// Lookback lengths for every indicator in the snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorPeriods {
    pub rsi: usize,
    pub sma: usize,
    pub bollinger: usize,
    pub bollinger_multiplier: f64,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub stochastic: usize,
    pub stochastic_k_smooth: usize,
    pub stochastic_d_smooth: usize,
    pub cci: usize,
    pub atr: usize,
    pub fib_lookback: usize,
    pub fib_min_candles: usize,
    pub divergence_window: usize,
}

impl Default for IndicatorPeriods {
    fn default() -> Self {
        Self {
            rsi: DEFAULT_RSI_PERIOD,
            sma: DEFAULT_SMA_PERIOD,
            bollinger: DEFAULT_BOLLINGER_PERIOD,
            bollinger_multiplier: DEFAULT_BOLLINGER_MULTIPLIER,
            macd_fast: crate::domain::indicator::macd::DEFAULT_FAST,
            macd_slow: crate::domain::indicator::macd::DEFAULT_SLOW,
            macd_signal: crate::domain::indicator::macd::DEFAULT_SIGNAL,
            stochastic: DEFAULT_STOCHASTIC_PERIOD,
            stochastic_k_smooth: DEFAULT_STOCHASTIC_K_SMOOTH,
            stochastic_d_smooth: DEFAULT_STOCHASTIC_D_SMOOTH,
            cci: DEFAULT_CCI_PERIOD,
            atr: DEFAULT_ATR_PERIOD,
            fib_lookback: DEFAULT_FIB_LOOKBACK,
            fib_min_candles: DEFAULT_FIB_MIN_CANDLES,
            divergence_window: DEFAULT_DIVERGENCE_WINDOW,
        }
    }
}

/// Oscillator levels read by the divergence detector and the strategy rules.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalThresholds {
    pub rsi_overbought: f64,
    pub rsi_oversold: f64,
    pub cci_overbought: f64,
    pub cci_oversold: f64,
    pub stochastic_overbought: f64,
    pub stochastic_oversold: f64,
    /// RSI at the prior low must be below this for a bullish divergence.
    pub divergence_bullish_floor: f64,
    /// RSI at the prior high must be above this for a bearish divergence.
    pub divergence_bearish_floor: f64,
    pub fallback_rsi_buy: f64,
    pub fallback_rsi_sell: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            rsi_overbought: 70.0,
            rsi_oversold: 30.0,
            cci_overbought: 100.0,
            cci_oversold: -100.0,
            stochastic_overbought: 80.0,
            stochastic_oversold: 20.0,
            divergence_bullish_floor: 40.0,
            divergence_bearish_floor: 60.0,
            fallback_rsi_buy: 35.0,
            fallback_rsi_sell: 65.0,
        }
    }
}

/// ATR-as-percentage-of-price steps for the volatility classifier.
///
/// Prices above `large_price_cutoff` use the `large_*` table. This is a proxy
/// for instrument type (forex quote vs. crypto/metal) and misclassifies any
/// quote-style instrument priced above the cutoff.
#[derive(Debug, Clone, PartialEq)]
pub struct VolatilityBands {
    pub large_price_cutoff: f64,
    pub moderate_pct: f64,
    pub high_pct: f64,
    pub very_high_pct: f64,
    pub large_moderate_pct: f64,
    pub large_high_pct: f64,
    pub large_very_high_pct: f64,
}

impl Default for VolatilityBands {
    fn default() -> Self {
        Self {
            large_price_cutoff: 1000.0,
            moderate_pct: 0.5,
            high_pct: 1.0,
            very_high_pct: 2.0,
            large_moderate_pct: 1.5,
            large_high_pct: 3.0,
            large_very_high_pct: 5.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisConfig {
    pub periods: IndicatorPeriods,
    pub thresholds: SignalThresholds,
    pub volatility: VolatilityBands,
}

/// Build an [`AnalysisConfig`] from `[periods]`, `[thresholds]` and
/// `[volatility]` sections. Missing keys keep their defaults.
pub fn build_analysis_config(config: &dyn ConfigPort) -> Result<AnalysisConfig, FxSignalError> {
    validate_analysis_config(config)?;

    let d = AnalysisConfig::default();
    let period = |key: &str, default: usize| config.get_int("periods", key, default as i64) as usize;
    let threshold = |key: &str, default: f64| config.get_double("thresholds", key, default);
    let band = |key: &str, default: f64| config.get_double("volatility", key, default);

    Ok(AnalysisConfig {
        periods: IndicatorPeriods {
            rsi: period("rsi", d.periods.rsi),
            sma: period("sma", d.periods.sma),
            bollinger: period("bollinger", d.periods.bollinger),
            bollinger_multiplier: config.get_double(
                "periods",
                "bollinger_multiplier",
                d.periods.bollinger_multiplier,
            ),
            macd_fast: period("macd_fast", d.periods.macd_fast),
            macd_slow: period("macd_slow", d.periods.macd_slow),
            macd_signal: period("macd_signal", d.periods.macd_signal),
            stochastic: period("stochastic", d.periods.stochastic),
            stochastic_k_smooth: period("stochastic_k_smooth", d.periods.stochastic_k_smooth),
            stochastic_d_smooth: period("stochastic_d_smooth", d.periods.stochastic_d_smooth),
            cci: period("cci", d.periods.cci),
            atr: period("atr", d.periods.atr),
            fib_lookback: period("fib_lookback", d.periods.fib_lookback),
            fib_min_candles: period("fib_min_candles", d.periods.fib_min_candles),
            divergence_window: period("divergence_window", d.periods.divergence_window),
        },
        thresholds: SignalThresholds {
            rsi_overbought: threshold("rsi_overbought", d.thresholds.rsi_overbought),
            rsi_oversold: threshold("rsi_oversold", d.thresholds.rsi_oversold),
            cci_overbought: threshold("cci_overbought", d.thresholds.cci_overbought),
            cci_oversold: threshold("cci_oversold", d.thresholds.cci_oversold),
            stochastic_overbought: threshold(
                "stochastic_overbought",
                d.thresholds.stochastic_overbought,
            ),
            stochastic_oversold: threshold("stochastic_oversold", d.thresholds.stochastic_oversold),
            divergence_bullish_floor: threshold(
                "divergence_bullish_floor",
                d.thresholds.divergence_bullish_floor,
            ),
            divergence_bearish_floor: threshold(
                "divergence_bearish_floor",
                d.thresholds.divergence_bearish_floor,
            ),
            fallback_rsi_buy: threshold("fallback_rsi_buy", d.thresholds.fallback_rsi_buy),
            fallback_rsi_sell: threshold("fallback_rsi_sell", d.thresholds.fallback_rsi_sell),
        },
        volatility: VolatilityBands {
            large_price_cutoff: band("large_price_cutoff", d.volatility.large_price_cutoff),
            moderate_pct: band("moderate_pct", d.volatility.moderate_pct),
            high_pct: band("high_pct", d.volatility.high_pct),
            very_high_pct: band("very_high_pct", d.volatility.very_high_pct),
            large_moderate_pct: band("large_moderate_pct", d.volatility.large_moderate_pct),
            large_high_pct: band("large_high_pct", d.volatility.large_high_pct),
            large_very_high_pct: band("large_very_high_pct", d.volatility.large_very_high_pct),
        },
    })
}
