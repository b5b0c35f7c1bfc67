//! Relative strength of the two currencies in a pair, read off one indicator
//! snapshot.
//!
//! The base currency starts at 50 and moves with RSI momentum, the sign of
//! the MACD histogram and the price's side of SMA20:
//!
//! base = clamp(50 + (RSI - 50) * 0.8 ± 15 ± 10, 10, 90), quote = 100 - base

use crate::domain::indicator::Indicators;
use serde::Serialize;

pub const NEUTRAL_STRENGTH: f64 = 50.0;
pub const RSI_WEIGHT: f64 = 0.8;
pub const MACD_IMPACT: f64 = 15.0;
pub const SMA_IMPACT: f64 = 10.0;
pub const MIN_STRENGTH: f64 = 10.0;
pub const MAX_STRENGTH: f64 = 90.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyStrength {
    pub base: String,
    pub quote: String,
    pub base_strength: f64,
    pub quote_strength: f64,
}

impl CurrencyStrength {
    /// The stronger side; the quote wins a 50/50 tie.
    pub fn dominant(&self) -> &str {
        if self.base_strength > self.quote_strength {
            &self.base
        } else {
            &self.quote
        }
    }
}

/// Base-currency score in [10, 90]. A zero histogram or a price sitting on
/// SMA20 counts against the base.
pub fn base_strength(ind: &Indicators) -> f64 {
    let rsi_impact = (ind.rsi - NEUTRAL_STRENGTH) * RSI_WEIGHT;
    let macd_impact = if ind.macd.histogram > 0.0 {
        MACD_IMPACT
    } else {
        -MACD_IMPACT
    };
    let sma_impact = if ind.current_price > ind.sma20 {
        SMA_IMPACT
    } else {
        -SMA_IMPACT
    };

    (NEUTRAL_STRENGTH + rsi_impact + macd_impact + sma_impact).clamp(MIN_STRENGTH, MAX_STRENGTH)
}

pub fn currency_strength(pair: &str, ind: &Indicators) -> CurrencyStrength {
    let (base, quote) = pair.split_once('/').unwrap_or((pair, ""));
    let base_strength = base_strength(ind);

    CurrencyStrength {
        base: base.trim().to_uppercase(),
        quote: quote.trim().to_uppercase(),
        base_strength,
        quote_strength: 100.0 - base_strength,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::{
        BollingerBands, Divergence, FibonacciLevels, Macd, Stochastic,
    };
    use approx::assert_abs_diff_eq;

    fn snapshot(rsi: f64, histogram: f64, price: f64, sma20: f64) -> Indicators {
        Indicators {
            rsi,
            sma20,
            current_price: price,
            divergence: Divergence::None,
            bollinger_bands: BollingerBands::default(),
            macd: Macd {
                macd: histogram,
                signal: 0.0,
                histogram,
            },
            stochastic: Stochastic::NEUTRAL,
            atr: 0.0,
            cci: 0.0,
            fibonacci: FibonacciLevels::EMPTY,
        }
    }

    #[test]
    fn bullish_momentum_favours_base() {
        // 50 + 8 + 15 + 10
        let s = currency_strength("EUR/USD", &snapshot(60.0, 0.0002, 1.1, 1.09));
        assert_abs_diff_eq!(s.base_strength, 83.0, epsilon = 1e-9);
        assert_abs_diff_eq!(s.quote_strength, 17.0, epsilon = 1e-9);
        assert_eq!(s.base, "EUR");
        assert_eq!(s.quote, "USD");
        assert_eq!(s.dominant(), "EUR");
    }

    #[test]
    fn bearish_momentum_favours_quote() {
        // 50 - 4 - 15 - 10
        let s = currency_strength("usd/jpy", &snapshot(45.0, -0.01, 150.0, 151.0));
        assert_abs_diff_eq!(s.base_strength, 21.0, epsilon = 1e-9);
        assert_eq!(s.dominant(), "JPY");
    }

    #[test]
    fn strength_is_clamped() {
        assert_eq!(base_strength(&snapshot(100.0, 1.0, 2.0, 1.0)), MAX_STRENGTH);
        assert_eq!(base_strength(&snapshot(0.0, -1.0, 1.0, 2.0)), MIN_STRENGTH);
    }

    #[test]
    fn flat_histogram_and_price_on_sma_count_against_base() {
        // 50 + 0 - 15 - 10
        assert_abs_diff_eq!(
            base_strength(&snapshot(50.0, 0.0, 1.1, 1.1)),
            25.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn pair_without_slash_has_empty_quote() {
        let s = currency_strength("XAUUSD", &snapshot(50.0, 1.0, 1.0, 1.0));
        assert_eq!(s.base, "XAUUSD");
        assert_eq!(s.quote, "");
    }

    #[test]
    fn serializes_camel_case() {
        let s = currency_strength("GBP/USD", &snapshot(50.0, 1.0, 2.0, 1.0));
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["baseStrength"], 75.0);
        assert_eq!(json["quoteStrength"], 25.0);
    }
}
