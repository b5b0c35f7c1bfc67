//! Strategy catalogue and the deterministic rules that turn an indicator
//! snapshot into a trade signal.
//!
//! Only the technical strategies have dedicated rules; every other entry in
//! the catalogue falls back to an RSI band rule.

use crate::domain::analysis_config::SignalThresholds;
use crate::domain::error::FxSignalError;
use crate::domain::indicator::Indicators;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    TrendFollowing,
    MeanReversion,
    BreakoutStrategy,
    Scalping,
    MomentumTrading,
    CciStrategy,
    MacroTrendRiding,
    EconomicDivergence,
    NewsDrivenMomentum,
    ContrarianTrading,
    StatisticalArbitrage,
    VolatilityScalping,
    AlgorithmicTrend,
    CorrelationHedge,
    RiskOnRiskOffRotation,
    CommodityCorrelation,
}

impl Strategy {
    pub const ALL: [Strategy; 16] = [
        Strategy::TrendFollowing,
        Strategy::MeanReversion,
        Strategy::BreakoutStrategy,
        Strategy::Scalping,
        Strategy::MomentumTrading,
        Strategy::CciStrategy,
        Strategy::MacroTrendRiding,
        Strategy::EconomicDivergence,
        Strategy::NewsDrivenMomentum,
        Strategy::ContrarianTrading,
        Strategy::StatisticalArbitrage,
        Strategy::VolatilityScalping,
        Strategy::AlgorithmicTrend,
        Strategy::CorrelationHedge,
        Strategy::RiskOnRiskOffRotation,
        Strategy::CommodityCorrelation,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::TrendFollowing => "Trend Following",
            Strategy::MeanReversion => "Mean Reversion",
            Strategy::BreakoutStrategy => "Breakout Strategy",
            Strategy::Scalping => "Scalping",
            Strategy::MomentumTrading => "Momentum Trading",
            Strategy::CciStrategy => "CCI Strategy",
            Strategy::MacroTrendRiding => "Macro Trend Riding",
            Strategy::EconomicDivergence => "Economic Divergence",
            Strategy::NewsDrivenMomentum => "News-Driven Momentum",
            Strategy::ContrarianTrading => "Contrarian Trading",
            Strategy::StatisticalArbitrage => "Statistical Arbitrage",
            Strategy::VolatilityScalping => "Volatility Scalping",
            Strategy::AlgorithmicTrend => "Algorithmic Trend",
            Strategy::CorrelationHedge => "Correlation Hedge",
            Strategy::RiskOnRiskOffRotation => "Risk-On/Risk-Off Rotation",
            Strategy::CommodityCorrelation => "Commodity Correlation",
        }
    }

    /// Whether this strategy has its own indicator rule rather than the RSI fallback.
    pub fn has_dedicated_rule(&self) -> bool {
        matches!(
            self,
            Strategy::TrendFollowing
                | Strategy::MeanReversion
                | Strategy::BreakoutStrategy
                | Strategy::Scalping
                | Strategy::CciStrategy
        )
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = FxSignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Strategy::ALL
            .iter()
            .copied()
            .find(|st| st.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| FxSignalError::UnknownStrategy(wanted.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TradeSignal {
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "SELL")]
    Sell,
    #[serde(rename = "NONE")]
    None,
}

impl fmt::Display for TradeSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeSignal::Buy => write!(f, "BUY"),
            TradeSignal::Sell => write!(f, "SELL"),
            TradeSignal::None => write!(f, "NONE"),
        }
    }
}

/// Apply a strategy's rule to a snapshot. The snapshot's `current_price` is
/// the close being evaluated.
pub fn evaluate(strategy: Strategy, ind: &Indicators, t: &SignalThresholds) -> TradeSignal {
    match strategy {
        Strategy::TrendFollowing => {
            if ind.current_price > ind.sma20 && ind.macd.macd > ind.macd.signal {
                TradeSignal::Buy
            } else if ind.current_price < ind.sma20 && ind.macd.macd < ind.macd.signal {
                TradeSignal::Sell
            } else {
                TradeSignal::None
            }
        }
        Strategy::MeanReversion => band_signal(ind.rsi, t.rsi_oversold, t.rsi_overbought),
        Strategy::CciStrategy => band_signal(ind.cci, t.cci_oversold, t.cci_overbought),
        Strategy::BreakoutStrategy => {
            if ind.current_price > ind.bollinger_bands.upper {
                TradeSignal::Buy
            } else if ind.current_price < ind.bollinger_bands.lower {
                TradeSignal::Sell
            } else {
                TradeSignal::None
            }
        }
        Strategy::Scalping => {
            let s = ind.stochastic;
            if s.k < t.stochastic_oversold && s.k > s.d {
                TradeSignal::Buy
            } else if s.k > t.stochastic_overbought && s.k < s.d {
                TradeSignal::Sell
            } else {
                TradeSignal::None
            }
        }
        _ => band_signal(ind.rsi, t.fallback_rsi_buy, t.fallback_rsi_sell),
    }
}

fn band_signal(value: f64, buy_below: f64, sell_above: f64) -> TradeSignal {
    if value < buy_below {
        TradeSignal::Buy
    } else if value > sell_above {
        TradeSignal::Sell
    } else {
        TradeSignal::None
    }
}
