//! Fixed-fractional position sizing from a stop-loss distance in pips.
//!
//! risk = balance * risk% / 100
//! units = risk / (stop_loss_pips * pip_size)
//! leverage = units * price / balance

use serde::Serialize;

pub const PIP_SIZE: f64 = 0.0001;
pub const JPY_PIP_SIZE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskInputs {
    pub balance: f64,
    pub risk_pct: f64,
    pub stop_loss_pips: f64,
}

impl Default for RiskInputs {
    fn default() -> Self {
        Self {
            balance: 1000.0,
            risk_pct: 2.0,
            stop_loss_pips: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionSize {
    pub risk_amount: f64,
    pub pip_size: f64,
    pub units: f64,
    pub leverage: f64,
}

/// JPY-quoted and JPY-based pairs move in 0.01 pips.
pub fn pip_size(pair: &str) -> f64 {
    if pair.to_uppercase().contains("JPY") {
        JPY_PIP_SIZE
    } else {
        PIP_SIZE
    }
}

/// `None` unless the stop loss and balance are positive and every input is
/// finite.
pub fn position_size(pair: &str, price: f64, inputs: &RiskInputs) -> Option<PositionSize> {
    let RiskInputs {
        balance,
        risk_pct,
        stop_loss_pips,
    } = *inputs;
    let finite = [price, balance, risk_pct, stop_loss_pips]
        .iter()
        .all(|v| v.is_finite());
    if !finite || stop_loss_pips <= 0.0 || balance <= 0.0 {
        return None;
    }

    let pip = pip_size(pair);
    let risk_amount = balance * risk_pct / 100.0;
    let units = risk_amount / (stop_loss_pips * pip);

    Some(PositionSize {
        risk_amount,
        pip_size: pip,
        units,
        leverage: units * price / balance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn default_inputs_on_eur_usd() {
        let size = position_size("EUR/USD", 1.08, &RiskInputs::default()).unwrap();
        assert_abs_diff_eq!(size.risk_amount, 20.0, epsilon = 1e-9);
        // 20 / (20 * 0.0001)
        assert_abs_diff_eq!(size.units, 10_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(size.leverage, 10.8, epsilon = 1e-9);
    }

    #[test]
    fn jpy_pairs_use_larger_pip() {
        assert_eq!(pip_size("USD/JPY"), JPY_PIP_SIZE);
        assert_eq!(pip_size("gbp/jpy"), JPY_PIP_SIZE);
        assert_eq!(pip_size("EUR/USD"), PIP_SIZE);

        let size = position_size("USD/JPY", 157.0, &RiskInputs::default()).unwrap();
        // 20 / (20 * 0.01)
        assert_abs_diff_eq!(size.units, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(size.leverage, 15.7, epsilon = 1e-9);
    }

    #[test]
    fn non_positive_stop_loss_has_no_result() {
        let mut inputs = RiskInputs::default();
        inputs.stop_loss_pips = 0.0;
        assert!(position_size("EUR/USD", 1.08, &inputs).is_none());
        inputs.stop_loss_pips = -5.0;
        assert!(position_size("EUR/USD", 1.08, &inputs).is_none());
    }

    #[test]
    fn non_positive_balance_or_nan_has_no_result() {
        let inputs = RiskInputs {
            balance: 0.0,
            ..RiskInputs::default()
        };
        assert!(position_size("EUR/USD", 1.08, &inputs).is_none());

        let inputs = RiskInputs {
            risk_pct: f64::NAN,
            ..RiskInputs::default()
        };
        assert!(position_size("EUR/USD", 1.08, &inputs).is_none());
    }

    #[test]
    fn serializes_camel_case() {
        let size = position_size("EUR/USD", 1.0, &RiskInputs::default()).unwrap();
        let json = serde_json::to_value(size).unwrap();
        assert!(json.get("riskAmount").is_some());
        assert!(json.get("pipSize").is_some());
    }
}
