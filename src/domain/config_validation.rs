//! Configuration validation.
//!
//! Checks every analysis key before [`crate::domain::analysis_config`] reads
//! it, so a bad INI file fails with a named section/key instead of producing
//! nonsense indicator values.

use crate::domain::analysis_config::AnalysisConfig;
use crate::domain::error::FxSignalError;
use crate::ports::config_port::ConfigPort;

const PERIOD_KEYS: [&str; 14] = [
    "rsi",
    "sma",
    "bollinger",
    "macd_fast",
    "macd_slow",
    "macd_signal",
    "stochastic",
    "stochastic_k_smooth",
    "stochastic_d_smooth",
    "cci",
    "atr",
    "fib_lookback",
    "fib_min_candles",
    "divergence_window",
];

const NUMBER_KEYS: [(&str, &str); 18] = [
    ("periods", "bollinger_multiplier"),
    ("thresholds", "rsi_overbought"),
    ("thresholds", "rsi_oversold"),
    ("thresholds", "cci_overbought"),
    ("thresholds", "cci_oversold"),
    ("thresholds", "stochastic_overbought"),
    ("thresholds", "stochastic_oversold"),
    ("thresholds", "divergence_bullish_floor"),
    ("thresholds", "divergence_bearish_floor"),
    ("thresholds", "fallback_rsi_buy"),
    ("thresholds", "fallback_rsi_sell"),
    ("volatility", "large_price_cutoff"),
    ("volatility", "moderate_pct"),
    ("volatility", "high_pct"),
    ("volatility", "very_high_pct"),
    ("volatility", "large_moderate_pct"),
    ("volatility", "large_high_pct"),
    ("volatility", "large_very_high_pct"),
];

pub fn validate_analysis_config(config: &dyn ConfigPort) -> Result<(), FxSignalError> {
    let defaults = AnalysisConfig::default();
    validate_number_syntax(config)?;
    validate_periods(config)?;
    validate_bollinger_multiplier(config, defaults.periods.bollinger_multiplier)?;
    validate_macd_ordering(config, &defaults)?;
    validate_thresholds(config, &defaults)?;
    validate_volatility_bands(config, &defaults)?;
    Ok(())
}

/// The typed getters fall back to the default on a parse failure, so any key
/// that is present must parse here first.
fn validate_number_syntax(config: &dyn ConfigPort) -> Result<(), FxSignalError> {
    for key in PERIOD_KEYS {
        if let Some(raw) = config.get_string("periods", key) {
            parse_int(&raw, "periods", key)?;
        }
    }
    for (section, key) in NUMBER_KEYS {
        if let Some(raw) = config.get_string(section, key) {
            parse_number(&raw, section, key)?;
        }
    }
    Ok(())
}

fn parse_int(raw: &str, section: &str, key: &str) -> Result<i64, FxSignalError> {
    raw.trim().parse::<i64>().map_err(|_| {
        FxSignalError::invalid(
            section,
            key,
            format!("{} must be an integer, got '{}'", key, raw),
        )
    })
}

fn parse_number(raw: &str, section: &str, key: &str) -> Result<f64, FxSignalError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(FxSignalError::invalid(
            section,
            key,
            format!("{} must be a finite number, got '{}'", key, raw),
        )),
    }
}

fn validate_periods(config: &dyn ConfigPort) -> Result<(), FxSignalError> {
    for key in PERIOD_KEYS {
        // Absent keys read back as 1, which always passes.
        let value = config.get_int("periods", key, 1);
        if value <= 0 {
            return Err(FxSignalError::invalid(
                "periods",
                key,
                format!("{} must be a positive integer, got {}", key, value),
            ));
        }
    }
    Ok(())
}

fn validate_bollinger_multiplier(config: &dyn ConfigPort, default: f64) -> Result<(), FxSignalError> {
    let value = config.get_double("periods", "bollinger_multiplier", default);
    if !value.is_finite() || value <= 0.0 {
        return Err(FxSignalError::invalid(
            "periods",
            "bollinger_multiplier",
            "bollinger_multiplier must be positive",
        ));
    }
    Ok(())
}

fn validate_macd_ordering(
    config: &dyn ConfigPort,
    defaults: &AnalysisConfig,
) -> Result<(), FxSignalError> {
    let fast = config.get_int("periods", "macd_fast", defaults.periods.macd_fast as i64);
    let slow = config.get_int("periods", "macd_slow", defaults.periods.macd_slow as i64);
    if fast >= slow {
        return Err(FxSignalError::invalid(
            "periods",
            "macd_fast",
            format!("macd_fast ({}) must be shorter than macd_slow ({})", fast, slow),
        ));
    }
    Ok(())
}

/// Each pair is (low key, high key); the low bound must sit strictly below
/// the high one.
fn validate_thresholds(
    config: &dyn ConfigPort,
    defaults: &AnalysisConfig,
) -> Result<(), FxSignalError> {
    let t = &defaults.thresholds;
    let pairs = [
        ("rsi_oversold", t.rsi_oversold, "rsi_overbought", t.rsi_overbought),
        ("cci_oversold", t.cci_oversold, "cci_overbought", t.cci_overbought),
        (
            "stochastic_oversold",
            t.stochastic_oversold,
            "stochastic_overbought",
            t.stochastic_overbought,
        ),
        (
            "fallback_rsi_buy",
            t.fallback_rsi_buy,
            "fallback_rsi_sell",
            t.fallback_rsi_sell,
        ),
    ];

    for (low_key, low_default, high_key, high_default) in pairs {
        let low = config.get_double("thresholds", low_key, low_default);
        let high = config.get_double("thresholds", high_key, high_default);
        if !low.is_finite() || !high.is_finite() || low >= high {
            return Err(FxSignalError::invalid(
                "thresholds",
                low_key,
                format!("{} ({}) must be below {} ({})", low_key, low, high_key, high),
            ));
        }
    }

    for (key, default) in [
        ("divergence_bullish_floor", t.divergence_bullish_floor),
        ("divergence_bearish_floor", t.divergence_bearish_floor),
    ] {
        let value = config.get_double("thresholds", key, default);
        if !(0.0..=100.0).contains(&value) {
            return Err(FxSignalError::invalid(
                "thresholds",
                key,
                format!("{} must be between 0 and 100", key),
            ));
        }
    }
    Ok(())
}

fn validate_volatility_bands(
    config: &dyn ConfigPort,
    defaults: &AnalysisConfig,
) -> Result<(), FxSignalError> {
    let v = &defaults.volatility;
    let cutoff = config.get_double("volatility", "large_price_cutoff", v.large_price_cutoff);
    if !cutoff.is_finite() || cutoff <= 0.0 {
        return Err(FxSignalError::invalid(
            "volatility",
            "large_price_cutoff",
            "large_price_cutoff must be positive",
        ));
    }

    let tables = [
        [
            ("moderate_pct", v.moderate_pct),
            ("high_pct", v.high_pct),
            ("very_high_pct", v.very_high_pct),
        ],
        [
            ("large_moderate_pct", v.large_moderate_pct),
            ("large_high_pct", v.large_high_pct),
            ("large_very_high_pct", v.large_very_high_pct),
        ],
    ];

    for table in tables {
        let mut previous = 0.0;
        for (key, default) in table {
            let value = config.get_double("volatility", key, default);
            if !value.is_finite() || value <= previous {
                return Err(FxSignalError::invalid(
                    "volatility",
                    key,
                    format!("{} must be positive and above the previous step", key),
                ));
            }
            previous = value;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    fn check(content: &str) -> Result<(), FxSignalError> {
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        validate_analysis_config(&adapter)
    }

    fn assert_invalid_key(result: Result<(), FxSignalError>, expected_key: &str) {
        match result {
            Err(FxSignalError::ConfigInvalid { key, .. }) => assert_eq!(key, expected_key),
            other => panic!("expected ConfigInvalid for {}, got {:?}", expected_key, other),
        }
    }

    #[test]
    fn empty_config_is_valid() {
        assert!(check("").is_ok());
    }

    #[test]
    fn full_valid_config() {
        let content = r#"
[periods]
rsi = 9
sma = 50
bollinger_multiplier = 2.5
macd_fast = 5
macd_slow = 35
macd_signal = 5

[thresholds]
rsi_oversold = 25
rsi_overbought = 75
divergence_bullish_floor = 35

[volatility]
moderate_pct = 0.4
high_pct = 0.9
very_high_pct = 1.8
"#;
        assert!(check(content).is_ok());
    }

    #[test]
    fn zero_period_rejected() {
        assert_invalid_key(check("[periods]\natr = 0\n"), "atr");
    }

    #[test]
    fn negative_period_rejected() {
        assert_invalid_key(check("[periods]\ndivergence_window = -3\n"), "divergence_window");
    }

    #[test]
    fn non_positive_multiplier_rejected() {
        assert_invalid_key(
            check("[periods]\nbollinger_multiplier = 0\n"),
            "bollinger_multiplier",
        );
    }

    #[test]
    fn macd_fast_not_shorter_than_slow_rejected() {
        assert_invalid_key(check("[periods]\nmacd_fast = 26\n"), "macd_fast");
        assert_invalid_key(
            check("[periods]\nmacd_fast = 30\nmacd_slow = 20\n"),
            "macd_fast",
        );
    }

    #[test]
    fn inverted_rsi_bounds_rejected() {
        assert_invalid_key(
            check("[thresholds]\nrsi_oversold = 70\nrsi_overbought = 30\n"),
            "rsi_oversold",
        );
    }

    #[test]
    fn inverted_fallback_bounds_rejected() {
        assert_invalid_key(
            check("[thresholds]\nfallback_rsi_buy = 65\n"),
            "fallback_rsi_buy",
        );
    }

    #[test]
    fn divergence_floor_out_of_range_rejected() {
        assert_invalid_key(
            check("[thresholds]\ndivergence_bearish_floor = 120\n"),
            "divergence_bearish_floor",
        );
    }

    #[test]
    fn non_ascending_bands_rejected() {
        assert_invalid_key(check("[volatility]\nhigh_pct = 0.5\n"), "high_pct");
        assert_invalid_key(
            check("[volatility]\nlarge_very_high_pct = 2\n"),
            "large_very_high_pct",
        );
    }

    #[test]
    fn non_numeric_period_rejected() {
        assert_invalid_key(check("[periods]\nrsi = fast\n"), "rsi");
    }

    #[test]
    fn fractional_period_rejected() {
        assert_invalid_key(check("[periods]\nsma = 7.5\n"), "sma");
    }

    #[test]
    fn non_numeric_threshold_rejected() {
        assert_invalid_key(check("[thresholds]\nrsi_oversold = low\n"), "rsi_oversold");
        assert_invalid_key(check("[volatility]\nhigh_pct = lots\n"), "high_pct");
    }

    #[test]
    fn nan_threshold_rejected() {
        assert_invalid_key(check("[thresholds]\nrsi_oversold = nan\n"), "rsi_oversold");
        assert_invalid_key(
            check("[thresholds]\ncci_overbought = inf\n"),
            "cci_overbought",
        );
    }

    #[test]
    fn padded_numbers_accepted() {
        assert!(check("[periods]\nrsi =  9 \n[thresholds]\nrsi_oversold = 25.5\n").is_ok());
    }

    #[test]
    fn non_positive_cutoff_rejected() {
        assert_invalid_key(
            check("[volatility]\nlarge_price_cutoff = 0\n"),
            "large_price_cutoff",
        );
    }
}
