//! Domain error types.
//!
//! The indicator engine itself never fails; these errors come from the
//! configuration, data-source and CLI layers around it.

/// Top-level error type for fxsignal.
#[derive(Debug, thiserror::Error)]
pub enum FxSignalError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("candle data error: {reason}")]
    Data { reason: String },

    #[error("no candles for {pair}")]
    NoCandles { pair: String },

    #[error("unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("unknown timeframe: {0} (expected one of 1m, 5m, 15m, 1h, 4h)")]
    UnknownTimeframe(String),

    #[error("invalid UTC hour {0} (expected 0-23)")]
    InvalidHour(u32),

    #[error("cannot size position: {0}")]
    InvalidRiskInput(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FxSignalError {
    pub(crate) fn invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        FxSignalError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&FxSignalError> for std::process::ExitCode {
    fn from(err: &FxSignalError) -> Self {
        let code: u8 = match err {
            FxSignalError::Io(_) | FxSignalError::Json(_) => 1,
            FxSignalError::ConfigParse { .. } | FxSignalError::ConfigInvalid { .. } => 2,
            FxSignalError::Data { .. } | FxSignalError::NoCandles { .. } => 3,
            FxSignalError::UnknownStrategy(_)
            | FxSignalError::UnknownTimeframe(_)
            | FxSignalError::InvalidHour(_)
            | FxSignalError::InvalidRiskInput(_) => 4,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_invalid_message_names_section_and_key() {
        let err = FxSignalError::invalid("periods", "rsi", "must be positive");
        assert_eq!(
            err.to_string(),
            "invalid config value [periods] rsi: must be positive"
        );
    }

    #[test]
    fn unknown_timeframe_lists_choices() {
        let err = FxSignalError::UnknownTimeframe("2d".into());
        assert!(err.to_string().contains("1m, 5m, 15m, 1h, 4h"));
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: FxSignalError = io.into();
        assert!(matches!(err, FxSignalError::Io(_)));
    }
}
