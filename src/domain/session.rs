//! Forex trading sessions and their relevance to a currency pair.
//!
//! Session hours are half-open UTC ranges; none of them wraps midnight.

use crate::domain::error::FxSignalError;
use chrono::{DateTime, Timelike, Utc};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Session {
    Tokyo,
    London,
    #[serde(rename = "New York")]
    NewYork,
}

impl Session {
    pub const ALL: [Session; 3] = [Session::Tokyo, Session::London, Session::NewYork];

    /// (start, end) UTC hours, end exclusive.
    pub fn hours(&self) -> (u32, u32) {
        match self {
            Session::Tokyo => (0, 9),
            Session::London => (8, 17),
            Session::NewYork => (13, 22),
        }
    }

    pub fn is_open_at(&self, utc_hour: u32) -> bool {
        let (start, end) = self.hours();
        utc_hour >= start && utc_hour < end
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Session::Tokyo => write!(f, "Tokyo"),
            Session::London => write!(f, "London"),
            Session::NewYork => write!(f, "New York"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub name: Session,
    pub is_active: bool,
    pub is_peak: bool,
    #[serde(rename = "hoursUTC")]
    pub hours_utc: String,
}

pub fn peak_session_for_pair(pair: &str) -> Session {
    let pair = pair.to_uppercase();
    if pair.contains("JPY") {
        Session::Tokyo
    } else if ["EUR", "GBP", "CHF"].iter().any(|c| pair.contains(c)) {
        Session::London
    } else if ["USD", "CAD", "BTC"].iter().any(|c| pair.contains(c)) {
        Session::NewYork
    } else {
        Session::London
    }
}

pub fn session_states(pair: &str, utc_hour: u32) -> Result<Vec<SessionState>, FxSignalError> {
    if utc_hour > 23 {
        return Err(FxSignalError::InvalidHour(utc_hour));
    }
    let peak = peak_session_for_pair(pair);

    Ok(Session::ALL
        .iter()
        .map(|&session| {
            let (start, end) = session.hours();
            SessionState {
                name: session,
                is_active: session.is_open_at(utc_hour),
                is_peak: session == peak,
                hours_utc: format!("{:02}:00 - {:02}:00 UTC", start, end),
            }
        })
        .collect())
}

/// One-line liquidity description for the sessions open at `utc_hour`.
pub fn session_impact(pair: &str, utc_hour: u32) -> Result<String, FxSignalError> {
    let active: Vec<Session> = session_states(pair, utc_hour)?
        .into_iter()
        .filter(|s| s.is_active)
        .map(|s| s.name)
        .collect();

    if active.is_empty() {
        return Ok(
            "The market is in a quiet phase between major sessions. Expect lower liquidity."
                .to_string(),
        );
    }

    let names = active
        .iter()
        .map(Session::to_string)
        .collect::<Vec<_>>()
        .join(" and ");

    if active.len() > 1 {
        return Ok(format!(
            "High liquidity and volatility expected as the {} sessions are overlapping.",
            names
        ));
    }

    if active.contains(&peak_session_for_pair(pair)) {
        return Ok(format!(
            "The {} session is active, which is the peak time for {}, expect high volume.",
            names, pair
        ));
    }

    Ok(format!(
        "Moderate activity expected during the {} session for this pair.",
        names
    ))
}

/// UTC hour of an epoch-millisecond timestamp, e.g. a candle's.
pub fn utc_hour_of(timestamp_ms: i64) -> Option<u32> {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms).map(|dt| dt.hour())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_session_by_currency() {
        assert_eq!(peak_session_for_pair("USD/JPY"), Session::Tokyo);
        assert_eq!(peak_session_for_pair("GBP/JPY"), Session::Tokyo);
        assert_eq!(peak_session_for_pair("EUR/USD"), Session::London);
        assert_eq!(peak_session_for_pair("usd/chf"), Session::London);
        assert_eq!(peak_session_for_pair("USD/CAD"), Session::NewYork);
        assert_eq!(peak_session_for_pair("BTC/USD"), Session::NewYork);
        assert_eq!(peak_session_for_pair("XAU/XAG"), Session::London);
    }

    #[test]
    fn session_boundaries_are_half_open() {
        assert!(Session::Tokyo.is_open_at(0));
        assert!(Session::Tokyo.is_open_at(8));
        assert!(!Session::Tokyo.is_open_at(9));
        assert!(Session::NewYork.is_open_at(21));
        assert!(!Session::NewYork.is_open_at(22));
    }

    #[test]
    fn states_mark_active_and_peak() {
        let states = session_states("EUR/USD", 14).unwrap();
        assert_eq!(states.len(), 3);
        assert!(!states[0].is_active);
        assert!(states[1].is_active && states[1].is_peak);
        assert!(states[2].is_active && !states[2].is_peak);
        assert_eq!(states[2].hours_utc, "13:00 - 22:00 UTC");
    }

    #[test]
    fn invalid_hour_is_rejected() {
        assert!(matches!(
            session_states("EUR/USD", 24),
            Err(FxSignalError::InvalidHour(24))
        ));
    }

    #[test]
    fn impact_quiet_between_sessions() {
        let msg = session_impact("EUR/USD", 23).unwrap();
        assert!(msg.contains("quiet phase"));
    }

    #[test]
    fn impact_overlap() {
        let msg = session_impact("AUD/USD", 8).unwrap();
        assert!(msg.contains("Tokyo and London sessions are overlapping"));
    }

    #[test]
    fn impact_peak_single_session() {
        let msg = session_impact("USD/JPY", 3).unwrap();
        assert!(msg.contains("The Tokyo session is active"));
        assert!(msg.contains("peak time for USD/JPY"));
    }

    #[test]
    fn impact_moderate_off_peak() {
        let msg = session_impact("EUR/USD", 18).unwrap();
        assert_eq!(
            msg,
            "Moderate activity expected during the New York session for this pair."
        );
    }

    #[test]
    fn utc_hour_from_timestamp() {
        // 2024-01-15T14:30:00Z
        assert_eq!(utc_hour_of(1_705_329_000_000), Some(14));
    }
}
