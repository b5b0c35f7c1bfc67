#![allow(dead_code)]

pub use fxsignal::domain::candle::Candle;
use fxsignal::domain::error::FxSignalError;
use fxsignal::domain::timeframe::Timeframe;
use fxsignal::ports::data_port::CandleSource;
use std::collections::HashMap;

pub struct MockCandleSource {
    pub data: HashMap<String, Vec<Candle>>,
    pub errors: HashMap<String, String>,
}

impl MockCandleSource {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_candles(mut self, pair: &str, candles: Vec<Candle>) -> Self {
        self.data.insert(pair.to_string(), candles);
        self
    }

    pub fn with_error(mut self, pair: &str, reason: &str) -> Self {
        self.errors.insert(pair.to_string(), reason.to_string());
        self
    }
}

impl CandleSource for MockCandleSource {
    fn fetch_candles(
        &self,
        pair: &str,
        _timeframe: Timeframe,
        count: usize,
    ) -> Result<Vec<Candle>, FxSignalError> {
        if let Some(reason) = self.errors.get(pair) {
            return Err(FxSignalError::Data {
                reason: reason.clone(),
            });
        }
        let all = self.data.get(pair).cloned().unwrap_or_default();
        let skip = all.len().saturating_sub(count);
        Ok(all.into_iter().skip(skip).collect())
    }
}

pub fn make_candle(index: usize, open: f64, high: f64, low: f64, close: f64) -> Candle {
    Candle {
        timestamp: 1_705_276_800_000 + index as i64 * 3_600_000,
        open,
        high,
        low,
        close,
    }
}

/// Candles with open == close and a fixed half-spread around the close.
pub fn candles_from_closes(closes: &[f64], half_spread: f64) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| make_candle(i, c, c + half_spread, c - half_spread, c))
        .collect()
}

pub fn flat_candles(n: usize, price: f64) -> Vec<Candle> {
    (0..n).map(|i| make_candle(i, price, price, price, price)).collect()
}

/// 40 closes: a choppy climb, a sharp drop to a low at index 25 (RSI about
/// 19), a bounce, then a slow grind to a lower close at 86.0 with RSI about
/// 30. Price undercuts the prior low while RSI holds above it.
pub fn bullish_divergence_closes() -> Vec<f64> {
    let mut closes = Vec::with_capacity(40);
    let mut x = 100.0;
    for i in 0..20 {
        x += if i % 2 == 0 { 1.0 } else { -0.5 };
        closes.push(x);
    }
    for _ in 0..6 {
        x -= 3.0;
        closes.push(x);
    }
    for _ in 0..5 {
        x += 2.5;
        closes.push(x);
    }
    for _ in 0..9 {
        x -= 1.5;
        closes.push(x);
    }
    closes
}

/// Mirror image of [`bullish_divergence_closes`] around 100.
pub fn bearish_divergence_closes() -> Vec<f64> {
    bullish_divergence_closes()
        .into_iter()
        .map(|c| 200.0 - c)
        .collect()
}

/// 41 candles rising from 1.000 to 1.100 in 0.0025 steps, then 19 flat at 1.100.
pub fn rise_then_flat() -> Vec<Candle> {
    let mut closes: Vec<f64> = (0..41).map(|i| 1.0 + i as f64 * 0.0025).collect();
    closes.extend(std::iter::repeat_n(1.1, 19));
    candles_from_closes(&closes, 0.0)
}
