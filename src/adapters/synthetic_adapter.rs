//! Seeded random-walk candle generator for demos and tests without market
//! data.
//!
//! Each pair starts from a typical quote and moves with a per-pair
//! volatility. The same seed and end time always reproduce the same series.

use crate::domain::candle::Candle;
use crate::domain::error::FxSignalError;
use crate::domain::timeframe::Timeframe;
use crate::ports::data_port::CandleSource;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Starting quote for the random walk.
pub fn base_price(pair: &str) -> f64 {
    match pair.to_uppercase().as_str() {
        "EUR/USD" => 1.08,
        "GBP/JPY" => 201.50,
        "AUD/USD" => 0.66,
        "USD/CAD" => 1.37,
        "USD/JPY" => 157.00,
        "USD/CHF" => 0.91,
        "NZD/USD" => 0.61,
        "BTC/USD" => 65000.0,
        _ => 1.0,
    }
}

/// Per-candle relative price swing.
pub fn pair_volatility(pair: &str) -> f64 {
    match pair.to_uppercase().as_str() {
        "EUR/USD" => 0.001,
        "GBP/JPY" => 0.005,
        "AUD/USD" => 0.002,
        "USD/CAD" => 0.0015,
        "USD/JPY" => 0.003,
        "USD/CHF" => 0.001,
        "NZD/USD" => 0.002,
        "BTC/USD" => 0.02,
        _ => 0.002,
    }
}

pub struct SyntheticCandleAdapter {
    seed: u64,
    end_time_ms: Option<i64>,
}

impl SyntheticCandleAdapter {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            end_time_ms: None,
        }
    }

    /// Pin the last candle's timestamp instead of using the current time.
    pub fn with_end_time(mut self, end_time_ms: i64) -> Self {
        self.end_time_ms = Some(end_time_ms);
        self
    }
}

impl CandleSource for SyntheticCandleAdapter {
    fn fetch_candles(
        &self,
        pair: &str,
        timeframe: Timeframe,
        count: usize,
    ) -> Result<Vec<Candle>, FxSignalError> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let vol = pair_volatility(pair);
        let interval = timeframe.interval_ms();
        let end = self
            .end_time_ms
            .unwrap_or_else(|| Utc::now().timestamp_millis());

        let mut last_close = base_price(pair);
        let mut candles = Vec::with_capacity(count);

        for i in 0..count {
            let timestamp = end - (count - 1 - i) as i64 * interval;
            let open = last_close * (1.0 + (rng.gen_range(0.0..1.0) - 0.5) * vol * 0.1);
            let high = open.max(last_close) * (1.0 + rng.gen_range(0.0..1.0) * vol);
            let low = open.min(last_close) * (1.0 - rng.gen_range(0.0..1.0) * vol);
            let close = low + rng.gen_range(0.0..1.0) * (high - low);

            candles.push(Candle {
                timestamp,
                open,
                high,
                low,
                close,
            });
            last_close = close;
        }

        debug!(pair, %timeframe, count, seed = self.seed, "generated synthetic candles");
        Ok(candles)
    }
}
