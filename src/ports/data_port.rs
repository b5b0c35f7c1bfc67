//! Candle source port trait.

use crate::domain::candle::Candle;
use crate::domain::error::FxSignalError;
use crate::domain::timeframe::Timeframe;

pub trait CandleSource {
    /// Up to `count` most recent candles for `pair`, oldest first.
    fn fetch_candles(
        &self,
        pair: &str,
        timeframe: Timeframe,
        count: usize,
    ) -> Result<Vec<Candle>, FxSignalError>;
}
