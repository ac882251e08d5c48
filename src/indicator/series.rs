//! Price series data objects consumed by the indicator library.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single OHLCV observation.
///
/// Sequences are ordered by strictly increasing `datetime` and treated as
/// immutable once produced by the external data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub datetime: DateTime<Utc>,
    pub open_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub close_price: f64,
    pub volume: f64,
}

impl PriceBar {
    /// Create a new PriceBar
    pub fn new(
        datetime: DateTime<Utc>,
        open_price: f64,
        high_price: f64,
        low_price: f64,
        close_price: f64,
        volume: f64,
    ) -> Self {
        Self {
            datetime,
            open_price,
            high_price,
            low_price,
            close_price,
            volume,
        }
    }

    /// Typical price (high + low + close) / 3
    pub fn typical_price(&self) -> f64 {
        (self.high_price + self.low_price + self.close_price) / 3.0
    }
}

/// Extract the open column from a bar sequence
pub fn opens(bars: &[PriceBar]) -> Vec<f64> {
    bars.iter().map(|b| b.open_price).collect()
}

/// Extract the high column from a bar sequence
pub fn highs(bars: &[PriceBar]) -> Vec<f64> {
    bars.iter().map(|b| b.high_price).collect()
}

/// Extract the low column from a bar sequence
pub fn lows(bars: &[PriceBar]) -> Vec<f64> {
    bars.iter().map(|b| b.low_price).collect()
}

/// Extract the close column from a bar sequence
pub fn closes(bars: &[PriceBar]) -> Vec<f64> {
    bars.iter().map(|b| b.close_price).collect()
}

/// Extract the volume column from a bar sequence
pub fn volumes(bars: &[PriceBar]) -> Vec<f64> {
    bars.iter().map(|b| b.volume).collect()
}
