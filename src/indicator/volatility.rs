//! Volatility indicators: true range, ATR and Bollinger Bands.

use serde::Serialize;

use super::trend::ema;

/// True range series.
///
/// `max(high - low, |high - prev close|, |low - prev close|)`, starting at
/// the second bar (the first has no prior close). Output length `len - 1`.
pub fn true_range(highs: &[f64], lows: &[f64], closes: &[f64]) -> Vec<f64> {
    let n = closes.len();
    if n < 2 || n != highs.len() || n != lows.len() {
        return Vec::new();
    }

    (1..n)
        .map(|i| {
            (highs[i] - lows[i])
                .max((highs[i] - closes[i - 1]).abs())
                .max((lows[i] - closes[i - 1]).abs())
        })
        .collect()
}

/// Average True Range: EMA of the true-range series.
///
/// Output length `len - period`.
pub fn atr(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> Vec<f64> {
    ema(&true_range(highs, lows, closes), period)
}

/// Bollinger Bands output, suffix-aligned to the input.
///
/// `percent_b` may leave `[0, 1]` when price breaches a band; that is the
/// indicator working as intended.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BollingerSeries {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
    pub bandwidth: Vec<f64>,
    pub percent_b: Vec<f64>,
}

/// Bollinger Bands.
///
/// Middle band is the SMA; the band half-width is `k` population standard
/// deviations (divisor = `period`) of the trailing window. Bandwidth is
/// `(upper - lower) / middle` (0 when the middle is 0) and `%B` is
/// `(price - lower) / (upper - lower)` (0.5 when the bands collapse).
pub fn bollinger(prices: &[f64], period: usize, k: f64) -> BollingerSeries {
    if period == 0 || prices.len() < period {
        return BollingerSeries::default();
    }

    let count = prices.len() - period + 1;
    let mut series = BollingerSeries {
        upper: Vec::with_capacity(count),
        middle: Vec::with_capacity(count),
        lower: Vec::with_capacity(count),
        bandwidth: Vec::with_capacity(count),
        percent_b: Vec::with_capacity(count),
    };

    for window in prices.windows(period) {
        let mean = window.iter().sum::<f64>() / period as f64;
        let variance = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / period as f64;
        let band = k * variance.sqrt();

        let upper = mean + band;
        let lower = mean - band;
        let price = window[period - 1];

        series.upper.push(upper);
        series.middle.push(mean);
        series.lower.push(lower);
        series.bandwidth.push(if mean == 0.0 {
            0.0
        } else {
            (upper - lower) / mean
        });
        series.percent_b.push(if upper == lower {
            0.5
        } else {
            (price - lower) / (upper - lower)
        });
    }

    series
}
