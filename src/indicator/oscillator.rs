//! Bounded momentum oscillators: RSI, Stochastic, Williams %R, CCI, MFI.

use serde::Serialize;

use super::trend::sma;

/// Relative Strength Index with Wilder smoothing.
///
/// The first value seeds from the average gain/loss over the first `period`
/// deltas; subsequent averages use `avg = (avg * (period - 1) + new) /
/// period`. Output length is `len - period` (the window spans `period + 1`
/// observations).
///
/// Saturation: a window with zero average loss reads 100 (expected
/// saturation, not an error); a completely flat window reads the neutral 50.
pub fn rsi(prices: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || prices.len() < period + 1 {
        return Vec::new();
    }

    let deltas: Vec<f64> = prices.windows(2).map(|w| w[1] - w[0]).collect();

    let mut avg_gain = deltas[..period]
        .iter()
        .map(|&d| d.max(0.0))
        .sum::<f64>()
        / period as f64;
    let mut avg_loss = deltas[..period]
        .iter()
        .map(|&d| (-d).max(0.0))
        .sum::<f64>()
        / period as f64;

    let mut result = Vec::with_capacity(prices.len() - period);
    result.push(rsi_value(avg_gain, avg_loss));

    for &delta in &deltas[period..] {
        let gain = delta.max(0.0);
        let loss = (-delta).max(0.0);
        avg_gain = (avg_gain * (period as f64 - 1.0) + gain) / period as f64;
        avg_loss = (avg_loss * (period as f64 - 1.0) + loss) / period as f64;
        result.push(rsi_value(avg_gain, avg_loss));
    }

    result
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            // Flat window: neither side moved
            return 50.0;
        }
        return 100.0;
    }
    100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
}

/// Stochastic oscillator output.
///
/// `k` aligns to the `k_period` suffix of the input; `d` is the SMA of `k`
/// over `d_period` and aligns to the corresponding suffix of `k`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StochasticSeries {
    pub k: Vec<f64>,
    pub d: Vec<f64>,
}

/// Stochastic oscillator.
///
/// `%K = (close - lowest low) / (highest high - lowest low) * 100` over the
/// trailing `k_period` window; `%D = SMA(%K, d_period)`. A flat window
/// (highest high equals lowest low) reads 0.
pub fn stochastic(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    k_period: usize,
    d_period: usize,
) -> StochasticSeries {
    let n = closes.len();
    if k_period == 0 || d_period == 0 || n != highs.len() || n != lows.len() || n < k_period {
        return StochasticSeries::default();
    }

    let mut k = Vec::with_capacity(n - k_period + 1);
    for i in (k_period - 1)..n {
        let start = i + 1 - k_period;
        let highest = highs[start..=i].iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let lowest = lows[start..=i].iter().cloned().fold(f64::INFINITY, f64::min);
        let range = highest - lowest;
        k.push(if range == 0.0 {
            0.0
        } else {
            (closes[i] - lowest) / range * 100.0
        });
    }

    let d = sma(&k, d_period);
    StochasticSeries { k, d }
}

/// Williams %R.
///
/// `(highest high - close) / (highest high - lowest low) * -100` over the
/// trailing window; bounded in `[-100, 0]`. A flat window reads 0.
pub fn williams_r(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> Vec<f64> {
    let n = closes.len();
    if period == 0 || n != highs.len() || n != lows.len() || n < period {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(n - period + 1);
    for i in (period - 1)..n {
        let start = i + 1 - period;
        let highest = highs[start..=i].iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let lowest = lows[start..=i].iter().cloned().fold(f64::INFINITY, f64::min);
        let range = highest - lowest;
        result.push(if range == 0.0 {
            0.0
        } else {
            (highest - closes[i]) / range * -100.0
        });
    }
    result
}

/// Commodity Channel Index.
///
/// `(typical price - SMA(typical price)) / (0.015 * mean absolute
/// deviation)` over the trailing window. A zero deviation (constant typical
/// price) reads 0.
pub fn cci(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> Vec<f64> {
    let n = closes.len();
    if period == 0 || n != highs.len() || n != lows.len() || n < period {
        return Vec::new();
    }

    let typical: Vec<f64> = (0..n)
        .map(|i| (highs[i] + lows[i] + closes[i]) / 3.0)
        .collect();

    let mut result = Vec::with_capacity(n - period + 1);
    for window in typical.windows(period) {
        let mean = window.iter().sum::<f64>() / period as f64;
        let deviation = window.iter().map(|v| (v - mean).abs()).sum::<f64>() / period as f64;
        let last = window[period - 1];
        result.push(if deviation == 0.0 {
            0.0
        } else {
            (last - mean) / (0.015 * deviation)
        });
    }
    result
}

/// Money Flow Index.
///
/// Money flow is `typical price * volume`, signed by the direction of the
/// typical price against the prior bar (unchanged bars contribute to
/// neither side). `MFI = 100 - 100 / (1 + positive / negative)` over the
/// trailing `period` flows; output length is `len - period`.
///
/// Saturation mirrors RSI: zero negative flow reads 100, a window with no
/// flow at all reads the neutral 50.
pub fn mfi(highs: &[f64], lows: &[f64], closes: &[f64], volumes: &[f64], period: usize) -> Vec<f64> {
    let n = closes.len();
    if period == 0 || n != highs.len() || n != lows.len() || n != volumes.len() || n < period + 1 {
        return Vec::new();
    }

    let typical: Vec<f64> = (0..n)
        .map(|i| (highs[i] + lows[i] + closes[i]) / 3.0)
        .collect();

    // Signed flows, one per bar transition
    let mut positive = Vec::with_capacity(n - 1);
    let mut negative = Vec::with_capacity(n - 1);
    for i in 1..n {
        let flow = typical[i] * volumes[i];
        if typical[i] > typical[i - 1] {
            positive.push(flow);
            negative.push(0.0);
        } else if typical[i] < typical[i - 1] {
            positive.push(0.0);
            negative.push(flow);
        } else {
            positive.push(0.0);
            negative.push(0.0);
        }
    }

    let mut result = Vec::with_capacity(n - period);
    for i in (period - 1)..positive.len() {
        let start = i + 1 - period;
        let pos: f64 = positive[start..=i].iter().sum();
        let neg: f64 = negative[start..=i].iter().sum();
        result.push(if neg == 0.0 {
            if pos == 0.0 {
                50.0
            } else {
                100.0
            }
        } else {
            100.0 - 100.0 / (1.0 + pos / neg)
        });
    }
    result
}
