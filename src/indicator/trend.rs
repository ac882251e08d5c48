//! Trend indicators: moving averages, MACD, Parabolic SAR and ADX.

use serde::Serialize;

/// Simple Moving Average.
///
/// Arithmetic mean over each trailing window of `period` values. Output
/// length is `len - period + 1`, empty when the input is shorter.
pub fn sma(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }
    values
        .windows(period)
        .map(|w| w.iter().sum::<f64>() / period as f64)
        .collect()
}

/// Exponential Moving Average.
///
/// Seeded with the SMA of the first `period` values; subsequent values use
/// multiplier `2 / (period + 1)`. Output aligns to the input suffix starting
/// at index `period - 1`.
pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }
    let multiplier = 2.0 / (period as f64 + 1.0);
    let seed = values[..period].iter().sum::<f64>() / period as f64;

    let mut result = Vec::with_capacity(values.len() - period + 1);
    result.push(seed);
    for &value in &values[period..] {
        let prev = result[result.len() - 1];
        result.push(value * multiplier + prev * (1.0 - multiplier));
    }
    result
}

/// MACD output series.
///
/// `macd` aligns to the slow-EMA suffix of the input; `signal` and
/// `histogram` align to the signal-EMA suffix of `macd`. The last element of
/// each series corresponds to the latest input bar.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MacdSeries {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

impl MacdSeries {
    /// Latest (macd, signal, histogram) triple, if the input was long enough
    /// to produce a signal line.
    pub fn latest(&self) -> Option<(f64, f64, f64)> {
        match (self.macd.last(), self.signal.last(), self.histogram.last()) {
            (Some(&m), Some(&s), Some(&h)) => Some((m, s, h)),
            _ => None,
        }
    }

    /// Bullish when the MACD line is above its signal line.
    pub fn is_bullish(&self) -> Option<bool> {
        self.latest().map(|(m, s, _)| m > s)
    }
}

/// Moving Average Convergence Divergence.
///
/// `macd = EMA(fast) - EMA(slow)`, index-aligned by offsetting the fast
/// series by `slow - fast`; `signal = EMA(macd, signal_period)`;
/// `histogram[i] = macd[i + signal_period - 1] - signal[i]`.
pub fn macd(prices: &[f64], fast: usize, slow: usize, signal_period: usize) -> MacdSeries {
    if fast == 0 || signal_period == 0 || fast >= slow || prices.len() < slow {
        return MacdSeries::default();
    }

    let fast_ema = ema(prices, fast);
    let slow_ema = ema(prices, slow);
    let offset = slow - fast;

    let macd_line: Vec<f64> = slow_ema
        .iter()
        .enumerate()
        .map(|(i, &s)| fast_ema[i + offset] - s)
        .collect();

    let signal_line = ema(&macd_line, signal_period);
    let histogram: Vec<f64> = signal_line
        .iter()
        .enumerate()
        .map(|(i, &s)| macd_line[i + signal_period - 1] - s)
        .collect();

    MacdSeries {
        macd: macd_line,
        signal: signal_line,
        histogram,
    }
}

/// Parabolic SAR (Stop and Reverse).
///
/// Long/short trend-following recursion: the SAR trails the trend, clamped
/// to the prior two extremes, and flips when price crosses it. The
/// acceleration factor resets to `acceleration` on a flip and otherwise
/// steps up to `maximum` whenever a new extreme point is set. Returns one
/// value per bar; empty below 2 bars or on mismatched inputs.
pub fn parabolic_sar(highs: &[f64], lows: &[f64], acceleration: f64, maximum: f64) -> Vec<f64> {
    if highs.len() != lows.len() || highs.len() < 2 {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(highs.len());
    let mut is_long = true;
    let mut sar = lows[0];
    let mut ep = highs[0];
    let mut af = acceleration;

    result.push(sar);

    for i in 1..highs.len() {
        let high = highs[i];
        let low = lows[i];

        sar += af * (ep - sar);

        if is_long {
            // Limit SAR to prior two lows
            sar = sar.min(lows[i - 1]);
            if i >= 2 {
                sar = sar.min(lows[i - 2]);
            }

            if low < sar {
                is_long = false;
                sar = ep;
                ep = low;
                af = acceleration;
            } else if high > ep {
                ep = high;
                af = (af + acceleration).min(maximum);
            }
        } else {
            // Limit SAR to prior two highs
            sar = sar.max(highs[i - 1]);
            if i >= 2 {
                sar = sar.max(highs[i - 2]);
            }

            if high > sar {
                is_long = true;
                sar = ep;
                ep = high;
                af = acceleration;
            } else if low < ep {
                ep = low;
                af = (af + acceleration).min(maximum);
            }
        }

        result.push(sar);
    }

    result
}

/// ADX output series.
///
/// `plus_di`/`minus_di` align to the smoothed directional-movement suffix;
/// `adx` aligns to the EMA suffix of the DX series. Each series' last value
/// corresponds to the latest input bar.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AdxSeries {
    pub adx: Vec<f64>,
    pub plus_di: Vec<f64>,
    pub minus_di: Vec<f64>,
}

/// Average Directional Index.
///
/// Directional movement uses the tie-break rule: the larger of the high/low
/// deltas wins only when positive, equal or negative deltas contribute 0.
/// DM and true range are smoothed with an EMA; `DX = |+DI - -DI| /
/// (+DI + -DI) * 100` (0 when the DI sum is 0), and `ADX = EMA(DX, period)`.
pub fn adx(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> AdxSeries {
    let n = highs.len();
    if period == 0 || n != lows.len() || n != closes.len() || n < period + 1 {
        return AdxSeries::default();
    }

    let mut plus_dm = Vec::with_capacity(n - 1);
    let mut minus_dm = Vec::with_capacity(n - 1);
    let mut tr = Vec::with_capacity(n - 1);

    for i in 1..n {
        let up = highs[i] - highs[i - 1];
        let down = lows[i - 1] - lows[i];

        plus_dm.push(if up > down && up > 0.0 { up } else { 0.0 });
        minus_dm.push(if down > up && down > 0.0 { down } else { 0.0 });

        let range = (highs[i] - lows[i])
            .max((highs[i] - closes[i - 1]).abs())
            .max((lows[i] - closes[i - 1]).abs());
        tr.push(range);
    }

    let smoothed_plus = ema(&plus_dm, period);
    let smoothed_minus = ema(&minus_dm, period);
    let smoothed_tr = ema(&tr, period);

    let mut plus_di = Vec::with_capacity(smoothed_tr.len());
    let mut minus_di = Vec::with_capacity(smoothed_tr.len());
    let mut dx = Vec::with_capacity(smoothed_tr.len());

    for i in 0..smoothed_tr.len() {
        let (pdi, mdi) = if smoothed_tr[i] != 0.0 {
            (
                100.0 * smoothed_plus[i] / smoothed_tr[i],
                100.0 * smoothed_minus[i] / smoothed_tr[i],
            )
        } else {
            (0.0, 0.0)
        };
        plus_di.push(pdi);
        minus_di.push(mdi);

        let di_sum = pdi + mdi;
        dx.push(if di_sum != 0.0 {
            100.0 * (pdi - mdi).abs() / di_sum
        } else {
            0.0
        });
    }

    AdxSeries {
        adx: ema(&dx, period),
        plus_di,
        minus_di,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sma_window_means() {
        let prices = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(sma(&prices, 3), vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_sma_insufficient_data() {
        assert!(sma(&[1.0, 2.0], 3).is_empty());
        assert!(sma(&[], 3).is_empty());
        assert!(sma(&[1.0, 2.0], 0).is_empty());
    }

    #[test]
    fn test_sma_length_contract() {
        let prices: Vec<f64> = (0..50).map(|i| i as f64).collect();
        for period in 1..=50 {
            assert_eq!(sma(&prices, period).len(), 50 - period + 1);
        }
    }

    #[test]
    fn test_ema_seed_is_sma() {
        let prices = vec![2.0, 4.0, 6.0, 8.0];
        let result = ema(&prices, 3);
        assert_eq!(result.len(), 2);
        assert_relative_eq!(result[0], 4.0);
        // multiplier = 0.5: 8 * 0.5 + 4 * 0.5
        assert_relative_eq!(result[1], 6.0);
    }

    #[test]
    fn test_ema_deterministic() {
        let prices: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64 * 0.7).sin()).collect();
        let a = ema(&prices, 12);
        let b = ema(&prices, 12);
        assert_eq!(a, b);
    }

    #[test]
    fn test_macd_histogram_alignment() {
        let prices: Vec<f64> = (0..80).map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0).collect();
        let result = macd(&prices, 12, 26, 9);

        assert_eq!(result.macd.len(), 80 - 26 + 1);
        assert_eq!(result.signal.len(), result.macd.len() - 9 + 1);
        assert_eq!(result.histogram.len(), result.signal.len());

        for i in 0..result.signal.len() {
            assert_relative_eq!(
                result.histogram[i],
                result.macd[i + 8] - result.signal[i],
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_macd_insufficient_data() {
        let prices: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let result = macd(&prices, 12, 26, 9);
        assert!(result.macd.is_empty());
        assert!(result.latest().is_none());
    }

    #[test]
    fn test_macd_bullish_in_uptrend() {
        // Accelerating rise keeps the fast EMA pulling away from the slow one
        let prices: Vec<f64> = (0..80).map(|i| 100.0 * 1.01f64.powi(i)).collect();
        let result = macd(&prices, 12, 26, 9);
        assert_eq!(result.is_bullish(), Some(true));
    }

    #[test]
    fn test_parabolic_sar_tracks_below_uptrend() {
        let highs: Vec<f64> = (0..30).map(|i| 101.0 + i as f64).collect();
        let lows: Vec<f64> = (0..30).map(|i| 99.0 + i as f64).collect();
        let result = parabolic_sar(&highs, &lows, 0.02, 0.2);

        assert_eq!(result.len(), 30);
        // A clean uptrend never flips; the SAR stays below the lows
        for i in 1..result.len() {
            assert!(result[i] < lows[i], "sar {} above low {}", result[i], lows[i]);
        }
    }

    #[test]
    fn test_parabolic_sar_flips_on_reversal() {
        let mut highs: Vec<f64> = (0..20).map(|i| 101.0 + i as f64).collect();
        let mut lows: Vec<f64> = (0..20).map(|i| 99.0 + i as f64).collect();
        // Sharp collapse below the trailing SAR
        for i in 0..10 {
            highs.push(100.0 - i as f64 * 5.0);
            lows.push(98.0 - i as f64 * 5.0);
        }
        let result = parabolic_sar(&highs, &lows, 0.02, 0.2);
        // After the flip the SAR sits above the highs
        let last = result.len() - 1;
        assert!(result[last] > highs[last]);
    }

    #[test]
    fn test_parabolic_sar_insufficient_data() {
        assert!(parabolic_sar(&[100.0], &[99.0], 0.02, 0.2).is_empty());
        assert!(parabolic_sar(&[100.0, 101.0], &[99.0], 0.02, 0.2).is_empty());
    }

    #[test]
    fn test_adx_bounds_and_lengths() {
        let n = 60;
        let highs: Vec<f64> = (0..n).map(|i| 102.0 + (i as f64 * 0.4).sin() * 3.0).collect();
        let lows: Vec<f64> = (0..n).map(|i| 98.0 + (i as f64 * 0.4).sin() * 3.0).collect();
        let closes: Vec<f64> = (0..n).map(|i| 100.0 + (i as f64 * 0.4).sin() * 3.0).collect();

        let result = adx(&highs, &lows, &closes, 14);
        assert_eq!(result.plus_di.len(), n - 14);
        assert_eq!(result.adx.len(), n - 14 - 14 + 1);

        for &v in result.adx.iter().chain(&result.plus_di).chain(&result.minus_di) {
            assert!((0.0..=100.0).contains(&v), "out of bounds: {v}");
        }
    }

    #[test]
    fn test_adx_strong_uptrend_has_plus_di_dominant() {
        let highs: Vec<f64> = (0..60).map(|i| 102.0 + i as f64 * 2.0).collect();
        let lows: Vec<f64> = (0..60).map(|i| 98.0 + i as f64 * 2.0).collect();
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64 * 2.0).collect();

        let result = adx(&highs, &lows, &closes, 14);
        let pdi = *result.plus_di.last().unwrap();
        let mdi = *result.minus_di.last().unwrap();
        assert!(pdi > mdi);
        // Sustained one-way movement drives trend strength high
        assert!(*result.adx.last().unwrap() > 50.0);
    }
}
