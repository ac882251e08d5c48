//! Volume and flow indicators.

use serde::Serialize;

use super::trend::sma;

/// Volume SMA and per-bar volume ratio, suffix-aligned to the input.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VolumeSeries {
    pub sma: Vec<f64>,
    pub ratio: Vec<f64>,
}

/// Volume SMA over the trailing window plus the ratio of each bar's volume
/// to that average (0 where the average is 0).
pub fn volume_indicators(volumes: &[f64], period: usize) -> VolumeSeries {
    let averages = sma(volumes, period);
    if averages.is_empty() {
        return VolumeSeries::default();
    }

    let ratio = averages
        .iter()
        .enumerate()
        .map(|(i, &avg)| {
            if avg == 0.0 {
                0.0
            } else {
                volumes[i + period - 1] / avg
            }
        })
        .collect();

    VolumeSeries {
        sma: averages,
        ratio,
    }
}

/// On-Balance Volume.
///
/// Running sum starting at `volume[0]`: add the bar's volume when price
/// rose, subtract it when price fell, carry unchanged on flat bars. Output
/// has the full input length; empty on mismatched or empty input.
pub fn obv(prices: &[f64], volumes: &[f64]) -> Vec<f64> {
    if prices.is_empty() || prices.len() != volumes.len() {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(prices.len());
    let mut running = volumes[0];
    result.push(running);

    for i in 1..prices.len() {
        if prices[i] > prices[i - 1] {
            running += volumes[i];
        } else if prices[i] < prices[i - 1] {
            running -= volumes[i];
        }
        result.push(running);
    }
    result
}
