//! Composite trading-signal generation.
//!
//! Combines the latest MACD, RSI, Bollinger %B and volume-ratio readings
//! into per-indicator verdicts and a majority-vote overall verdict.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::series::{self, PriceBar};
use super::trend::macd;
use super::volatility::bollinger;
use super::volume::volume_indicators;
use super::oscillator::rsi;

/// Neutral fallbacks applied when an indicator series comes back empty.
///
/// These are the only place such defaults live; consumers must not inline
/// their own.
pub mod neutral {
    /// RSI midpoint: neither overbought nor oversold.
    pub const RSI: f64 = 50.0;
    /// %B midpoint: price sitting on the middle band.
    pub const PERCENT_B: f64 = 0.5;
    /// Volume exactly at its trailing average.
    pub const VOLUME_RATIO: f64 = 1.0;
    /// Confidence reported when no signal can be derived.
    pub const CONFIDENCE: f64 = 0.0;
}

/// Minimum number of observations required before any verdict is derived.
pub const MIN_SIGNAL_BARS: usize = 50;

const RSI_OVERSOLD: f64 = 30.0;
const RSI_OVERBOUGHT: f64 = 70.0;
const PERCENT_B_LOW: f64 = 0.2;
const PERCENT_B_HIGH: f64 = 0.8;
const VOLUME_SURGE: f64 = 1.5;
const VOLUME_DRY: f64 = 0.5;

/// Direction of a trading signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Buy,
    Sell,
    #[default]
    Hold,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Buy => write!(f, "buy"),
            Verdict::Sell => write!(f, "sell"),
            Verdict::Hold => write!(f, "hold"),
        }
    }
}

/// Composite signal verdict, recomputed on demand and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalVerdict {
    pub macd: Verdict,
    pub rsi: Verdict,
    pub bollinger: Verdict,
    pub volume: Verdict,
    pub overall: Verdict,
    /// Share of the vote held by the winning side, in `[0, 100]`.
    pub confidence: f64,
}

impl SignalVerdict {
    /// All-hold verdict with zero confidence.
    pub fn hold() -> Self {
        Self {
            macd: Verdict::Hold,
            rsi: Verdict::Hold,
            bollinger: Verdict::Hold,
            volume: Verdict::Hold,
            overall: Verdict::Hold,
            confidence: neutral::CONFIDENCE,
        }
    }
}

/// Generate a composite signal from parallel price/volume/high/low columns.
///
/// Requires at least [`MIN_SIGNAL_BARS`] observations in every column (and
/// equal lengths); anything less yields the all-hold verdict. The overall
/// verdict is the majority side when it holds at least 2 of the 4 votes,
/// and confidence is that side's share of the vote.
pub fn generate_signals(
    prices: &[f64],
    volumes: &[f64],
    highs: &[f64],
    lows: &[f64],
) -> SignalVerdict {
    let n = prices.len();
    if n < MIN_SIGNAL_BARS || volumes.len() != n || highs.len() != n || lows.len() != n {
        return SignalVerdict::hold();
    }

    let macd_series = macd(prices, 12, 26, 9);
    let macd_verdict = match macd_series.latest() {
        Some((m, s, h)) if m > s && h > 0.0 => Verdict::Buy,
        Some((m, s, h)) if m < s && h < 0.0 => Verdict::Sell,
        _ => Verdict::Hold,
    };

    let rsi_latest = rsi(prices, 14).last().copied().unwrap_or(neutral::RSI);
    let rsi_verdict = if rsi_latest < RSI_OVERSOLD {
        Verdict::Buy
    } else if rsi_latest > RSI_OVERBOUGHT {
        Verdict::Sell
    } else {
        Verdict::Hold
    };

    let percent_b = bollinger(prices, 20, 2.0)
        .percent_b
        .last()
        .copied()
        .unwrap_or(neutral::PERCENT_B);
    let bollinger_verdict = if percent_b < PERCENT_B_LOW {
        Verdict::Buy
    } else if percent_b > PERCENT_B_HIGH {
        Verdict::Sell
    } else {
        Verdict::Hold
    };

    let volume_ratio = volume_indicators(volumes, 20)
        .ratio
        .last()
        .copied()
        .unwrap_or(neutral::VOLUME_RATIO);
    let volume_verdict = if volume_ratio > VOLUME_SURGE {
        Verdict::Buy
    } else if volume_ratio < VOLUME_DRY {
        Verdict::Sell
    } else {
        Verdict::Hold
    };

    let votes = [macd_verdict, rsi_verdict, bollinger_verdict, volume_verdict];
    let buy_votes = votes.iter().filter(|v| **v == Verdict::Buy).count();
    let sell_votes = votes.iter().filter(|v| **v == Verdict::Sell).count();

    let overall = if buy_votes >= 2 && buy_votes > sell_votes {
        Verdict::Buy
    } else if sell_votes >= 2 && sell_votes > buy_votes {
        Verdict::Sell
    } else {
        Verdict::Hold
    };
    let confidence = buy_votes.max(sell_votes) as f64 / votes.len() as f64 * 100.0;

    debug!(
        %overall,
        confidence,
        rsi = rsi_latest,
        percent_b,
        volume_ratio,
        "signal votes: buy={buy_votes} sell={sell_votes}"
    );

    SignalVerdict {
        macd: macd_verdict,
        rsi: rsi_verdict,
        bollinger: bollinger_verdict,
        volume: volume_verdict,
        overall,
        confidence,
    }
}

/// Convenience wrapper extracting the columns from a bar sequence.
pub fn generate_signals_from_bars(bars: &[PriceBar]) -> SignalVerdict {
    generate_signals(
        &series::closes(bars),
        &series::volumes(bars),
        &series::highs(bars),
        &series::lows(bars),
    )
}
