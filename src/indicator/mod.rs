//! Technical indicator library.
//!
//! Pure, stateless functions over numeric slices. All functions are total:
//! inputs shorter than the required window (or with mismatched lengths)
//! return an empty series rather than failing, and division-by-zero cases
//! saturate to a documented boundary value instead of producing `NaN`.
//!
//! Output alignment contract: an indicator requiring a window of `n`
//! observations produces `len - n + 1` values (`0` when `len < n`), and the
//! value at output index `i` corresponds to input index `i + n - 1`. Callers
//! consuming an empty series apply the neutral defaults in
//! [`signal::neutral`] at their own boundary.

pub mod oscillator;
pub mod series;
pub mod signal;
pub mod trend;
pub mod volatility;
pub mod volume;

pub use oscillator::{cci, mfi, rsi, stochastic, williams_r, StochasticSeries};
pub use series::PriceBar;
pub use signal::{generate_signals, generate_signals_from_bars, SignalVerdict, Verdict};
pub use trend::{adx, ema, macd, parabolic_sar, sma, AdxSeries, MacdSeries};
pub use volatility::{atr, bollinger, true_range, BollingerSeries};
pub use volume::{obv, volume_indicators, VolumeSeries};
