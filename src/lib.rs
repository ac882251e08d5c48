//! Chart Engine - technical indicator math and vector chart rendering
//!
//! This crate provides the quantitative core of a market charting stack:
//!
//! - Technical indicators with exact numerical semantics (moving averages,
//!   oscillators, bands, volume/flow, trend strength)
//! - A composite trading-signal generator
//! - A chart rendering pipeline: scale inference, coordinate transforms,
//!   per-chart-type drawing routines, axis/tick/legend layout
//! - A self-contained vector document output with SVG serialization
//!
//! Everything is pure and synchronous: each call derives its output from its
//! input alone, so calls may run concurrently without coordination. Market
//! data acquisition and PNG rasterization live outside this crate.
//!
//! # Quick Start
//!
//! ```rust
//! use chart_engine::indicator::trend;
//! use chart_engine::chart::{render, ChartData, ChartDataset, ChartPoint, ChartX};
//!
//! let prices: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
//! let sma = trend::sma(&prices, 20);
//! assert_eq!(sma.len(), 41);
//!
//! let points = prices
//!     .iter()
//!     .enumerate()
//!     .map(|(i, &p)| ChartPoint::new(ChartX::Number(i as f64), p))
//!     .collect();
//! let data = ChartData::with_dataset(ChartDataset::new("price", points));
//! let document = render(&data).unwrap();
//! let svg = document.to_svg();
//! assert!(svg.starts_with("<svg"));
//! ```

pub mod chart;
pub mod error;
pub mod indicator;

// Re-export commonly used types
pub use chart::{
    // Data model
    AxisSide, ChartConfig, ChartData, ChartDataset, ChartPoint, ChartTheme, ChartType, ChartX,
    Ohlc,
    // Scales
    AxisScales, Scale,
    // Rendering
    render, render_svg, Element, Gradient, TextAnchor, VectorDocument,
};
pub use error::{ChartError, Result};
pub use indicator::{
    series::PriceBar,
    signal::{generate_signals, generate_signals_from_bars, SignalVerdict, Verdict},
    trend::{AdxSeries, MacdSeries},
    volatility::BollingerSeries,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
