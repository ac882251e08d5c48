//! Chart rendering engine.
//!
//! Turns a typed [`ChartData`] request into a [`VectorDocument`]: axis
//! scales are inferred from the data (one X scale, one or two independent Y
//! scales), each dataset is dispatched to a chart-type-specific drawing
//! routine, and axis/tick/legend decorations are laid out around the plot
//! area. The document serializes to SVG for an external rasterizer.
//!
//! Scales are computed fresh on every render call; nothing is cached
//! between calls and the input is never mutated.

pub mod axis;
pub mod base;
pub mod data;
pub mod document;
pub mod render;
pub mod scale;

pub use base::{palette, ThemePalette};
pub use data::{
    AxisSide, ChartConfig, ChartData, ChartDataset, ChartPoint, ChartTheme, ChartType, ChartX,
    Ohlc,
};
pub use document::{Element, Gradient, TextAnchor, VectorDocument};
pub use render::{render, render_svg};
pub use scale::{AxisScales, Scale};
