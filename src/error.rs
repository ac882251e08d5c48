//! Crate-level error types.
//!
//! [`ChartError`] covers the small set of caller contract violations the
//! rendering layer can hit. Indicator math never errors: insufficient input
//! degrades to an empty series and division-by-zero cases saturate to a
//! documented boundary value, so the whole indicator surface stays total.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ChartError>;

/// Top-level error type returned by the rendering APIs.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    /// A dual-axis chart contains a dataset without an explicit axis tag.
    /// Every dataset must say which Y scale it belongs to; silently
    /// defaulting to the left axis would misplace data.
    #[error("dataset `{dataset}` has no axis tag but the chart is dual-axis")]
    MissingAxisTag { dataset: String },

    /// The configured canvas size is non-finite or non-positive.
    #[error("invalid chart dimensions {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },

    /// A chart request could not be (de)serialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
