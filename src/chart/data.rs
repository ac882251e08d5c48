//! Typed chart data model: the request shape consumed by the renderer.
//!
//! Chart type, theme and axis membership are closed enums so an invalid
//! request is rejected when it is built or validated, not deep inside a
//! drawing routine.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};

/// Supported chart types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Line,
    Bar,
    Pie,
    Candlestick,
    Area,
    Baseline,
    Histogram,
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartType::Line => write!(f, "line"),
            ChartType::Bar => write!(f, "bar"),
            ChartType::Pie => write!(f, "pie"),
            ChartType::Candlestick => write!(f, "candlestick"),
            ChartType::Area => write!(f, "area"),
            ChartType::Baseline => write!(f, "baseline"),
            ChartType::Histogram => write!(f, "histogram"),
        }
    }
}

/// Color theme for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChartTheme {
    #[default]
    Dark,
    Light,
}

/// Which Y scale a dataset or point belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisSide {
    Left,
    Right,
}

/// X-domain value of a data point.
///
/// `Timestamp` carries millisecond epoch time; `Category` values are mapped
/// to ordinal positions in first-seen order across all datasets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartX {
    Number(f64),
    Timestamp(i64),
    Category(String),
}

/// True OHLC values for a candlestick point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ohlc {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// A single data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: ChartX,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis: Option<AxisSide>,
    /// True OHLC for candlestick rendering; synthesized deterministically
    /// from `y` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ohlc: Option<Ohlc>,
    /// Directional hint used when synthesizing OHLC from a bare `y`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bullish: Option<bool>,
    /// Group index for side-by-side bars sharing one category slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<usize>,
}

impl ChartPoint {
    /// Create a new ChartPoint
    pub fn new(x: ChartX, y: f64) -> Self {
        Self {
            x,
            y,
            label: None,
            axis: None,
            ohlc: None,
            bullish: None,
            group: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_axis(mut self, axis: AxisSide) -> Self {
        self.axis = Some(axis);
        self
    }

    pub fn with_ohlc(mut self, ohlc: Ohlc) -> Self {
        self.ohlc = Some(ohlc);
        self
    }
}

/// A named series of points with per-dataset presentation options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<ChartPoint>,
    /// Overrides the chart-level type for this dataset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<ChartType>,
    /// Explicit series color; falls back to the theme palette.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub fill: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis: Option<AxisSide>,
    /// Base value for baseline charts; defaults to the first point's y.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline: Option<f64>,
}

impl ChartDataset {
    /// Create a new ChartDataset
    pub fn new(label: impl Into<String>, data: Vec<ChartPoint>) -> Self {
        Self {
            label: label.into(),
            data,
            chart_type: None,
            color: None,
            fill: false,
            axis: None,
            baseline: None,
        }
    }

    pub fn with_chart_type(mut self, chart_type: ChartType) -> Self {
        self.chart_type = Some(chart_type);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_axis(mut self, axis: AxisSide) -> Self {
        self.axis = Some(axis);
        self
    }

    /// Effective axis for a point: point tag, else dataset tag, else left.
    pub(crate) fn point_axis(&self, point: &ChartPoint) -> AxisSide {
        point.axis.or(self.axis).unwrap_or(AxisSide::Left)
    }
}

/// Chart-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub chart_type: ChartType,
    pub theme: ChartTheme,
    pub width: f64,
    pub height: f64,
    pub dual_axis: bool,
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub y_right_label: Option<String>,
    pub show_grid: bool,
    pub show_legend: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            chart_type: ChartType::Line,
            theme: ChartTheme::Dark,
            width: 800.0,
            height: 600.0,
            dual_axis: false,
            title: None,
            x_label: None,
            y_label: None,
            y_right_label: None,
            show_grid: true,
            show_legend: true,
        }
    }
}

/// The top-level value passed into the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub datasets: Vec<ChartDataset>,
    #[serde(default)]
    pub config: ChartConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

impl ChartData {
    /// Create a new ChartData
    pub fn new(datasets: Vec<ChartDataset>, config: ChartConfig) -> Self {
        Self {
            datasets,
            config,
            metadata: None,
        }
    }

    /// Single-dataset chart with the default configuration.
    pub fn with_dataset(dataset: ChartDataset) -> Self {
        Self::new(vec![dataset], ChartConfig::default())
    }

    /// Parse a serialized chart request.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the chart request.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Validate the caller contract before rendering.
    ///
    /// Dual-axis charts must tag every dataset with an axis; dimensions must
    /// be finite and positive.
    pub fn validate(&self) -> Result<()> {
        let (width, height) = (self.config.width, self.config.height);
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(ChartError::InvalidDimensions { width, height });
        }

        if self.config.dual_axis {
            for dataset in &self.datasets {
                if dataset.axis.is_none() {
                    return Err(ChartError::MissingAxisTag {
                        dataset: dataset.label.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Effective chart type for a dataset.
    pub(crate) fn dataset_type(&self, dataset: &ChartDataset) -> ChartType {
        dataset.chart_type.unwrap_or(self.config.chart_type)
    }
}
