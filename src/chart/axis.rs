//! Axis, tick, grid, legend and title layout.

use chrono::{DateTime, Utc};

use super::base::{
    self, ThemePalette, AXIS_LABEL_SIZE, AXIS_X_HEIGHT, AXIS_Y_WIDTH, LEGEND_PADDING,
    LEGEND_ROW_HEIGHT, MARGIN, TICK_LABEL_SIZE, TITLE_HEIGHT, TITLE_SIZE,
};
use super::data::{AxisSide, ChartConfig, ChartData};
use super::document::{Element, TextAnchor, VectorDocument};
use super::scale::{Scale, Scales, XDomain};

/// The inner plot rectangle, inside the axis gutters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Transform an x-domain value into the plot rectangle.
    pub fn scale_x(&self, value: f64, x: &Scale) -> f64 {
        self.left + (value - x.min) / x.range * self.width
    }

    /// Transform a y value against one axis scale. Screen y grows downward.
    pub fn scale_y(&self, value: f64, scale: &Scale) -> f64 {
        self.top + self.height - (value - scale.min) / scale.range * self.height
    }
}

/// Compute the plot rectangle from the configured canvas and decorations.
pub(crate) fn plot_area(config: &ChartConfig) -> PlotArea {
    let top = if config.title.is_some() {
        TITLE_HEIGHT + MARGIN
    } else {
        MARGIN * 2.0
    };
    let left = AXIS_Y_WIDTH;
    let right_gutter = if config.dual_axis {
        AXIS_Y_WIDTH
    } else {
        MARGIN * 3.0
    };
    let mut bottom_gutter = AXIS_X_HEIGHT;
    if config.x_label.is_some() {
        bottom_gutter += AXIS_LABEL_SIZE + MARGIN;
    }

    PlotArea {
        left,
        top,
        width: (config.width - left - right_gutter).max(1.0),
        height: (config.height - top - bottom_gutter).max(1.0),
    }
}

pub(crate) fn draw_title(doc: &mut VectorDocument, config: &ChartConfig, palette: &ThemePalette) {
    if let Some(title) = &config.title {
        doc.add(Element::Text {
            x: config.width / 2.0,
            y: TITLE_HEIGHT - MARGIN,
            content: title.clone(),
            size: TITLE_SIZE,
            fill: palette.text.to_string(),
            anchor: TextAnchor::Middle,
            bold: true,
        });
    }
}

const Y_TICK_COUNT: usize = 5;

fn x_tick_count(area: &PlotArea) -> usize {
    ((area.width / 120.0) as usize).max(2)
}

pub(crate) fn draw_grid(
    doc: &mut VectorDocument,
    area: &PlotArea,
    scales: &Scales,
    palette: &ThemePalette,
) {
    let y = &scales.axes.y_left;
    for tick in base::calculate_axis_ticks(y.min, y.max, Y_TICK_COUNT) {
        let sy = area.scale_y(tick, y);
        doc.add(Element::Line {
            x1: area.left,
            y1: sy,
            x2: area.right(),
            y2: sy,
            stroke: palette.grid.to_string(),
            width: 1.0,
            dashed: false,
        });
    }

    let x = &scales.axes.x;
    for tick in x_tick_values(area, scales) {
        let sx = area.scale_x(tick, x);
        doc.add(Element::Line {
            x1: sx,
            y1: area.top,
            x2: sx,
            y2: area.bottom(),
            stroke: palette.grid.to_string(),
            width: 1.0,
            dashed: false,
        });
    }
}

/// Tick positions on the x axis, in domain coordinates.
fn x_tick_values(area: &PlotArea, scales: &Scales) -> Vec<f64> {
    match &scales.x_domain {
        XDomain::Category(names) => {
            let step = (names.len() / x_tick_count(area)).max(1);
            (0..names.len()).step_by(step).map(|i| i as f64).collect()
        }
        _ => base::calculate_axis_ticks(scales.axes.x.min, scales.axes.x.max, x_tick_count(area)),
    }
}

fn format_x_tick(value: f64, domain: &XDomain, now: DateTime<Utc>) -> String {
    match domain {
        XDomain::Category(names) => names
            .get(value as usize)
            .cloned()
            .unwrap_or_else(|| format!("{value:.2}")),
        XDomain::Time => base::format_axis_time(value as i64, now),
        XDomain::Numeric => format!("{value:.2}"),
    }
}

/// Draw one Y axis: the axis line, tick marks and magnitude-formatted
/// labels.
pub(crate) fn draw_y_axis(
    doc: &mut VectorDocument,
    area: &PlotArea,
    scale: &Scale,
    palette: &ThemePalette,
    side: AxisSide,
) {
    let axis_x = match side {
        AxisSide::Left => area.left,
        AxisSide::Right => area.right(),
    };
    doc.add(Element::Line {
        x1: axis_x,
        y1: area.top,
        x2: axis_x,
        y2: area.bottom(),
        stroke: palette.axis.to_string(),
        width: 1.0,
        dashed: false,
    });

    for tick in base::calculate_axis_ticks(scale.min, scale.max, Y_TICK_COUNT) {
        let sy = area.scale_y(tick, scale);
        let (tick_end, label_x, anchor) = match side {
            AxisSide::Left => (axis_x - 4.0, axis_x - 8.0, TextAnchor::End),
            AxisSide::Right => (axis_x + 4.0, axis_x + 8.0, TextAnchor::Start),
        };

        doc.add(Element::Line {
            x1: axis_x,
            y1: sy,
            x2: tick_end,
            y2: sy,
            stroke: palette.axis.to_string(),
            width: 1.0,
            dashed: false,
        });
        doc.add(Element::Text {
            x: label_x,
            y: sy + TICK_LABEL_SIZE / 3.0,
            content: base::format_value(tick),
            size: TICK_LABEL_SIZE,
            fill: palette.text.to_string(),
            anchor,
            bold: false,
        });
    }
}

/// Draw the X axis: the axis line, tick marks and domain-formatted labels.
pub(crate) fn draw_x_axis(
    doc: &mut VectorDocument,
    area: &PlotArea,
    scales: &Scales,
    palette: &ThemePalette,
    now: DateTime<Utc>,
) {
    doc.add(Element::Line {
        x1: area.left,
        y1: area.bottom(),
        x2: area.right(),
        y2: area.bottom(),
        stroke: palette.axis.to_string(),
        width: 1.0,
        dashed: false,
    });

    for tick in x_tick_values(area, scales) {
        let sx = area.scale_x(tick, &scales.axes.x);
        doc.add(Element::Line {
            x1: sx,
            y1: area.bottom(),
            x2: sx,
            y2: area.bottom() + 4.0,
            stroke: palette.axis.to_string(),
            width: 1.0,
            dashed: false,
        });
        doc.add(Element::Text {
            x: sx,
            y: area.bottom() + 6.0 + TICK_LABEL_SIZE,
            content: format_x_tick(tick, &scales.x_domain, now),
            size: TICK_LABEL_SIZE,
            fill: palette.text.to_string(),
            anchor: TextAnchor::Middle,
            bold: false,
        });
    }
}

/// Draw the optional axis captions around the plot area.
pub(crate) fn draw_axis_labels(
    doc: &mut VectorDocument,
    area: &PlotArea,
    config: &ChartConfig,
    palette: &ThemePalette,
) {
    if let Some(label) = &config.x_label {
        doc.add(Element::Text {
            x: area.left + area.width / 2.0,
            y: area.bottom() + AXIS_X_HEIGHT + AXIS_LABEL_SIZE,
            content: label.clone(),
            size: AXIS_LABEL_SIZE,
            fill: palette.text.to_string(),
            anchor: TextAnchor::Middle,
            bold: false,
        });
    }
    if let Some(label) = &config.y_label {
        doc.add(Element::Text {
            x: MARGIN,
            y: area.top - MARGIN,
            content: label.clone(),
            size: AXIS_LABEL_SIZE,
            fill: palette.text.to_string(),
            anchor: TextAnchor::Start,
            bold: false,
        });
    }
    if let Some(label) = &config.y_right_label {
        if config.dual_axis {
            doc.add(Element::Text {
                x: area.right() + AXIS_Y_WIDTH - MARGIN,
                y: area.top - MARGIN,
                content: label.clone(),
                size: AXIS_LABEL_SIZE,
                fill: palette.text.to_string(),
                anchor: TextAnchor::End,
                bold: false,
            });
        }
    }
}

/// Draw the legend: one swatch and label per dataset in a fixed top-left
/// box sized to the dataset count. Top-left keeps it clear of the right
/// Y axis in dual-axis mode.
pub(crate) fn draw_legend(
    doc: &mut VectorDocument,
    area: &PlotArea,
    data: &ChartData,
    palette: &ThemePalette,
) {
    if data.datasets.is_empty() {
        return;
    }

    let longest = data
        .datasets
        .iter()
        .map(|d| d.label.chars().count())
        .max()
        .unwrap_or(0);
    let box_width = longest as f64 * 6.6 + 30.0;
    let box_height = data.datasets.len() as f64 * LEGEND_ROW_HEIGHT + LEGEND_PADDING;
    let box_x = area.left + MARGIN;
    let box_y = area.top + MARGIN;

    doc.add(Element::Rect {
        x: box_x,
        y: box_y,
        w: box_width,
        h: box_height,
        fill: palette.background.to_string(),
        opacity: 0.8,
    });

    for (index, dataset) in data.datasets.iter().enumerate() {
        let row_y = box_y + LEGEND_PADDING / 2.0 + index as f64 * LEGEND_ROW_HEIGHT;
        doc.add(Element::Rect {
            x: box_x + 6.0,
            y: row_y + 2.0,
            w: 10.0,
            h: 10.0,
            fill: base::dataset_color(dataset, data.config.theme, index),
            opacity: 1.0,
        });
        doc.add(Element::Text {
            x: box_x + 22.0,
            y: row_y + TICK_LABEL_SIZE,
            content: dataset.label.clone(),
            size: TICK_LABEL_SIZE,
            fill: palette.text.to_string(),
            anchor: TextAnchor::Start,
            bold: false,
        });
    }
}
