//! Per-chart-type drawing routines and the top-level render entry point.

use std::f64::consts::{PI, TAU};

use chrono::Utc;
use tracing::debug;

use super::axis::{self, PlotArea};
use super::base::{self, ThemePalette, BAR_WIDTH, LABEL_MIN_MAGNITUDE, TICK_LABEL_SIZE};
use super::data::{AxisSide, ChartData, ChartDataset, ChartPoint, ChartType, Ohlc};
use super::document::{Element, Gradient, TextAnchor, VectorDocument};
use super::scale::{compute_scales, Scale, Scales};
use crate::error::Result;

/// Render a chart request into a vector document.
///
/// Validates the caller contract, infers fresh axis scales, draws each
/// dataset with its chart-type-specific routine and lays the axis/legend
/// chrome around the plot. The input is never mutated.
pub fn render(data: &ChartData) -> Result<VectorDocument> {
    data.validate()?;

    let palette = base::palette(data.config.theme);
    let scales = compute_scales(data);
    let area = axis::plot_area(&data.config);
    let now = Utc::now();

    debug!(
        datasets = data.datasets.len(),
        chart_type = %data.config.chart_type,
        dual_axis = data.config.dual_axis,
        "rendering chart"
    );

    let mut doc = VectorDocument::new(data.config.width, data.config.height, palette.background);
    let ctx = DrawContext {
        area: &area,
        scales: &scales,
        dual_axis: data.config.dual_axis,
        palette,
    };

    axis::draw_title(&mut doc, &data.config, palette);
    if data.config.show_grid {
        axis::draw_grid(&mut doc, &area, &scales, palette);
    }

    for (index, dataset) in data.datasets.iter().enumerate() {
        let color = base::dataset_color(dataset, data.config.theme, index);
        match data.dataset_type(dataset) {
            ChartType::Line => draw_line(&mut doc, &ctx, dataset, &color),
            ChartType::Bar => draw_bar(&mut doc, &ctx, dataset, &color),
            ChartType::Pie => draw_pie(&mut doc, &ctx, dataset, data),
            ChartType::Candlestick => draw_candlestick(&mut doc, &ctx, dataset),
            ChartType::Area => draw_area(&mut doc, &ctx, dataset, &color),
            ChartType::Baseline => draw_baseline(&mut doc, &ctx, dataset, &color, index),
            ChartType::Histogram => draw_histogram(&mut doc, &ctx, dataset),
        }
    }

    axis::draw_x_axis(&mut doc, &area, &scales, palette, now);
    axis::draw_y_axis(&mut doc, &area, &scales.axes.y_left, palette, AxisSide::Left);
    if let Some(right) = scales.axes.y_right {
        axis::draw_y_axis(&mut doc, &area, &right, palette, AxisSide::Right);
    }
    axis::draw_axis_labels(&mut doc, &area, &data.config, palette);
    if data.config.show_legend {
        axis::draw_legend(&mut doc, &area, data, palette);
    }

    Ok(doc)
}

/// Render a chart request straight to SVG text.
pub fn render_svg(data: &ChartData) -> Result<String> {
    Ok(render(data)?.to_svg())
}

/// Shared transform state for the drawing routines.
struct DrawContext<'a> {
    area: &'a PlotArea,
    scales: &'a Scales,
    dual_axis: bool,
    palette: &'a ThemePalette,
}

impl DrawContext<'_> {
    fn sx(&self, point: &ChartPoint) -> f64 {
        self.area
            .scale_x(self.scales.x_value(&point.x), &self.scales.axes.x)
    }

    /// The Y scale a point resolves against. Only dual-axis charts have a
    /// right scale to pick.
    fn y_scale(&self, dataset: &ChartDataset, point: &ChartPoint) -> &Scale {
        if self.dual_axis && dataset.point_axis(point) == AxisSide::Right {
            if let Some(right) = &self.scales.axes.y_right {
                return right;
            }
        }
        &self.scales.axes.y_left
    }

    fn sy(&self, dataset: &ChartDataset, point: &ChartPoint, value: f64) -> f64 {
        self.area.scale_y(value, self.y_scale(dataset, point))
    }

    /// Horizontal slot width when each point owns an equal share of the
    /// plot.
    fn slot_width(&self, count: usize) -> f64 {
        self.area.width / count.max(1) as f64
    }
}

fn draw_line(doc: &mut VectorDocument, ctx: &DrawContext, dataset: &ChartDataset, color: &str) {
    if dataset.data.len() < 2 {
        return;
    }

    let points: Vec<(f64, f64)> = dataset
        .data
        .iter()
        .map(|p| (ctx.sx(p), ctx.sy(dataset, p, p.y)))
        .collect();

    doc.add(Element::Polyline {
        points: points.clone(),
        stroke: color.to_string(),
        width: 2.0,
    });
    for (x, y) in points {
        doc.add(Element::Circle {
            cx: x,
            cy: y,
            r: 3.0,
            fill: color.to_string(),
        });
    }
}

fn draw_bar(doc: &mut VectorDocument, ctx: &DrawContext, dataset: &ChartDataset, color: &str) {
    if dataset.data.is_empty() {
        return;
    }

    let slot = ctx.slot_width(dataset.data.len());
    let group_count = dataset
        .data
        .iter()
        .filter_map(|p| p.group)
        .max()
        .map(|g| g + 1)
        .unwrap_or(1);
    let bar_width = (slot * BAR_WIDTH * 2.0 / group_count as f64).max(1.0);

    for point in &dataset.data {
        let center = ctx.sx(point);
        let group = point.group.unwrap_or(0) as f64;
        // Side-by-side groups share the slot, centered on the x position
        let x = center + (group - (group_count as f64 - 1.0) / 2.0) * bar_width - bar_width / 2.0;

        let top = ctx.sy(dataset, point, point.y);
        let bottom = ctx.area.bottom();
        let fill = if point.y >= 0.0 {
            color.to_string()
        } else {
            ctx.palette.down.to_string()
        };

        doc.add(Element::Rect {
            x,
            y: top.min(bottom),
            w: bar_width,
            h: (bottom - top).abs().max(1.0),
            fill,
            opacity: 1.0,
        });

        if point.y.abs() >= LABEL_MIN_MAGNITUDE {
            let content = point
                .label
                .clone()
                .unwrap_or_else(|| base::format_value(point.y));
            doc.add(Element::Text {
                x: center,
                y: top - 4.0,
                content,
                size: TICK_LABEL_SIZE,
                fill: ctx.palette.text.to_string(),
                anchor: TextAnchor::Middle,
                bold: false,
            });
        }
    }
}

/// Start angle and sweep per slice for the positive values in a series,
/// accumulated from 12 o'clock.
pub(crate) fn pie_angles(values: &[f64]) -> Vec<(f64, f64)> {
    let total: f64 = values.iter().filter(|v| **v > 0.0).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut angles = Vec::with_capacity(values.len());
    let mut start = -PI / 2.0;
    for &value in values {
        if value <= 0.0 {
            continue;
        }
        let sweep = value / total * TAU;
        angles.push((start, sweep));
        start += sweep;
    }
    angles
}

fn draw_pie(doc: &mut VectorDocument, ctx: &DrawContext, dataset: &ChartDataset, data: &ChartData) {
    let values: Vec<f64> = dataset.data.iter().map(|p| p.y).collect();
    let angles = pie_angles(&values);
    if angles.is_empty() {
        return;
    }

    let cx = ctx.area.left + ctx.area.width / 2.0;
    let cy = ctx.area.top + ctx.area.height / 2.0;
    let radius = ctx.area.width.min(ctx.area.height) * 0.4;

    let positive: Vec<&ChartPoint> = dataset.data.iter().filter(|p| p.y > 0.0).collect();
    for (slice_index, (point, &(start, sweep))) in positive.iter().zip(&angles).enumerate() {
        let fill = base::series_color(data.config.theme, slice_index).to_string();

        if sweep >= TAU - 1e-9 {
            // A single slice is a full disc; an arc path would collapse
            doc.add(Element::Circle {
                cx,
                cy,
                r: radius,
                fill,
            });
        } else {
            let end = start + sweep;
            let (x1, y1) = (cx + radius * start.cos(), cy + radius * start.sin());
            let (x2, y2) = (cx + radius * end.cos(), cy + radius * end.sin());
            let large_arc = if sweep > PI { 1 } else { 0 };

            let d = format!(
                "M {cx:.2} {cy:.2} L {x1:.2} {y1:.2} \
                 A {radius:.2} {radius:.2} 0 {large_arc} 1 {x2:.2} {y2:.2} Z"
            );
            doc.add(Element::Path {
                d,
                fill: Some(fill),
                stroke: Some(ctx.palette.background.to_string()),
                width: 1.0,
                opacity: 1.0,
            });
        }

        if let Some(label) = &point.label {
            let mid = start + sweep / 2.0;
            doc.add(Element::Text {
                x: cx + radius * 0.7 * mid.cos(),
                y: cy + radius * 0.7 * mid.sin(),
                content: label.clone(),
                size: TICK_LABEL_SIZE,
                fill: ctx.palette.text.to_string(),
                anchor: TextAnchor::Middle,
                bold: false,
            });
        }
    }
}

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

fn fnv1a(bytes: impl IntoIterator<Item = u8>) -> u64 {
    let mut hash = FNV_OFFSET;
    for byte in bytes {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Deterministically derive an OHLC quad from a bare y value.
///
/// Offsets are fixed fractions of the value's magnitude, keyed by a hash of
/// the point's x identity and index, with direction taken from the point's
/// `bullish` hint. The same point always yields the same quad.
pub(crate) fn synth_ohlc(point: &ChartPoint, x_value: f64, index: usize) -> Ohlc {
    let hash = fnv1a(
        x_value
            .to_bits()
            .to_le_bytes()
            .into_iter()
            .chain((index as u64).to_le_bytes()),
    );

    let body_fraction = 0.004 + (hash & 0x3ff) as f64 / 1023.0 * 0.008;
    let wick_fraction = 0.002 + ((hash >> 10) & 0x3ff) as f64 / 1023.0 * 0.006;
    let magnitude = point.y.abs().max(f64::MIN_POSITIVE);

    let close = point.y;
    let open = if point.bullish.unwrap_or(true) {
        close - body_fraction * magnitude
    } else {
        close + body_fraction * magnitude
    };

    Ohlc {
        open,
        high: open.max(close) + wick_fraction * magnitude,
        low: open.min(close) - wick_fraction * magnitude,
        close,
    }
}

fn draw_candlestick(doc: &mut VectorDocument, ctx: &DrawContext, dataset: &ChartDataset) {
    if dataset.data.is_empty() {
        return;
    }

    let slot = ctx.slot_width(dataset.data.len());
    let half_body = (slot * BAR_WIDTH).max(0.5);

    for (index, point) in dataset.data.iter().enumerate() {
        let ohlc = point
            .ohlc
            .unwrap_or_else(|| synth_ohlc(point, ctx.scales.x_value(&point.x), index));

        let up = ohlc.close >= ohlc.open;
        let color = if up { ctx.palette.up } else { ctx.palette.down };
        let x = ctx.sx(point);

        // Wick spans high to low
        doc.add(Element::Line {
            x1: x,
            y1: ctx.sy(dataset, point, ohlc.high),
            x2: x,
            y2: ctx.sy(dataset, point, ohlc.low),
            stroke: color.to_string(),
            width: 1.0,
            dashed: false,
        });

        // Body spans open to close
        let body_top = ctx.sy(dataset, point, ohlc.open.max(ohlc.close));
        let body_bottom = ctx.sy(dataset, point, ohlc.open.min(ohlc.close));
        doc.add(Element::Rect {
            x: x - half_body,
            y: body_top,
            w: half_body * 2.0,
            h: (body_bottom - body_top).max(1.0),
            fill: color.to_string(),
            opacity: 1.0,
        });
    }
}

fn draw_area(doc: &mut VectorDocument, ctx: &DrawContext, dataset: &ChartDataset, color: &str) {
    if dataset.data.len() < 2 {
        return;
    }

    let points: Vec<(f64, f64)> = dataset
        .data
        .iter()
        .map(|p| (ctx.sx(p), ctx.sy(dataset, p, p.y)))
        .collect();

    let bottom = ctx.area.bottom();
    let mut d = format!("M {:.2} {:.2}", points[0].0, bottom);
    for (x, y) in &points {
        d.push_str(&format!(" L {x:.2} {y:.2}"));
    }
    d.push_str(&format!(" L {:.2} {:.2} Z", points[points.len() - 1].0, bottom));

    doc.add(Element::Path {
        d,
        fill: Some(color.to_string()),
        stroke: None,
        width: 0.0,
        opacity: 0.3,
    });
    doc.add(Element::Polyline {
        points,
        stroke: color.to_string(),
        width: 2.0,
    });
}

/// Insert exact base-value crossings between consecutive points so the
/// above/below regions split at the true intersection, not at a sample.
pub(crate) fn insert_crossings(points: &[(f64, f64)], base: f64) -> Vec<(f64, f64)> {
    let mut result = Vec::with_capacity(points.len());
    for (i, &(x, y)) in points.iter().enumerate() {
        if i > 0 {
            let (px, py) = points[i - 1];
            if (py - base).signum() * (y - base).signum() < 0.0 {
                let t = (base - py) / (y - py);
                result.push((px + t * (x - px), base));
            }
        }
        result.push((x, y));
    }
    result
}

fn draw_baseline(
    doc: &mut VectorDocument,
    ctx: &DrawContext,
    dataset: &ChartDataset,
    color: &str,
    index: usize,
) {
    if dataset.data.len() < 2 {
        return;
    }

    let base = dataset
        .baseline
        .unwrap_or_else(|| dataset.data[0].y);

    // Work in domain space so crossings are exact, then project
    let domain: Vec<(f64, f64)> = dataset
        .data
        .iter()
        .map(|p| (ctx.scales.x_value(&p.x), p.y))
        .collect();
    let augmented = insert_crossings(&domain, base);

    let first = &dataset.data[0];
    let y_scale = *ctx.y_scale(dataset, first);
    let project = |&(x, y): &(f64, f64)| -> (f64, f64) {
        (
            ctx.area.scale_x(x, &ctx.scales.axes.x),
            ctx.area.scale_y(y, &y_scale),
        )
    };
    let base_y = ctx.area.scale_y(base, &y_scale);

    let above_fill = doc.add_gradient(Gradient {
        id: format!("baseline-above-{index}"),
        from: ctx.palette.up.to_string(),
        to: ctx.palette.up.to_string(),
        from_opacity: 0.35,
        to_opacity: 0.0,
    });
    let below_fill = doc.add_gradient(Gradient {
        id: format!("baseline-below-{index}"),
        from: ctx.palette.down.to_string(),
        to: ctx.palette.down.to_string(),
        from_opacity: 0.0,
        to_opacity: 0.35,
    });

    // Region between the clamped series and the base line, one side at a
    // time. With crossings inserted the clamped polyline is exact.
    for (fill, clamp_above) in [(above_fill, true), (below_fill, false)] {
        let clamped: Vec<(f64, f64)> = augmented
            .iter()
            .map(|&(x, y)| {
                let y = if clamp_above { y.max(base) } else { y.min(base) };
                project(&(x, y))
            })
            .collect();

        let mut d = format!("M {:.2} {:.2}", clamped[0].0, base_y);
        for (x, y) in &clamped {
            d.push_str(&format!(" L {x:.2} {y:.2}"));
        }
        d.push_str(&format!(
            " L {:.2} {:.2} Z",
            clamped[clamped.len() - 1].0,
            base_y
        ));
        doc.add(Element::Path {
            d,
            fill: Some(fill),
            stroke: None,
            width: 0.0,
            opacity: 1.0,
        });
    }

    // Reference line at the base value
    doc.add(Element::Line {
        x1: ctx.area.left,
        y1: base_y,
        x2: ctx.area.right(),
        y2: base_y,
        stroke: ctx.palette.axis.to_string(),
        width: 1.0,
        dashed: true,
    });

    doc.add(Element::Polyline {
        points: augmented.iter().map(|p| project(p)).collect(),
        stroke: color.to_string(),
        width: 2.0,
    });
}

fn draw_histogram(doc: &mut VectorDocument, ctx: &DrawContext, dataset: &ChartDataset) {
    if dataset.data.is_empty() {
        return;
    }

    let slot = ctx.slot_width(dataset.data.len());
    let bar_width = (slot * BAR_WIDTH * 2.0).max(1.0);

    for point in &dataset.data {
        let scale = ctx.y_scale(dataset, point);
        // Zero line, clamped into the visible scale
        let zero_y = ctx.area.scale_y(0.0_f64.clamp(scale.min, scale.max), scale);
        let value_y = ctx.sy(dataset, point, point.y);

        let color = if point.y >= 0.0 {
            ctx.palette.up
        } else {
            ctx.palette.down
        };
        doc.add(Element::Rect {
            x: ctx.sx(point) - bar_width / 2.0,
            y: value_y.min(zero_y),
            w: bar_width,
            h: (value_y - zero_y).abs().max(0.5),
            fill: color.to_string(),
            opacity: 1.0,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::data::{ChartConfig, ChartTheme, ChartX};
    use approx::assert_relative_eq;

    fn numeric_points(ys: &[f64]) -> Vec<ChartPoint> {
        ys.iter()
            .enumerate()
            .map(|(i, &y)| ChartPoint::new(ChartX::Number(i as f64), y))
            .collect()
    }

    fn count_matching(doc: &VectorDocument, predicate: impl Fn(&Element) -> bool) -> usize {
        doc.elements.iter().filter(|e| predicate(e)).count()
    }

    #[test]
    fn test_line_chart_renders_polyline_and_markers() {
        let data = ChartData::with_dataset(ChartDataset::new(
            "series",
            numeric_points(&[1.0, 2.0, 3.0]),
        ));
        let doc = render(&data).unwrap();

        assert_eq!(
            count_matching(&doc, |e| matches!(e, Element::Polyline { .. })),
            1
        );
        assert_eq!(
            count_matching(&doc, |e| matches!(e, Element::Circle { .. })),
            3
        );
    }

    #[test]
    fn test_line_chart_needs_two_points() {
        let data = ChartData::with_dataset(ChartDataset::new("lonely", numeric_points(&[1.0])));
        let doc = render(&data).unwrap();
        assert_eq!(
            count_matching(&doc, |e| matches!(e, Element::Polyline { .. })),
            0
        );
    }

    #[test]
    fn test_render_is_deterministic_for_numeric_domain() {
        let data = ChartData::with_dataset(
            ChartDataset::new("candles", numeric_points(&[10.0, 11.0, 10.5]))
                .with_chart_type(ChartType::Candlestick),
        );
        assert_eq!(render(&data).unwrap(), render(&data).unwrap());
    }

    #[test]
    fn test_empty_chart_still_renders_scaffolding() {
        let data = ChartData::new(vec![], ChartConfig::default());
        let doc = render(&data).unwrap();

        // Grid and axis lines exist even with the degenerate default scale
        assert!(count_matching(&doc, |e| matches!(e, Element::Line { .. })) > 0);
        let svg = doc.to_svg();
        assert!(svg.contains("#131722"));
    }

    #[test]
    fn test_dual_axis_draws_both_axes() {
        let config = ChartConfig {
            dual_axis: true,
            ..ChartConfig::default()
        };
        let data = ChartData::new(
            vec![
                ChartDataset::new("price", numeric_points(&[1.0, 2.0])).with_axis(AxisSide::Left),
                ChartDataset::new("volume", numeric_points(&[100.0, 200.0]))
                    .with_axis(AxisSide::Right),
            ],
            config,
        );
        let doc = render(&data).unwrap();
        let area = axis::plot_area(&data.config);

        let right_axis_lines = count_matching(&doc, |e| {
            matches!(e, Element::Line { x1, x2, .. } if *x1 == area.right() && *x2 == area.right())
        });
        assert!(right_axis_lines >= 1);
    }

    #[test]
    fn test_bar_chart_negative_values_recolored() {
        // Legend off so the only "#123456" rect is the positive bar itself
        let config = ChartConfig {
            show_legend: false,
            ..ChartConfig::default()
        };
        let data = ChartData::new(
            vec![ChartDataset::new("pnl", numeric_points(&[5.0, -3.0]))
                .with_chart_type(ChartType::Bar)
                .with_color("#123456")],
            config,
        );
        let doc = render(&data).unwrap();

        assert_eq!(
            count_matching(&doc, |e| matches!(e, Element::Rect { fill, .. } if fill == "#123456")),
            1
        );
        let down = base::palette(ChartTheme::Dark).down;
        assert!(count_matching(&doc, |e| matches!(e, Element::Rect { fill, .. } if fill == down)) >= 1);
    }

    #[test]
    fn test_bar_chart_small_values_skip_labels() {
        let data = ChartData::with_dataset(
            ChartDataset::new("tiny", numeric_points(&[0.001, 5.0]))
                .with_chart_type(ChartType::Bar),
        );
        let doc = render(&data).unwrap();

        let bar_labels = count_matching(
            &doc,
            |e| matches!(e, Element::Text { content, .. } if content == "5.00"),
        );
        assert_eq!(bar_labels, 1);
        assert_eq!(
            count_matching(&doc, |e| matches!(e, Element::Text { content, .. } if content.starts_with("0.001"))),
            0
        );
    }

    #[test]
    fn test_pie_angles_sum_to_tau() {
        let angles = pie_angles(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(angles.len(), 4);
        let total: f64 = angles.iter().map(|(_, sweep)| sweep).sum();
        assert_relative_eq!(total, TAU, epsilon = 1e-9);

        // Slices accumulate: each starts where the previous ended
        for w in angles.windows(2) {
            assert_relative_eq!(w[0].0 + w[0].1, w[1].0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_pie_skips_non_positive_values() {
        let angles = pie_angles(&[2.0, -1.0, 0.0, 2.0]);
        assert_eq!(angles.len(), 2);
        assert!(pie_angles(&[-1.0, 0.0]).is_empty());
    }

    #[test]
    fn test_synth_ohlc_is_deterministic_and_ordered() {
        let point = ChartPoint::new(ChartX::Number(7.0), 250.0);
        let a = synth_ohlc(&point, 7.0, 3);
        let b = synth_ohlc(&point, 7.0, 3);
        assert_eq!(a, b);

        assert!(a.high >= a.open.max(a.close));
        assert!(a.low <= a.open.min(a.close));
        // Default direction is bullish: close above open
        assert!(a.close > a.open);
    }

    #[test]
    fn test_synth_ohlc_respects_bearish_hint() {
        let mut point = ChartPoint::new(ChartX::Number(7.0), 250.0);
        point.bullish = Some(false);
        let ohlc = synth_ohlc(&point, 7.0, 0);
        assert!(ohlc.close < ohlc.open);
    }

    #[test]
    fn test_candlestick_uses_true_ohlc_when_supplied() {
        let point = ChartPoint::new(ChartX::Number(0.0), 100.0).with_ohlc(Ohlc {
            open: 90.0,
            high: 120.0,
            low: 80.0,
            close: 100.0,
        });
        let data = ChartData::with_dataset(
            ChartDataset::new("candle", vec![point]).with_chart_type(ChartType::Candlestick),
        );
        let doc = render(&data).unwrap();

        // One wick line colored up (close >= open)
        let up = base::palette(ChartTheme::Dark).up;
        assert!(count_matching(&doc, |e| matches!(e, Element::Line { stroke, .. } if stroke == up)) >= 1);
    }

    #[test]
    fn test_insert_crossings_interpolates_base_hits() {
        let points = [(0.0, 10.0), (1.0, -10.0), (2.0, 10.0)];
        let augmented = insert_crossings(&points, 0.0);

        assert_eq!(augmented.len(), 5);
        assert_relative_eq!(augmented[1].0, 0.5);
        assert_relative_eq!(augmented[1].1, 0.0);
        assert_relative_eq!(augmented[3].0, 1.5);
    }

    #[test]
    fn test_baseline_chart_adds_gradients_and_reference_line() {
        let data = ChartData::with_dataset(
            ChartDataset::new("pnl", numeric_points(&[100.0, 120.0, 90.0, 110.0]))
                .with_chart_type(ChartType::Baseline),
        );
        let doc = render(&data).unwrap();

        assert_eq!(doc.gradients.len(), 2);
        assert!(count_matching(&doc, |e| matches!(e, Element::Line { dashed, .. } if *dashed)) >= 1);
    }

    #[test]
    fn test_histogram_colors_by_sign() {
        let data = ChartData::with_dataset(
            ChartDataset::new("macd", numeric_points(&[1.0, -2.0, 3.0]))
                .with_chart_type(ChartType::Histogram),
        );
        let doc = render(&data).unwrap();

        let palette = base::palette(ChartTheme::Dark);
        let up_bars =
            count_matching(&doc, |e| matches!(e, Element::Rect { fill, .. } if fill == palette.up));
        let down_bars =
            count_matching(&doc, |e| matches!(e, Element::Rect { fill, .. } if fill == palette.down));
        assert_eq!(up_bars, 2);
        assert_eq!(down_bars, 1);
    }

    #[test]
    fn test_render_rejects_untagged_dual_axis() {
        let config = ChartConfig {
            dual_axis: true,
            ..ChartConfig::default()
        };
        let data = ChartData::new(vec![ChartDataset::new("plain", numeric_points(&[1.0]))], config);
        assert!(render(&data).is_err());
    }

    #[test]
    fn test_render_svg_wraps_document() {
        let data =
            ChartData::with_dataset(ChartDataset::new("series", numeric_points(&[1.0, 2.0])));
        let svg = render_svg(&data).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("<polyline"));
    }
}
