//! Axis scale inference.
//!
//! One X scale over the common comparable domain of all datasets, plus one
//! Y scale (single axis) or two independent Y scales (dual axis). Scales
//! are derived from the data on every call and never cached; the data may
//! change between renders.

use std::collections::HashMap;

use serde::Serialize;

use super::data::{AxisSide, ChartData, ChartPoint, ChartX};

/// Inferred range for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scale {
    pub min: f64,
    pub max: f64,
    pub range: f64,
}

impl Scale {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            range: max - min,
        }
    }

    /// Fallback scale when an axis has no data at all.
    pub fn default_chart() -> Self {
        Self::new(0.0, 100.0)
    }

    /// Pad an observed `[min, max]` on both ends.
    ///
    /// The absolute floor keeps zero-variance input from collapsing the
    /// range to nothing.
    fn padded(min: f64, max: f64, fraction: f64, floor: f64) -> Self {
        let pad = ((max - min) * fraction).max(floor);
        Self::new(min - pad, max + pad)
    }
}

/// The X scale plus one or two Y scales.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisScales {
    pub x: Scale,
    pub y_left: Scale,
    pub y_right: Option<Scale>,
}

/// What kind of values the X domain holds, for tick formatting.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum XDomain {
    Numeric,
    Time,
    Category(Vec<String>),
}

/// Scale computation output: the axis scales plus the category mapping
/// needed to place points.
#[derive(Debug, Clone)]
pub struct Scales {
    pub axes: AxisScales,
    pub(crate) x_domain: XDomain,
    category_index: HashMap<String, usize>,
}

impl Scales {
    /// Map a point's x to the common numeric domain.
    pub(crate) fn x_value(&self, x: &ChartX) -> f64 {
        match x {
            ChartX::Number(v) => *v,
            ChartX::Timestamp(ms) => *ms as f64,
            ChartX::Category(name) => {
                self.category_index.get(name).copied().unwrap_or(0) as f64
            }
        }
    }
}

/// Y values a point contributes to its axis: the y itself plus any true
/// OHLC extremes, so candle wicks stay inside the scale.
fn point_y_values(point: &ChartPoint) -> impl Iterator<Item = f64> + '_ {
    let ohlc = point.ohlc.as_ref();
    std::iter::once(point.y)
        .chain(ohlc.map(|o| o.high))
        .chain(ohlc.map(|o| o.low))
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let mut result: Option<(f64, f64)> = None;
    for value in values {
        if !value.is_finite() {
            continue;
        }
        result = Some(match result {
            None => (value, value),
            Some((lo, hi)) => (lo.min(value), hi.max(value)),
        });
    }
    result
}

/// Compute all axis scales for a chart.
pub fn compute_scales(data: &ChartData) -> Scales {
    // Category values map to ordinal positions in first-seen order
    let mut categories: Vec<String> = Vec::new();
    let mut category_index: HashMap<String, usize> = HashMap::new();
    let mut has_time = false;

    for dataset in &data.datasets {
        for point in &dataset.data {
            match &point.x {
                ChartX::Category(name) => {
                    if !category_index.contains_key(name) {
                        category_index.insert(name.clone(), categories.len());
                        categories.push(name.clone());
                    }
                }
                ChartX::Timestamp(_) => has_time = true,
                ChartX::Number(_) => {}
            }
        }
    }

    let x_domain = if !categories.is_empty() {
        XDomain::Category(categories)
    } else if has_time {
        XDomain::Time
    } else {
        XDomain::Numeric
    };

    let x_value = |x: &ChartX| -> f64 {
        match x {
            ChartX::Number(v) => *v,
            ChartX::Timestamp(ms) => *ms as f64,
            ChartX::Category(name) => category_index.get(name).copied().unwrap_or(0) as f64,
        }
    };
    let all_points = data.datasets.iter().flat_map(|d| &d.data);
    let x_scale = match min_max(all_points.map(|p| x_value(&p.x))) {
        // A single x value still needs a non-zero range for the transform
        Some((lo, hi)) if lo == hi => Scale::new(lo - 0.5, hi + 0.5),
        Some((lo, hi)) => Scale::new(lo, hi),
        None => Scale::default_chart(),
    };

    let mut scales = Scales {
        axes: AxisScales {
            x: x_scale,
            y_left: Scale::default_chart(),
            y_right: None,
        },
        x_domain,
        category_index,
    };

    if data.config.dual_axis {
        let side_scale = |side: AxisSide| {
            let values = data.datasets.iter().flat_map(|dataset| {
                dataset
                    .data
                    .iter()
                    .filter(move |p| dataset.point_axis(p) == side)
                    .flat_map(point_y_values)
            });
            match min_max(values) {
                Some((lo, hi)) => Scale::padded(lo, hi, 0.1, 0.1),
                None => Scale::default_chart(),
            }
        };
        scales.axes.y_left = side_scale(AxisSide::Left);
        scales.axes.y_right = Some(side_scale(AxisSide::Right));
    } else {
        let values = data
            .datasets
            .iter()
            .flat_map(|d| d.data.iter().flat_map(point_y_values));
        scales.axes.y_left = match min_max(values) {
            Some((lo, hi)) => Scale::padded(lo, hi, 0.15, 0.15),
            None => Scale::default_chart(),
        };
        scales.axes.y_right = None;
    }

    scales
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::data::{ChartConfig, ChartDataset};
    use approx::assert_relative_eq;

    fn numeric_points(ys: &[f64]) -> Vec<ChartPoint> {
        ys.iter()
            .enumerate()
            .map(|(i, &y)| ChartPoint::new(ChartX::Number(i as f64), y))
            .collect()
    }

    #[test]
    fn test_single_axis_padding() {
        let data = ChartData::with_dataset(ChartDataset::new(
            "values",
            numeric_points(&[10.0, 20.0, 30.0]),
        ));
        let scales = compute_scales(&data);

        // range 20, pad max(0.15, 3) = 3
        assert_relative_eq!(scales.axes.y_left.min, 7.0);
        assert_relative_eq!(scales.axes.y_left.max, 33.0);
        assert!(scales.axes.y_right.is_none());
    }

    #[test]
    fn test_padded_scale_strictly_contains_points() {
        let ys = [3.0, 9.5, 4.2, 8.8];
        let data = ChartData::with_dataset(ChartDataset::new("values", numeric_points(&ys)));
        let scale = compute_scales(&data).axes.y_left;

        for &y in &ys {
            assert!(scale.min < y && y < scale.max);
        }
    }

    #[test]
    fn test_zero_variance_input_keeps_nonzero_range() {
        let data =
            ChartData::with_dataset(ChartDataset::new("flat", numeric_points(&[5.0, 5.0, 5.0])));
        let scale = compute_scales(&data).axes.y_left;

        assert!(scale.range > 0.0);
        assert_relative_eq!(scale.min, 4.85);
        assert_relative_eq!(scale.max, 5.15);
    }

    #[test]
    fn test_empty_chart_defaults() {
        let data = ChartData::new(vec![], ChartConfig::default());
        let scales = compute_scales(&data);

        assert_eq!(scales.axes.x, Scale::default_chart());
        assert_eq!(scales.axes.y_left, Scale::default_chart());
    }

    #[test]
    fn test_dual_axis_independence() {
        let config = ChartConfig {
            dual_axis: true,
            ..ChartConfig::default()
        };
        let left = ChartDataset::new("left", numeric_points(&[1.0, 2.0])).with_axis(AxisSide::Left);
        let make_right = |ys: &[f64]| {
            ChartDataset::new("right", numeric_points(ys)).with_axis(AxisSide::Right)
        };

        let a = compute_scales(&ChartData::new(
            vec![left.clone(), make_right(&[100.0, 200.0])],
            config.clone(),
        ));
        let b = compute_scales(&ChartData::new(
            vec![left, make_right(&[1000.0, 5000.0])],
            config,
        ));

        // Mutating the right-tagged values must leave the left scale alone
        assert_eq!(a.axes.y_left, b.axes.y_left);
        assert_ne!(a.axes.y_right, b.axes.y_right);
    }

    #[test]
    fn test_dual_axis_padding_fraction() {
        let config = ChartConfig {
            dual_axis: true,
            ..ChartConfig::default()
        };
        let data = ChartData::new(
            vec![
                ChartDataset::new("left", numeric_points(&[0.0, 10.0])).with_axis(AxisSide::Left),
                ChartDataset::new("right", numeric_points(&[50.0, 60.0])).with_axis(AxisSide::Right),
            ],
            config,
        );
        let scales = compute_scales(&data);

        assert_relative_eq!(scales.axes.y_left.min, -1.0);
        assert_relative_eq!(scales.axes.y_left.max, 11.0);
        let right = scales.axes.y_right.unwrap();
        assert_relative_eq!(right.min, 49.0);
        assert_relative_eq!(right.max, 61.0);
    }

    #[test]
    fn test_category_domain_ordinal_mapping() {
        let points = vec![
            ChartPoint::new(ChartX::Category("alpha".into()), 1.0),
            ChartPoint::new(ChartX::Category("beta".into()), 2.0),
            ChartPoint::new(ChartX::Category("alpha".into()), 3.0),
        ];
        let data = ChartData::with_dataset(ChartDataset::new("cats", points));
        let scales = compute_scales(&data);

        assert_eq!(scales.x_value(&ChartX::Category("alpha".into())), 0.0);
        assert_eq!(scales.x_value(&ChartX::Category("beta".into())), 1.0);
        match &scales.x_domain {
            XDomain::Category(names) => assert_eq!(names, &["alpha", "beta"]),
            other => panic!("expected category domain, got {other:?}"),
        }
    }

    #[test]
    fn test_single_x_value_expands() {
        let data = ChartData::with_dataset(ChartDataset::new(
            "one",
            vec![ChartPoint::new(ChartX::Number(42.0), 5.0)],
        ));
        let x = compute_scales(&data).axes.x;
        assert_relative_eq!(x.min, 41.5);
        assert_relative_eq!(x.max, 42.5);
    }

    #[test]
    fn test_candlestick_extremes_extend_scale() {
        use crate::chart::data::Ohlc;
        let point = ChartPoint::new(ChartX::Number(0.0), 100.0).with_ohlc(Ohlc {
            open: 95.0,
            high: 140.0,
            low: 60.0,
            close: 100.0,
        });
        let data = ChartData::with_dataset(ChartDataset::new("candles", vec![point]));
        let scale = compute_scales(&data).axes.y_left;

        assert!(scale.min < 60.0);
        assert!(scale.max > 140.0);
    }
}
