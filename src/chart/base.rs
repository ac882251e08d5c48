//! Base constants, themes and formatting helpers for the chart module.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use super::data::{ChartDataset, ChartTheme};

// Layout constants
pub const MARGIN: f64 = 5.0;
pub const AXIS_X_HEIGHT: f64 = 32.0;
pub const AXIS_Y_WIDTH: f64 = 80.0;
pub const TITLE_HEIGHT: f64 = 28.0;
pub const LEGEND_ROW_HEIGHT: f64 = 16.0;
pub const LEGEND_PADDING: f64 = 8.0;
pub const TICK_LABEL_SIZE: f64 = 11.0;
pub const AXIS_LABEL_SIZE: f64 = 12.0;
pub const TITLE_SIZE: f64 = 16.0;

/// Bars/candles occupy this fraction of their slot on each side of center.
pub const BAR_WIDTH: f64 = 0.3;

/// Value labels are suppressed below this magnitude to avoid clutter.
pub const LABEL_MIN_MAGNITUDE: f64 = 0.01;

/// Colors for one theme, as `#rrggbb` strings.
#[derive(Debug, Clone)]
pub struct ThemePalette {
    pub background: &'static str,
    pub text: &'static str,
    pub grid: &'static str,
    pub axis: &'static str,
    pub up: &'static str,
    pub down: &'static str,
    pub series: [&'static str; 8],
}

const DARK_PALETTE: ThemePalette = ThemePalette {
    background: "#131722",
    text: "#d1d4dc",
    grid: "#2a2e39",
    axis: "#434651",
    up: "#26a69a",
    down: "#ef5350",
    series: [
        "#2962ff", "#ff6d00", "#26a69a", "#ef5350", "#ab47bc", "#ffca28", "#29b6f6", "#66bb6a",
    ],
};

const LIGHT_PALETTE: ThemePalette = ThemePalette {
    background: "#ffffff",
    text: "#333333",
    grid: "#e0e3eb",
    axis: "#b2b5be",
    up: "#089981",
    down: "#f23645",
    series: [
        "#1565c0", "#e65100", "#00897b", "#d32f2f", "#6a1b9a", "#f9a825", "#0288d1", "#2e7d32",
    ],
};

/// Palette lookup for a theme.
pub fn palette(theme: ChartTheme) -> &'static ThemePalette {
    match theme {
        ChartTheme::Dark => &DARK_PALETTE,
        ChartTheme::Light => &LIGHT_PALETTE,
    }
}

/// Series color for a dataset index: deterministic palette rotation.
pub fn series_color(theme: ChartTheme, index: usize) -> &'static str {
    let colors = &palette(theme).series;
    colors[index % colors.len()]
}

/// Effective color for a dataset: its explicit color when set, otherwise
/// the theme palette rotation for its index.
pub fn dataset_color(dataset: &ChartDataset, theme: ChartTheme, index: usize) -> String {
    dataset
        .color
        .clone()
        .unwrap_or_else(|| series_color(theme, index).to_string())
}

/// Format a Y-axis value with magnitude-based precision.
///
/// Large values collapse to K/M/B suffixes; values below one cent keep six
/// decimals so sub-cent token prices stay readable.
pub fn format_value(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 1_000_000_000.0 {
        format!("{:.2}B", value / 1_000_000_000.0)
    } else if magnitude >= 1_000_000.0 {
        format!("{:.2}M", value / 1_000_000.0)
    } else if magnitude >= 1_000.0 {
        format!("{:.2}K", value / 1_000.0)
    } else if magnitude >= 1.0 {
        format!("{:.2}", value)
    } else if magnitude >= 0.01 {
        format!("{:.4}", value)
    } else {
        format!("{:.6}", value)
    }
}

/// Format an X-axis timestamp relative to `now`.
///
/// Recent values keep the time of day, older ones the calendar date.
pub fn format_axis_time(epoch_ms: i64, now: DateTime<Utc>) -> String {
    let datetime = match Utc.timestamp_millis_opt(epoch_ms) {
        chrono::LocalResult::Single(dt) => dt,
        _ => return format!("{:.2}", epoch_ms as f64),
    };

    let age = now.signed_duration_since(datetime);
    if age.num_hours().abs() < 24 {
        datetime.format("%H:%M").to_string()
    } else if age.num_days().abs() < 7 {
        datetime.format("%b %-d").to_string()
    } else {
        datetime.format("%b %-d, %y").to_string()
    }
}

/// Round value to the nearest multiple of target
pub fn round_to(value: f64, target: f64) -> f64 {
    let decimal_value = Decimal::from_f64(value).unwrap_or_default();
    let decimal_target = Decimal::from_f64(target).unwrap_or(Decimal::ONE);

    if decimal_target.is_zero() {
        return value;
    }

    let result = (decimal_value / decimal_target).round() * decimal_target;
    result.to_f64().unwrap_or(value)
}

/// Calculate nice axis tick values
pub fn calculate_axis_ticks(min_val: f64, max_val: f64, max_ticks: usize) -> Vec<f64> {
    if min_val >= max_val || max_ticks == 0 {
        return vec![min_val];
    }

    let range = max_val - min_val;
    let rough_step = range / max_ticks as f64;

    // Find the magnitude of the step
    let magnitude = 10.0_f64.powf(rough_step.log10().floor());
    let residual = rough_step / magnitude;

    // Choose a nice step value
    let nice_step = if residual <= 1.5 {
        magnitude
    } else if residual <= 3.0 {
        2.0 * magnitude
    } else if residual <= 7.0 {
        5.0 * magnitude
    } else {
        10.0 * magnitude
    };

    // Generate tick values, snapped to the step to keep labels clean
    let mut ticks = Vec::new();
    let mut value = (min_val / nice_step).ceil() * nice_step;

    while value <= max_val {
        ticks.push(round_to(value, nice_step));
        value += nice_step;
    }

    ticks
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_format_value_magnitudes() {
        assert_eq!(format_value(2_500_000_000.0), "2.50B");
        assert_eq!(format_value(1_500_000.0), "1.50M");
        assert_eq!(format_value(1_500.0), "1.50K");
        assert_eq!(format_value(100.0), "100.00");
        assert_eq!(format_value(0.5), "0.5000");
        assert_eq!(format_value(0.000123), "0.000123");
        assert_eq!(format_value(-1_500.0), "-1.50K");
    }

    #[test]
    fn test_format_axis_time_relative_ladder() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();

        let recent = now - Duration::hours(2);
        assert_eq!(format_axis_time(recent.timestamp_millis(), now), "10:00");

        let this_week = now - Duration::days(3);
        assert_eq!(format_axis_time(this_week.timestamp_millis(), now), "Jun 12");

        let old = now - Duration::days(400);
        assert_eq!(format_axis_time(old.timestamp_millis(), now), "May 12, 23");
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.234, 0.01), 1.23);
        assert_eq!(round_to(1.235, 0.01), 1.24);
        assert_eq!(round_to(7.0, 0.0), 7.0);
    }

    #[test]
    fn test_calculate_axis_ticks() {
        let ticks = calculate_axis_ticks(0.0, 100.0, 5);
        assert!(!ticks.is_empty());
        for tick in &ticks {
            assert!(*tick >= 0.0 && *tick <= 100.0);
        }
        // Steps are uniform
        if ticks.len() > 2 {
            let step = ticks[1] - ticks[0];
            for w in ticks.windows(2) {
                assert!((w[1] - w[0] - step).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_series_color_rotates() {
        assert_eq!(
            series_color(ChartTheme::Dark, 0),
            series_color(ChartTheme::Dark, 8)
        );
        assert_ne!(
            series_color(ChartTheme::Dark, 0),
            series_color(ChartTheme::Dark, 1)
        );
    }
}
