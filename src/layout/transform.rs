//! Mapping between calendar time and chart pixels.
//!
//! Horizontal positions are measured from the chart's temporal origin
//! (`gantt_start`); vertical positions from the top of the chart.

use chrono::NaiveDateTime;

use crate::dates::{self, DateUnit};
use crate::model::{ChartContext, ChartOptions, ViewMode};

/// Month columns are drawn as if every month had this many days.
const DAYS_PER_MONTH_COLUMN: f64 = 30.0;

/// Pixel offset of `date` from the origin. Dates before the origin map to
/// negative offsets.
///
/// Month view counts whole days and scales by `column_width / 30`, so
/// every month column has the same width regardless of its length.
pub fn date_to_x(date: NaiveDateTime, ctx: &ChartContext) -> f32 {
    let ChartOptions {
        step, column_width, ..
    } = ctx.options;
    let column_width = f64::from(column_width);

    let x = if ctx.view_is(ViewMode::Month) {
        let days = dates::diff(date, ctx.gantt_start, DateUnit::Day) as f64;
        days * column_width / DAYS_PER_MONTH_COLUMN
    } else {
        let hours = dates::diff(date, ctx.gantt_start, DateUnit::Hour) as f64;
        hours / step * column_width
    };
    x as f32
}

/// Inverse of [`date_to_x`] outside Month view: the instant at pixel `x`.
pub fn x_to_date(x: f32, ctx: &ChartContext) -> NaiveDateTime {
    let units = f64::from(x) / f64::from(ctx.options.column_width);
    dates::add(ctx.gantt_start, units * ctx.options.step, DateUnit::Hour)
}

/// Width of the span `start..end`, never negative.
pub fn duration_width(start: NaiveDateTime, end: NaiveDateTime, ctx: &ChartContext) -> f32 {
    let hours = dates::diff(end, start, DateUnit::Hour) as f64;
    let width = hours / ctx.options.step * f64::from(ctx.options.column_width);
    width.max(0.0) as f32
}

/// Top edge of lane `lane`.
pub fn lane_to_y(lane: usize, options: &ChartOptions) -> f32 {
    options.header_height + options.padding + lane as f32 * (options.bar_height + options.padding)
}

/// Lane whose row contains `y`, or `None` above the first lane.
pub fn y_to_lane(y: f32, options: &ChartOptions) -> Option<usize> {
    let offset = y - options.header_height - options.padding;
    if !offset.is_finite() || offset < 0.0 {
        return None;
    }
    Some((offset / (options.bar_height + options.padding)).floor() as usize)
}
