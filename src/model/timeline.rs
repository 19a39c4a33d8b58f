use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::Task;
use crate::error::{GanttError, Result};
use crate::layout::transform;

/// Column granularity of the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewMode {
    #[serde(rename = "Quarter Day")]
    QuarterDay,
    #[serde(rename = "Half Day")]
    HalfDay,
    #[default]
    Day,
    Week,
    Month,
}

impl ViewMode {
    pub const ALL: [ViewMode; 5] = [
        ViewMode::QuarterDay,
        ViewMode::HalfDay,
        ViewMode::Day,
        ViewMode::Week,
        ViewMode::Month,
    ];

    /// Hours represented by one column.
    pub fn step_hours(self) -> f64 {
        match self {
            ViewMode::QuarterDay => 6.0,
            ViewMode::HalfDay => 12.0,
            ViewMode::Day => 24.0,
            ViewMode::Week => 24.0 * 7.0,
            ViewMode::Month => 24.0 * 30.0,
        }
    }

    /// Column width the mode is drawn with by default.
    pub fn column_width(self) -> f32 {
        match self {
            ViewMode::QuarterDay | ViewMode::HalfDay | ViewMode::Day => 38.0,
            ViewMode::Week => 140.0,
            ViewMode::Month => 120.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::QuarterDay => "Quarter Day",
            ViewMode::HalfDay => "Half Day",
            ViewMode::Day => "Day",
            ViewMode::Week => "Week",
            ViewMode::Month => "Month",
        }
    }
}

impl std::str::FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "quarterday" => Ok(ViewMode::QuarterDay),
            "halfday" => Ok(ViewMode::HalfDay),
            "day" => Ok(ViewMode::Day),
            "week" => Ok(ViewMode::Week),
            "month" => Ok(ViewMode::Month),
            _ => Err(format!(
                "unknown view mode '{}' (expected quarter-day, half-day, day, week or month)",
                s
            )),
        }
    }
}

/// Chart-wide options. Every field falls back to its default, so a partial
/// JSON file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    pub header_height: f32,
    pub column_width: f32,
    /// Hours per column.
    pub step: f64,
    pub view_mode: ViewMode,
    pub bar_height: f32,
    pub bar_corner_radius: f32,
    /// Vertical gap between lanes (and above the first lane).
    pub padding: f32,
    pub language: String,
    /// Window after a drag during which clicks are ignored.
    pub action_guard_ms: u64,
    /// Gap between a bar's end and an outside label.
    pub label_gap: f32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            header_height: 50.0,
            column_width: 30.0,
            step: 24.0,
            view_mode: ViewMode::Day,
            bar_height: 20.0,
            bar_corner_radius: 3.0,
            padding: 18.0,
            language: "en".into(),
            action_guard_ms: 1000,
            label_gap: 5.0,
        }
    }
}

impl ChartOptions {
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("step", self.step),
            ("column_width", f64::from(self.column_width)),
            ("bar_height", f64::from(self.bar_height)),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(GanttError::InvalidOptions {
                    message: format!("{} must be a positive number, got {}", name, value),
                });
            }
        }
        let non_negative = [
            ("padding", self.padding),
            ("header_height", self.header_height),
            ("bar_corner_radius", self.bar_corner_radius),
            ("label_gap", self.label_gap),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(GanttError::InvalidOptions {
                    message: format!("{} must not be negative, got {}", name, value),
                });
            }
        }
        Ok(())
    }
}

/// Everything the layout reads about the surrounding chart for one pass.
#[derive(Debug, Clone)]
pub struct ChartContext {
    /// Temporal origin: pixel x = 0.
    pub gantt_start: NaiveDateTime,
    pub gantt_end: NaiveDateTime,
    pub options: ChartOptions,
}

impl ChartContext {
    pub fn new(gantt_start: NaiveDateTime, gantt_end: NaiveDateTime, options: ChartOptions) -> Self {
        Self {
            gantt_start,
            gantt_end,
            options,
        }
    }

    pub fn view_mode(&self) -> ViewMode {
        self.options.view_mode
    }

    pub fn view_is(&self, mode: ViewMode) -> bool {
        self.options.view_mode == mode
    }

    /// Switch granularity, adopting the mode's step and column width.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.options.view_mode = mode;
        self.options.step = mode.step_hours();
        self.options.column_width = mode.column_width();
    }

    /// Derive origin and end from the tasks, padded per view mode.
    pub fn fit_to_tasks(&mut self, tasks: &[Task]) {
        let (Some(first), Some(last)) = (
            tasks.iter().map(|t| t.start.min(t.end)).min(),
            tasks.iter().map(|t| t.start.max(t.end)).max(),
        ) else {
            return;
        };

        let first_day = first.date();
        let last_day = last.date() + Duration::days(1);
        let (start, end) = match self.view_mode() {
            ViewMode::QuarterDay | ViewMode::HalfDay => {
                (first_day - Duration::days(1), last_day + Duration::days(7))
            }
            ViewMode::Month => {
                let jan = NaiveDate::from_ymd_opt(first_day.year(), 1, 1).unwrap_or(first_day);
                let next = NaiveDate::from_ymd_opt(last_day.year() + 1, 1, 1).unwrap_or(last_day);
                (jan, next)
            }
            ViewMode::Day | ViewMode::Week => (
                first_day.checked_sub_months(Months::new(1)).unwrap_or(first_day),
                last_day.checked_add_months(Months::new(1)).unwrap_or(last_day),
            ),
        };
        self.gantt_start = start.and_time(chrono::NaiveTime::MIN);
        self.gantt_end = end.and_time(chrono::NaiveTime::MIN);
    }

    pub fn date_to_x(&self, date: NaiveDateTime) -> f32 {
        transform::date_to_x(date, self)
    }

    pub fn x_to_date(&self, x: f32) -> NaiveDateTime {
        transform::x_to_date(x, self)
    }

    /// Total width in pixels from origin to chart end.
    pub fn total_width(&self) -> f32 {
        self.date_to_x(self.gantt_end).max(0.0)
    }

    /// Zoom in (widen columns).
    pub fn zoom_in(&mut self) {
        self.options.column_width = (self.options.column_width * 1.2).min(400.0);
    }

    /// Zoom out (narrow columns).
    pub fn zoom_out(&mut self) {
        self.options.column_width = (self.options.column_width / 1.2).max(8.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap()
    }

    #[test]
    fn partial_options_fall_back_to_defaults() {
        let opts: ChartOptions = serde_json::from_str(r#"{ "bar_height": 24 }"#).unwrap();
        assert_eq!(opts.bar_height, 24.0);
        assert_eq!(opts.padding, 18.0);
        assert_eq!(opts.view_mode, ViewMode::Day);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn view_mode_names_match_display_labels() {
        let opts: ChartOptions = serde_json::from_str(r#"{ "view_mode": "Quarter Day" }"#).unwrap();
        assert_eq!(opts.view_mode, ViewMode::QuarterDay);
        assert_eq!(opts.view_mode.label(), "Quarter Day");
    }

    #[test]
    fn view_mode_parses_loose_spellings() {
        assert_eq!("quarter-day".parse::<ViewMode>(), Ok(ViewMode::QuarterDay));
        assert_eq!("Half Day".parse::<ViewMode>(), Ok(ViewMode::HalfDay));
        assert_eq!("MONTH".parse::<ViewMode>(), Ok(ViewMode::Month));
        assert!("year".parse::<ViewMode>().is_err());
    }

    #[test]
    fn validate_rejects_zero_column_width() {
        let opts = ChartOptions {
            column_width: 0.0,
            ..Default::default()
        };
        let err = opts.validate().unwrap_err();
        assert!(err.to_string().contains("column_width"));
    }

    #[test]
    fn validate_rejects_negative_padding() {
        let opts = ChartOptions {
            padding: -1.0,
            ..Default::default()
        };
        assert!(opts.validate().is_err());
    }

    #[test]
    fn set_view_mode_adopts_step_and_width() {
        let mut ctx = ChartContext::new(day(2024, 1, 1), day(2024, 2, 1), ChartOptions::default());
        ctx.set_view_mode(ViewMode::Week);
        assert_eq!(ctx.options.step, 168.0);
        assert_eq!(ctx.options.column_width, 140.0);
        assert!(ctx.view_is(ViewMode::Week));
    }

    #[test]
    fn fit_to_tasks_pads_by_a_month_in_day_view() {
        let mut ctx = ChartContext::new(day(2000, 1, 1), day(2000, 1, 2), ChartOptions::default());
        let tasks = vec![
            Task::new("a", "x", day(2024, 3, 10), day(2024, 3, 12)),
            Task::new("b", "x", day(2024, 3, 5), day(2024, 3, 6)),
        ];
        ctx.fit_to_tasks(&tasks);
        assert_eq!(ctx.gantt_start, day(2024, 2, 5));
        assert_eq!(ctx.gantt_end, day(2024, 4, 13));
    }

    #[test]
    fn fit_to_tasks_snaps_month_view_to_year() {
        let mut ctx = ChartContext::new(day(2000, 1, 1), day(2000, 1, 2), ChartOptions::default());
        ctx.set_view_mode(ViewMode::Month);
        ctx.fit_to_tasks(&[Task::new("a", "x", day(2024, 6, 10), day(2024, 7, 1))]);
        assert_eq!(ctx.gantt_start, day(2024, 1, 1));
        assert_eq!(ctx.gantt_end, day(2025, 1, 1));
    }

    #[test]
    fn fit_to_tasks_ignores_empty_input() {
        let mut ctx = ChartContext::new(day(2024, 1, 1), day(2024, 2, 1), ChartOptions::default());
        ctx.fit_to_tasks(&[]);
        assert_eq!(ctx.gantt_start, day(2024, 1, 1));
    }
}
