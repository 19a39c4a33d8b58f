//! Date helpers the layout delegates to: difference, offset and formatting.

use chrono::{Duration, NaiveDateTime};

/// Unit used by [`diff`] and [`add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateUnit {
    Second,
    Minute,
    Hour,
    Day,
}

impl DateUnit {
    fn millis(self) -> i64 {
        match self {
            DateUnit::Second => 1_000,
            DateUnit::Minute => 60_000,
            DateUnit::Hour => 3_600_000,
            DateUnit::Day => 86_400_000,
        }
    }
}

/// Whole units elapsed from `b` to `a`, floored toward negative infinity.
pub fn diff(a: NaiveDateTime, b: NaiveDateTime, unit: DateUnit) -> i64 {
    (a - b).num_milliseconds().div_euclid(unit.millis())
}

/// Amounts this close to a whole unit are treated as that unit, absorbing
/// float noise from pixel round trips.
const WHOLE_UNIT_EPSILON: f64 = 1e-4;

/// Pixel geometry is `f32`, so the noise in an amount derived from it grows
/// with the amount itself.
const PIXEL_RELATIVE_ERROR: f64 = 8.0 * f32::EPSILON as f64;

fn snap_tolerance(amount: f64) -> f64 {
    WHOLE_UNIT_EPSILON.max(amount.abs() * PIXEL_RELATIVE_ERROR)
}

/// Offset `date` by `amount` units. Only whole units are applied; the
/// fractional part truncates toward zero.
pub fn add(date: NaiveDateTime, amount: f64, unit: DateUnit) -> NaiveDateTime {
    if !amount.is_finite() {
        return date;
    }
    let nearest = amount.round();
    let whole = if (amount - nearest).abs() < snap_tolerance(amount) {
        nearest as i64
    } else {
        amount.trunc() as i64
    };
    let millis = whole.saturating_mul(unit.millis()).max(-i64::MAX);
    date.checked_add_signed(Duration::milliseconds(millis))
        .unwrap_or(date)
}

/// Format a date for display ("MMM D, YYYY").
///
/// Only English month names are produced; other languages fall back to it.
pub fn format(date: NaiveDateTime, language: &str) -> String {
    if !language.eq_ignore_ascii_case("en") {
        tracing::debug!(language, "no localized month names, using English");
    }
    date.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, d)
            .and_then(|date| date.and_hms_opt(h, m, 0))
            .unwrap()
    }

    #[test]
    fn diff_floors_partial_units() {
        assert_eq!(diff(at(2, 1, 30), at(1, 0, 0), DateUnit::Hour), 25);
        assert_eq!(diff(at(2, 1, 30), at(1, 0, 0), DateUnit::Day), 1);
        // Negative spans floor away from zero.
        assert_eq!(diff(at(1, 0, 0), at(1, 1, 30), DateUnit::Hour), -2);
    }

    #[test]
    fn add_truncates_fractional_amounts() {
        assert_eq!(add(at(1, 0, 0), 2.9, DateUnit::Hour), at(1, 2, 0));
        assert_eq!(add(at(1, 3, 0), -1.5, DateUnit::Hour), at(1, 2, 0));
        assert_eq!(add(at(1, 0, 0), f64::NAN, DateUnit::Hour), at(1, 0, 0));
        assert_eq!(add(at(1, 0, 0), 12.999_999_9, DateUnit::Hour), at(1, 13, 0));
    }

    #[test]
    fn add_absorbs_f32_noise_on_large_amounts() {
        // 2588 hours through a 38px/24h column, rounded to f32 pixels.
        let x = (2588.0_f64 / 24.0 * 38.0) as f32;
        let amount = f64::from(x) / 38.0 * 24.0;
        assert!(amount < 2588.0);
        assert_eq!(
            add(at(1, 0, 0), amount, DateUnit::Hour),
            at(1, 0, 0) + Duration::hours(2588)
        );
        // A genuine fraction well away from a whole hour still truncates.
        assert_eq!(add(at(1, 0, 0), 2587.5, DateUnit::Hour), at(1, 0, 0) + Duration::hours(2587));
    }

    #[test]
    fn format_uses_short_month_names() {
        assert_eq!(format(at(5, 10, 0), "en"), "Mar 5, 2024");
        assert_eq!(format(at(5, 10, 0), "fr"), "Mar 5, 2024");
    }
}
