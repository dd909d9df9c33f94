//! Calendar alignment heuristics for time axes.
//!
//! The pivot visits sorted timestamps once; [`GranularityFlags`] records which
//! calendar boundaries every visited timestamp sits on. The flags then drive a
//! coarsest-first unit cascade and a tick density heuristic.

use chrono::{DateTime, Datelike, FixedOffset, Offset, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::core::primitives::{MILLIS_PER_DAY, millis_to_datetime};

/// Tick density target: roughly one tick per this many pixels.
pub const PIXELS_PER_TICK: f64 = 100.0;

pub const HOUR_DISPLAY_FORMAT: &str = "MMM D, h a";
pub const MINUTE_DISPLAY_FORMAT: &str = "h:mm a";
pub const DAY_TOOLTIP_FORMAT: &str = "ll";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
}

impl TimeUnit {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
        }
    }

    /// Nominal unit length in days.
    #[must_use]
    pub fn step_days(self) -> f64 {
        match self {
            Self::Year => 365.0,
            Self::Month => 30.0,
            Self::Day => 1.0,
            Self::Hour => 1.0 / 24.0,
            Self::Minute => 1.0 / 24.0 / 60.0,
        }
    }

    /// Compact tick label format for sub-day units.
    #[must_use]
    pub fn display_format(self) -> Option<&'static str> {
        match self {
            Self::Hour => Some(HOUR_DISPLAY_FORMAT),
            Self::Minute => Some(MINUTE_DISPLAY_FORMAT),
            Self::Year | Self::Month | Self::Day => None,
        }
    }
}

/// Boundary alignment of every timestamp observed so far.
///
/// Each flag starts `true` and latches to `false` on the first miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GranularityFlags {
    pub day: bool,
    pub week: bool,
    pub month: bool,
    pub year: bool,
    pub hour: bool,
    pub minute: bool,
    day_of_week: Option<Weekday>,
}

impl Default for GranularityFlags {
    fn default() -> Self {
        Self {
            day: true,
            week: true,
            month: true,
            year: true,
            hour: true,
            minute: true,
            day_of_week: None,
        }
    }
}

impl GranularityFlags {
    #[must_use]
    pub fn from_millis<I>(timestamps: I, time_zone: FixedOffset) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        let mut flags = Self::default();
        for millis in timestamps {
            if let Some(time) = millis_to_datetime(millis) {
                flags.observe(time.with_timezone(&time_zone));
            }
        }
        flags
    }

    pub fn observe(&mut self, time: DateTime<FixedOffset>) {
        let reference = *self.day_of_week.get_or_insert(time.weekday());

        self.day = self.day && is_day(time);
        self.week = self.week && is_week(time, reference);
        self.month = self.month && is_month(time);
        self.year = self.year && is_year(time);
        self.hour = self.hour && is_hour(time);
        self.minute = self.minute && is_minute(time);
    }

    /// Weekday of the first observed timestamp.
    #[must_use]
    pub fn reference_day_of_week(&self) -> Option<Weekday> {
        self.day_of_week
    }
}

fn is_minute(time: DateTime<FixedOffset>) -> bool {
    time.nanosecond() == 0 && time.second() == 0
}

fn is_hour(time: DateTime<FixedOffset>) -> bool {
    is_minute(time) && time.minute() == 0
}

fn is_day(time: DateTime<FixedOffset>) -> bool {
    is_hour(time) && time.hour() == 0
}

fn is_week(time: DateTime<FixedOffset>, day_of_week: Weekday) -> bool {
    is_day(time) && time.weekday() == day_of_week
}

fn is_month(time: DateTime<FixedOffset>) -> bool {
    is_day(time) && time.day() == 1
}

fn is_year(time: DateTime<FixedOffset>) -> bool {
    is_month(time) && time.month() == 1
}

/// Span between two epoch-millisecond timestamps, in days.
#[must_use]
pub fn span_days(min_millis: i64, max_millis: i64) -> f64 {
    (max_millis as f64 - min_millis as f64) / MILLIS_PER_DAY
}

/// Coarsest-first unit cascade. Wide spans force coarse units even when the
/// data is not aligned to them.
#[must_use]
pub fn select_time_unit(flags: GranularityFlags, span_days: f64) -> Option<TimeUnit> {
    if flags.year || span_days > 365.0 * 10.0 {
        Some(TimeUnit::Year)
    } else if flags.month || span_days > 30.0 * 10.0 {
        Some(TimeUnit::Month)
    } else if flags.day || span_days > 10.0 {
        Some(TimeUnit::Day)
    } else if flags.hour || span_days > 0.5 {
        Some(TimeUnit::Hour)
    } else if flags.minute {
        Some(TimeUnit::Minute)
    } else {
        None
    }
}

/// Tick spacing in `unit` steps so ticks land about [`PIXELS_PER_TICK`] apart.
///
/// Returns `None` for an empty span or a surface too narrow to measure.
/// Week-aligned day data rounds up to whole weeks.
#[must_use]
pub fn unit_step_size(
    unit: TimeUnit,
    span_days: f64,
    week_aligned: bool,
    surface_width_px: f64,
) -> Option<u64> {
    let measurable = |value: f64| value.is_finite() && value > 0.0;
    if !measurable(span_days) || !measurable(surface_width_px) {
        return None;
    }

    let mut step = (span_days / unit.step_days() / (surface_width_px / PIXELS_PER_TICK)).ceil();
    if week_aligned && unit == TimeUnit::Day {
        step = (step / 7.0).ceil() * 7.0;
    }
    if !step.is_finite() || step < 1.0 {
        return None;
    }
    Some(step as u64)
}

/// Tooltip date format chosen from the finest boundary every point sits on.
#[must_use]
pub fn select_tooltip_format(flags: GranularityFlags) -> Option<&'static str> {
    if flags.day {
        Some(DAY_TOOLTIP_FORMAT)
    } else if flags.hour {
        Some(HOUR_DISPLAY_FORMAT)
    } else if flags.minute {
        Some(MINUTE_DISPLAY_FORMAT)
    } else {
        None
    }
}

/// Result of running the heuristics over one set of timestamps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeAxisInference {
    pub flags: GranularityFlags,
    pub span_days: f64,
    pub unit: Option<TimeUnit>,
    pub step_size: Option<u64>,
    pub tooltip_format: Option<&'static str>,
}

/// Runs flags, unit cascade, step size and tooltip selection over `timestamps`.
///
/// Returns `None` for an empty input.
#[must_use]
pub fn infer_time_axis(
    timestamps: &[i64],
    time_zone: FixedOffset,
    surface_width_px: f64,
) -> Option<TimeAxisInference> {
    let min = timestamps.iter().copied().min()?;
    let max = timestamps.iter().copied().max()?;
    let flags = GranularityFlags::from_millis(timestamps.iter().copied(), time_zone);
    let span = span_days(min, max);
    let unit = select_time_unit(flags, span);
    let step_size =
        unit.and_then(|unit| unit_step_size(unit, span, flags.week, surface_width_px));

    Some(TimeAxisInference {
        flags,
        span_days: span,
        unit,
        step_size,
        tooltip_format: select_tooltip_format(flags),
    })
}

/// UTC convenience used by tests and hosts without a zone preference.
#[must_use]
pub fn utc_offset() -> FixedOffset {
    Utc.fix()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn millis(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> i64 {
        Utc.with_ymd_and_hms(y, m, d, h, min, s)
            .single()
            .expect("valid time")
            .timestamp_millis()
    }

    #[test]
    fn flags_latch_false_after_first_miss() {
        let stamps = [
            millis(2024, 1, 1, 0, 0, 0),
            millis(2024, 1, 1, 13, 0, 0),
            millis(2024, 2, 1, 0, 0, 0),
        ];
        let flags = GranularityFlags::from_millis(stamps, utc_offset());
        assert!(!flags.day);
        assert!(!flags.month);
        assert!(flags.hour);
        assert!(flags.minute);
    }

    #[test]
    fn week_reference_is_fixed_by_first_timestamp() {
        // 2024-01-07 is a Sunday.
        let sundays = [millis(2024, 1, 7, 0, 0, 0), millis(2024, 1, 14, 0, 0, 0)];
        let flags = GranularityFlags::from_millis(sundays, utc_offset());
        assert!(flags.week);
        assert_eq!(flags.reference_day_of_week(), Some(Weekday::Sun));

        let mixed = [millis(2024, 1, 7, 0, 0, 0), millis(2024, 1, 8, 0, 0, 0)];
        assert!(!GranularityFlags::from_millis(mixed, utc_offset()).week);
    }

    #[test]
    fn offsets_shift_calendar_boundaries() {
        let midnight_utc = [millis(2024, 3, 1, 0, 0, 0)];
        let plus_two = FixedOffset::east_opt(2 * 3600).expect("offset");
        let flags = GranularityFlags::from_millis(midnight_utc, plus_two);
        assert!(!flags.day);
        assert!(flags.hour);
    }

    #[test]
    fn cascade_prefers_coarsest_aligned_unit() {
        let mut flags = GranularityFlags::default();
        assert_eq!(select_time_unit(flags, 400.0), Some(TimeUnit::Year));

        flags.year = false;
        assert_eq!(select_time_unit(flags, 400.0), Some(TimeUnit::Month));

        flags.month = false;
        flags.day = false;
        flags.hour = false;
        flags.minute = false;
        assert_eq!(select_time_unit(flags, 20.0), Some(TimeUnit::Day));
        assert_eq!(select_time_unit(flags, 0.75), Some(TimeUnit::Hour));
        assert_eq!(select_time_unit(flags, 0.1), None);
    }

    #[test]
    fn step_size_skips_empty_span_and_rounds_weeks() {
        assert_eq!(unit_step_size(TimeUnit::Day, 0.0, true, 800.0), None);
        assert_eq!(unit_step_size(TimeUnit::Day, 5.0, false, 800.0), Some(1));
        assert_eq!(unit_step_size(TimeUnit::Day, 90.0, false, 300.0), Some(30));
        assert_eq!(unit_step_size(TimeUnit::Day, 90.0, true, 300.0), Some(35));
        assert_eq!(unit_step_size(TimeUnit::Month, 90.0, true, 300.0), Some(1));
        assert_eq!(unit_step_size(TimeUnit::Day, 5.0, false, 0.0), None);
    }
}
