//! The two overtime policies and the display-hours rule.
//!
//! The report and the dashboard have never agreed on what "hora extra"
//! means. The report subtracts a two-hour grace band above the jornada
//! normal and caps credited overtime at two hours; the dashboard counts
//! every minute past the jornada normal, uncapped. Both are kept as distinct
//! functions on purpose: unifying them would silently rewrite historical
//! report numbers.

/// Jornada normal: 8h48m.
pub const NORMAL_SHIFT_MINUTES: i64 = 8 * 60 + 48;

/// Report-policy overtime starts here: 10h48m (jornada normal + grace band).
pub const OVERTIME_START_MINUTES: i64 = NORMAL_SHIFT_MINUTES + 120;

/// Max overtime credited per day under the report policy.
pub const MAX_OVERTIME_MINUTES: i64 = 120;

/// Report-policy overtime: time past 10h48m, capped at 2h.
pub fn report_overtime_minutes(raw_minutes: i64) -> i64 {
    (raw_minutes - OVERTIME_START_MINUTES).clamp(0, MAX_OVERTIME_MINUTES)
}

/// Reportable worked minutes for a day.
///
/// Time inside the grace band (between 8h48m and 10h48m) is subtracted out:
/// it earns no overtime and never shows up in the displayed total.
pub fn display_worked_minutes(raw_minutes: i64) -> i64 {
    if raw_minutes <= OVERTIME_START_MINUTES {
        raw_minutes.min(NORMAL_SHIFT_MINUTES)
    } else {
        NORMAL_SHIFT_MINUTES + report_overtime_minutes(raw_minutes)
    }
}

/// Dashboard-policy overtime: every minute past the jornada normal, no grace
/// band, no cap.
pub fn dashboard_overtime_minutes(raw_minutes: i64) -> i64 {
    (raw_minutes - NORMAL_SHIFT_MINUTES).max(0)
}
