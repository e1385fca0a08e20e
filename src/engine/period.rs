//! Aggregation over an inclusive date range.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::engine::{daily, overtime};
use crate::error::ApiError;
use crate::model::daily::DailyRecord;
use crate::model::employee::Cpf;
use crate::model::period::PeriodSummary;
use crate::model::punch::{self, PunchEvent};

/// Resolves an optional end date (defaults to the start) and rejects an
/// inverted range before anything is computed.
pub fn resolve_range(
    start: NaiveDate,
    end: Option<NaiveDate>,
) -> Result<(NaiveDate, NaiveDate), ApiError> {
    let end = end.unwrap_or(start);
    if end < start {
        return Err(ApiError::InvalidRange { start, end });
    }
    Ok((start, end))
}

/// Inclusive range for a calendar month, rejecting months in the future or
/// before the system existed.
pub fn month_range(
    month: u32,
    year: i32,
    today: NaiveDate,
) -> Result<(NaiveDate, NaiveDate), ApiError> {
    use chrono::Datelike;

    if !(1..=12).contains(&month) {
        return Err(ApiError::validation(format!("invalid month: {month}")));
    }
    if year < 2020 {
        return Err(ApiError::validation(format!("invalid year: {year}")));
    }
    if year > today.year() || (year == today.year() && month > today.month()) {
        return Err(ApiError::validation(format!(
            "month {month}/{year} is in the future"
        )));
    }

    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| ApiError::validation(format!("invalid month: {month}")))?;
    let end = if month == 12 {
        NaiveDate::from_ymd_opt(year, 12, 31)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1).and_then(|d| d.pred_opt())
    }
    .ok_or_else(|| ApiError::validation(format!("invalid month: {month}")))?;

    Ok((start, end))
}

/// Builds a DailyRecord for one day's events (sorted internally).
pub fn daily_record(day: NaiveDate, mut events: Vec<PunchEvent>, single_day: bool) -> DailyRecord {
    punch::sort_by_instant(&mut events);
    let worked = daily::worked_minutes(&events);
    DailyRecord {
        day,
        worked_minutes: worked,
        display_minutes: overtime::display_worked_minutes(worked),
        overtime_minutes: overtime::report_overtime_minutes(worked),
        is_complete: daily::is_complete(&events),
        status: daily::classify(&events, single_day),
        events,
    }
}

/// Builds the period summary for one employee from the per-day punch map.
///
/// Only days inside the range that have at least one punch produce a record.
/// Totals use display minutes; statistics cover days with nonzero display
/// minutes and fall back to zeros for an empty set.
pub fn build_summary(
    cpf: &Cpf,
    start: NaiveDate,
    end: Option<NaiveDate>,
    punches: &BTreeMap<NaiveDate, Vec<PunchEvent>>,
) -> Result<PeriodSummary, ApiError> {
    let (start, end) = resolve_range(start, end)?;
    let single_day = start == end;

    let mut days: Vec<DailyRecord> = punches
        .range(start..=end)
        .filter(|(_, events)| !events.is_empty())
        .map(|(day, events)| daily_record(*day, events.clone(), single_day))
        .collect();
    days.sort_by_key(|d| d.day);

    let total_worked_minutes: i64 = days.iter().map(|d| d.display_minutes).sum();
    let total_overtime_minutes: i64 = days.iter().map(|d| d.overtime_minutes).sum();

    let nonzero: Vec<i64> = days
        .iter()
        .map(|d| d.display_minutes)
        .filter(|m| *m > 0)
        .collect();

    let average_worked_minutes = if nonzero.is_empty() {
        0.0
    } else {
        total_worked_minutes as f64 / nonzero.len() as f64
    };

    Ok(PeriodSummary {
        cpf: cpf.clone(),
        start,
        end,
        total_worked_minutes,
        total_overtime_minutes,
        days_worked: days.iter().filter(|d| d.is_complete).count() as u32,
        days_with_records: days.len() as u32,
        days_with_overtime: days.iter().filter(|d| d.overtime_minutes > 0).count() as u32,
        average_worked_minutes,
        max_daily_minutes: nonzero.iter().copied().max().unwrap_or(0),
        min_daily_minutes: nonzero.iter().copied().min().unwrap_or(0),
        days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::daily::DayStatus;
    use crate::model::punch::PunchKind;
    use chrono::{TimeZone, Utc};

    fn cpf() -> Cpf {
        Cpf("12345678900".into())
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    fn punch(day: u32, kind: PunchKind, hour: u32, minute: u32) -> PunchEvent {
        let at = Utc.with_ymd_and_hms(2024, 5, day, hour, minute, 0).unwrap();
        PunchEvent::new(kind, at, d(day))
    }

    fn workday(day: u32, out_hour: u32, out_minute: u32) -> (NaiveDate, Vec<PunchEvent>) {
        (
            d(day),
            vec![
                punch(day, PunchKind::ClockIn, 8, 0),
                punch(day, PunchKind::ClockOut, 12, 0),
                punch(day, PunchKind::ClockIn, 13, 0),
                punch(day, PunchKind::ClockOut, out_hour, out_minute),
            ],
        )
    }

    #[test]
    fn inverted_range_is_rejected_with_no_partial_result() {
        let punches = BTreeMap::from([workday(1, 17, 0)]);
        let err = build_summary(&cpf(), d(10), Some(d(1)), &punches).unwrap_err();
        assert!(matches!(err, ApiError::InvalidRange { .. }));
    }

    #[test]
    fn end_date_defaults_to_start() {
        let punches = BTreeMap::from([workday(6, 17, 48), workday(7, 17, 48)]);
        let summary = build_summary(&cpf(), d(6), None, &punches).unwrap();
        assert_eq!(summary.end, d(6));
        assert_eq!(summary.days_with_records, 1);
        // single-day view classifies by latest event
        assert_eq!(summary.days[0].status, DayStatus::Complete);
    }

    #[test]
    fn grace_band_day_displays_the_jornada_normal() {
        // 08:00-12:00 + 13:00-18:48 = 9h48 raw
        let punches = BTreeMap::from([workday(6, 18, 48)]);
        let summary = build_summary(&cpf(), d(6), None, &punches).unwrap();
        let day = &summary.days[0];
        assert_eq!(day.worked_minutes, 588);
        assert_eq!(day.display_minutes, 528);
        assert_eq!(day.overtime_minutes, 0);
        assert_eq!(summary.total_worked_minutes, 528);
    }

    #[test]
    fn totals_and_stats_span_the_range() {
        let punches = BTreeMap::from([
            workday(6, 16, 48),  // 7h48 raw -> display 468
            workday(7, 17, 48),  // 8h48 raw -> display 528
            workday(8, 21, 0),   // 12h raw -> display 528 + 72 overtime
            (d(9), vec![punch(9, PunchKind::ClockIn, 8, 0)]), // odd, zero minutes
        ]);
        let summary = build_summary(&cpf(), d(1), Some(d(31)), &punches).unwrap();

        assert_eq!(summary.days_with_records, 4);
        assert_eq!(summary.days_worked, 3);
        assert_eq!(summary.total_worked_minutes, 468 + 528 + 600);
        assert_eq!(summary.total_overtime_minutes, 72);
        assert_eq!(summary.days_with_overtime, 1);
        assert_eq!(summary.max_daily_minutes, 600);
        assert_eq!(summary.min_daily_minutes, 468);
        let expected_avg = (468 + 528 + 600) as f64 / 3.0;
        assert!((summary.average_worked_minutes - expected_avg).abs() < 1e-9);
        // interval view: period classification
        assert_eq!(summary.days[3].status, DayStatus::Working);
    }

    #[test]
    fn empty_range_yields_zeroed_stats() {
        let punches = BTreeMap::new();
        let summary = build_summary(&cpf(), d(1), Some(d(31)), &punches).unwrap();
        assert_eq!(summary.days_with_records, 0);
        assert_eq!(summary.average_worked_minutes, 0.0);
        assert_eq!(summary.max_daily_minutes, 0);
        assert_eq!(summary.min_daily_minutes, 0);
    }

    #[test]
    fn month_range_covers_the_whole_month() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let (start, end) = month_range(5, 2024, today).unwrap();
        assert_eq!(start, d(1));
        assert_eq!(end, d(31));

        let (_, end) = month_range(12, 2023, today).unwrap();
        assert_eq!(end, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
    }

    #[test]
    fn month_range_rejects_future_and_nonsense() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert!(month_range(7, 2024, today).is_err());
        assert!(month_range(13, 2024, today).is_err());
        assert!(month_range(1, 2019, today).is_err());
        assert!(month_range(6, 2024, today).is_ok());
    }
}
