//! Banco de horas: signed balance of raw worked minutes against the full-day
//! quota, accumulated over a range. Uses the raw walk output, not the capped
//! display value, and applies no per-day cap.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::engine::daily;
use crate::engine::period::resolve_range;
use crate::engine::report::format_signed_minutes;
use crate::error::ApiError;
use crate::model::employee::Employee;
use crate::model::punch::{self, PunchEvent};
use crate::model::timebank::{BalanceKind, TimeBankEntry};

/// Full-day quota: 10h48m. Deliberately the same figure as the report
/// policy's overtime start, and distinct from the jornada normal.
pub const FULL_DAY_QUOTA_MINUTES: i64 = 10 * 60 + 48;

pub fn classify_balance(balance_minutes: i64) -> BalanceKind {
    match balance_minutes {
        m if m > 0 => BalanceKind::Credit,
        m if m < 0 => BalanceKind::Debit,
        _ => BalanceKind::Neutral,
    }
}

/// Sum over days in range with any punches of (raw worked − quota).
pub fn balance_minutes(
    punches: &BTreeMap<NaiveDate, Vec<PunchEvent>>,
    start: NaiveDate,
    end: NaiveDate,
) -> i64 {
    punches
        .range(start..=end)
        .filter(|(_, events)| !events.is_empty())
        .map(|(_, events)| {
            let mut events = events.clone();
            punch::sort_by_instant(&mut events);
            daily::worked_minutes(&events) - FULL_DAY_QUOTA_MINUTES
        })
        .sum()
}

pub fn build_entry(
    employee: &Employee,
    punches: &BTreeMap<NaiveDate, Vec<PunchEvent>>,
    start: NaiveDate,
    end: Option<NaiveDate>,
) -> Result<TimeBankEntry, ApiError> {
    let (start, end) = resolve_range(start, end)?;
    let balance = balance_minutes(punches, start, end);
    Ok(TimeBankEntry {
        cpf: employee.cpf.clone(),
        nome: employee.nome.clone(),
        balance_minutes: balance,
        balance_formatted: format_signed_minutes(balance),
        classification: classify_balance(balance),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::punch::PunchKind;
    use chrono::{TimeZone, Utc};

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    fn shift(day: u32, minutes: i64) -> (NaiveDate, Vec<PunchEvent>) {
        let start = Utc.with_ymd_and_hms(2024, 5, day, 8, 0, 0).unwrap();
        let end = start + chrono::Duration::minutes(minutes);
        (
            d(day),
            vec![
                PunchEvent::new(PunchKind::ClockIn, start, d(day)),
                PunchEvent::new(PunchKind::ClockOut, end, d(day)),
            ],
        )
    }

    #[test]
    fn exact_quota_contributes_zero() {
        let punches = BTreeMap::from([shift(6, FULL_DAY_QUOTA_MINUTES)]);
        assert_eq!(balance_minutes(&punches, d(1), d(31)), 0);
        assert_eq!(classify_balance(0), BalanceKind::Neutral);
    }

    #[test]
    fn one_minute_either_side_moves_the_balance_by_one() {
        let short = BTreeMap::from([shift(6, FULL_DAY_QUOTA_MINUTES - 1)]);
        assert_eq!(balance_minutes(&short, d(1), d(31)), -1);

        let long = BTreeMap::from([shift(6, FULL_DAY_QUOTA_MINUTES + 1)]);
        assert_eq!(balance_minutes(&long, d(1), d(31)), 1);
    }

    #[test]
    fn balance_accumulates_across_days_without_a_cap() {
        let punches = BTreeMap::from([
            shift(6, FULL_DAY_QUOTA_MINUTES + 300), // way past the overtime cap
            shift(7, FULL_DAY_QUOTA_MINUTES - 100),
        ]);
        assert_eq!(balance_minutes(&punches, d(1), d(31)), 200);
        assert_eq!(classify_balance(200), BalanceKind::Credit);
        assert_eq!(classify_balance(-200), BalanceKind::Debit);
    }

    #[test]
    fn days_outside_the_range_are_ignored() {
        let punches = BTreeMap::from([shift(6, FULL_DAY_QUOTA_MINUTES + 60)]);
        assert_eq!(balance_minutes(&punches, d(10), d(20)), 0);
    }

    #[test]
    fn entry_carries_formatted_balance_and_classification() {
        let employee = Employee {
            cpf: crate::model::employee::Cpf("111".into()),
            nome: "Maria".into(),
            departamento: None,
            email: None,
        };
        let punches = BTreeMap::from([shift(6, FULL_DAY_QUOTA_MINUTES - 135)]);
        let entry = build_entry(&employee, &punches, d(1), Some(d(31))).unwrap();
        assert_eq!(entry.balance_minutes, -135);
        assert_eq!(entry.balance_formatted, "-2h 15m");
        assert_eq!(entry.classification, BalanceKind::Debit);
    }
}
