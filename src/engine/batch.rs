//! Administrative batch entry: up to four manually-typed punches for one
//! employee and day, validated strictly before anything is persisted.

use chrono::{NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::engine::REFERENCE_ZONE;
use crate::engine::status::DAILY_PUNCH_LIMIT;
use crate::error::ApiError;
use crate::model::punch::{PunchEvent, PunchKind};

/// One proposed entry: a kind plus a wall-clock time of day.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BatchEntry {
    pub kind: PunchKind,
    /// "HH:MM" in the reference zone.
    #[schema(example = "08:00")]
    pub time: String,
}

fn parse_time(raw: &str) -> Result<NaiveTime, ApiError> {
    let bytes = raw.as_bytes();
    let shape_ok = bytes.len() == 5
        && bytes[2] == b':'
        && bytes[0].is_ascii_digit()
        && bytes[1].is_ascii_digit()
        && bytes[3].is_ascii_digit()
        && bytes[4].is_ascii_digit();
    if !shape_ok {
        return Err(ApiError::validation(format!("invalid time: {raw}")));
    }
    NaiveTime::parse_from_str(raw, "%H:%M")
        .map_err(|_| ApiError::validation(format!("invalid time: {raw}")))
}

fn local_instant(
    day: NaiveDate,
    time: NaiveTime,
    zone: Tz,
) -> Result<chrono::DateTime<chrono::Utc>, ApiError> {
    // Skipped local times (DST gap) cannot be represented faithfully.
    let local = match zone.from_local_datetime(&day.and_time(time)) {
        chrono::LocalResult::Single(at) => at,
        chrono::LocalResult::Ambiguous(earliest, _) => earliest,
        chrono::LocalResult::None => {
            return Err(ApiError::validation(format!(
                "time {time} does not exist on {day} in {zone}"
            )));
        }
    };
    Ok(local.with_timezone(&chrono::Utc))
}

/// Validates a batch and, on success, emits the punch events ready to be
/// appended to the target day's stored list.
///
/// Rules, in order: at most four entries; entries sorted by time of day;
/// strict HH:MM times; kinds alternate after sorting; consecutive entries at
/// least one minute apart.
pub fn validate_batch(
    day: NaiveDate,
    entries: &[BatchEntry],
) -> Result<Vec<PunchEvent>, ApiError> {
    if entries.len() > DAILY_PUNCH_LIMIT {
        return Err(ApiError::validation(format!(
            "cannot register more than {DAILY_PUNCH_LIMIT} punches per day"
        )));
    }

    let mut sorted: Vec<&BatchEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| a.time.cmp(&b.time));

    let mut times: Vec<NaiveTime> = Vec::with_capacity(sorted.len());
    for (i, entry) in sorted.iter().enumerate() {
        let time = parse_time(&entry.time)?;

        if i > 0 {
            if entry.kind == sorted[i - 1].kind {
                return Err(ApiError::validation(
                    "cannot register entrada/saida consecutively",
                ));
            }
            let spacing = (time - times[i - 1]).num_minutes();
            if spacing < 1 {
                return Err(ApiError::validation(
                    "minimum spacing of 1 minute between punches",
                ));
            }
        }
        times.push(time);
    }

    sorted
        .iter()
        .zip(times)
        .map(|(entry, time)| {
            let at = local_instant(day, time, REFERENCE_ZONE)?;
            Ok(PunchEvent::new(entry.kind, at, day))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn d() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()
    }

    fn entry(kind: PunchKind, time: &str) -> BatchEntry {
        BatchEntry { kind, time: time.into() }
    }

    #[test]
    fn accepts_an_alternating_sorted_day() {
        let entries = [
            entry(PunchKind::ClockIn, "08:00"),
            entry(PunchKind::ClockOut, "12:00"),
            entry(PunchKind::ClockIn, "13:00"),
            entry(PunchKind::ClockOut, "17:48"),
        ];
        let events = validate_batch(d(), &entries).unwrap();
        assert_eq!(events.len(), 4);
        assert!(events.iter().all(|e| e.calendar_day == d()));
        assert_eq!(crate::engine::daily::worked_minutes(&events), 240 + 288);
    }

    #[test]
    fn sorts_by_time_before_checking_alternation() {
        // out of order as typed, alternating once sorted
        let entries = [
            entry(PunchKind::ClockOut, "12:00"),
            entry(PunchKind::ClockIn, "08:00"),
        ];
        let events = validate_batch(d(), &entries).unwrap();
        assert_eq!(events[0].kind, PunchKind::ClockIn);
        assert_eq!(events[1].kind, PunchKind::ClockOut);
    }

    #[test]
    fn rejects_more_than_four_entries() {
        let entries = vec![
            entry(PunchKind::ClockIn, "08:00"),
            entry(PunchKind::ClockOut, "09:00"),
            entry(PunchKind::ClockIn, "10:00"),
            entry(PunchKind::ClockOut, "11:00"),
            entry(PunchKind::ClockIn, "12:00"),
        ];
        assert!(validate_batch(d(), &entries).is_err());
    }

    #[test]
    fn rejects_bad_time_shapes() {
        for bad in ["8:00", "08-00", "25:00", "08:61", "0800", ""] {
            let entries = [entry(PunchKind::ClockIn, bad)];
            assert!(validate_batch(d(), &entries).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn rejects_consecutive_same_kind() {
        let entries = [
            entry(PunchKind::ClockIn, "08:00"),
            entry(PunchKind::ClockIn, "09:00"),
        ];
        assert!(validate_batch(d(), &entries).is_err());
    }

    #[test]
    fn rejects_sub_minute_spacing_and_accepts_one_minute() {
        let zero = [
            entry(PunchKind::ClockIn, "08:00"),
            entry(PunchKind::ClockOut, "08:00"),
        ];
        assert!(validate_batch(d(), &zero).is_err());

        let one = [
            entry(PunchKind::ClockIn, "08:00"),
            entry(PunchKind::ClockOut, "08:01"),
        ];
        assert!(validate_batch(d(), &one).is_ok());
    }

    #[test]
    fn instants_land_on_the_target_day_in_sao_paulo() {
        let entries = [entry(PunchKind::ClockIn, "08:00")];
        let events = validate_batch(d(), &entries).unwrap();
        // São Paulo is UTC-3 year round since 2019
        assert_eq!(
            events[0].occurred_at,
            chrono::Utc
                .with_ymd_and_hms(2024, 5, 6, 11, 0, 0)
                .unwrap()
        );
    }
}
