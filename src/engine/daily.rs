//! Worked-minutes walk and day classification.
//!
//! The walk pairs events by position (0-1, 2-3, ...), not by alternation.
//! Malformed stored sequences are accepted and simply contribute less time;
//! turning them into errors would change historical report output.

use crate::model::daily::DayStatus;
use crate::model::punch::{PunchEvent, PunchKind};

/// Raw worked minutes for one ordered event list.
///
/// A pair counts only when it reads (entrada, saída) with the saída strictly
/// after the entrada. Anything else, including a trailing odd event, adds
/// zero.
pub fn worked_minutes(events: &[PunchEvent]) -> i64 {
    if events.len() < 2 {
        return 0;
    }

    let mut total = 0;
    for pair in events.chunks(2) {
        if let [entrada, saida] = pair {
            if entrada.kind == PunchKind::ClockIn
                && saida.kind == PunchKind::ClockOut
                && saida.occurred_at > entrada.occurred_at
            {
                total += (saida.occurred_at - entrada.occurred_at).num_minutes();
            }
        }
    }
    total
}

/// Whether a day has at least one entrada and one saída.
pub fn is_complete(events: &[PunchEvent]) -> bool {
    if events.len() < 2 {
        return false;
    }
    events.iter().any(|e| e.kind == PunchKind::ClockIn)
        && events.iter().any(|e| e.kind == PunchKind::ClockOut)
}

/// Status classification. Expects `events` sorted by instant.
///
/// Single-day views look at the latest event; interval views only care
/// whether both kinds appear anywhere in range.
pub fn classify(events: &[PunchEvent], single_day: bool) -> DayStatus {
    if events.is_empty() {
        return DayStatus::NoRecord;
    }

    if single_day {
        if events.len() >= 4 {
            return DayStatus::Complete;
        }
        match events.last().map(|e| e.kind) {
            Some(PunchKind::ClockIn) => DayStatus::Working,
            Some(PunchKind::ClockOut) => DayStatus::Absent,
            None => DayStatus::NoRecord,
        }
    } else {
        let has_entrada = events.iter().any(|e| e.kind == PunchKind::ClockIn);
        let has_saida = events.iter().any(|e| e.kind == PunchKind::ClockOut);
        if has_entrada && has_saida {
            DayStatus::Complete
        } else if has_entrada {
            DayStatus::Working
        } else {
            DayStatus::NoRecord
        }
    }
}
