//! Report-only presentation helpers.
//!
//! The adjusted punch list exists so a printed daily schedule reads
//! consistently with the capped display total. It is a view: the stored
//! events are never touched.

use chrono::{DateTime, Duration, Utc};

use crate::engine::REFERENCE_ZONE;
use crate::model::daily::DailyRecord;
use crate::model::punch::{PunchEvent, PunchKind};

/// "Xh Ym" (floor on both parts).
pub fn format_minutes(minutes: i64) -> String {
    let horas = minutes / 60;
    let mins = minutes % 60;
    format!("{horas}h {mins}m")
}

/// Signed variant for time-bank balances: "+2h 15m" / "-0h 30m".
pub fn format_signed_minutes(minutes: i64) -> String {
    let sign = if minutes < 0 { "-" } else { "+" };
    let abs = minutes.abs();
    format!("{sign}{}h {}m", abs / 60, abs % 60)
}

/// "HH:MM" in the reference zone.
pub fn format_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&REFERENCE_ZONE).format("%H:%M").to_string()
}

/// Punch list with a synthetic final saída whose offset from its entrada
/// makes the printed intervals sum exactly to the display total.
///
/// Raw equal to display (no grace band, no cap hit) returns the events
/// unchanged. A day with no countable pair has nothing to anchor the
/// adjustment to and is also returned unchanged.
pub fn display_adjusted_events(record: &DailyRecord) -> Vec<PunchEvent> {
    let mut events = record.events.clone();
    if record.display_minutes == record.worked_minutes {
        return events;
    }

    // Locate the last index-paired (entrada, saída) that counted, and the
    // minutes contributed by the pairs before it.
    let mut last_pair: Option<(usize, usize)> = None;
    let mut earlier_minutes = 0;
    for start in (0..events.len()).step_by(2) {
        let Some(saida) = events.get(start + 1) else { break };
        let entrada = &events[start];
        if entrada.kind == PunchKind::ClockIn
            && saida.kind == PunchKind::ClockOut
            && saida.occurred_at > entrada.occurred_at
        {
            if let Some((prev_in, prev_out)) = last_pair {
                earlier_minutes +=
                    (events[prev_out].occurred_at - events[prev_in].occurred_at).num_minutes();
            }
            last_pair = Some((start, start + 1));
        }
    }

    if let Some((entrada_idx, saida_idx)) = last_pair {
        let final_gap = (record.display_minutes - earlier_minutes).max(0);
        events[saida_idx].occurred_at =
            events[entrada_idx].occurred_at + Duration::minutes(final_gap);
    }
    events
}
