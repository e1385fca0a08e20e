//! Self-service punch guard.
//!
//! Live punches are validated strictly before they are appended; the
//! tolerant index-paired walk in `daily` only applies to what is already
//! stored.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::model::punch::{PunchEvent, PunchKind};

/// Hard ceiling of punches per employee per day.
pub const DAILY_PUNCH_LIMIT: usize = 4;

/// What the employee is allowed to do next, given today's punches.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PunchStatus {
    pub can_clock_in: bool,
    pub can_clock_out: bool,
    pub daily_limit_reached: bool,
    pub remaining_punches: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_event: Option<PunchEvent>,
}

/// Derives the status snapshot from today's sorted punch list.
pub fn punch_status(today: &[PunchEvent]) -> PunchStatus {
    let last_event = today.last().cloned();
    let remaining = DAILY_PUNCH_LIMIT.saturating_sub(today.len()) as u32;

    if today.len() >= DAILY_PUNCH_LIMIT {
        return PunchStatus {
            can_clock_in: false,
            can_clock_out: false,
            daily_limit_reached: true,
            remaining_punches: 0,
            last_event,
        };
    }

    let (can_in, can_out) = match last_event.as_ref().map(|e| e.kind) {
        None => (true, false),
        Some(PunchKind::ClockIn) => (false, true),
        Some(PunchKind::ClockOut) => (true, false),
    };

    PunchStatus {
        can_clock_in: can_in,
        can_clock_out: can_out,
        daily_limit_reached: false,
        remaining_punches: remaining,
        last_event,
    }
}

/// Rejects a live punch that would break the day's shape: over the limit,
/// same kind twice in a row, saída before any entrada, or less than a full
/// minute since the previous punch.
pub fn check_punch(
    today: &[PunchEvent],
    kind: PunchKind,
    now: DateTime<Utc>,
) -> Result<(), ApiError> {
    if today.len() >= DAILY_PUNCH_LIMIT {
        return Err(ApiError::validation(
            "daily punch limit reached; next punches are only possible tomorrow",
        ));
    }

    if today.is_empty() && kind == PunchKind::ClockOut {
        return Err(ApiError::validation(
            "the first punch of the day must be an entrada",
        ));
    }

    if let Some(last) = today.last() {
        if last.kind == kind {
            return Err(ApiError::validation(format!(
                "cannot register {kind} twice in a row"
            )));
        }
        if (now - last.occurred_at).num_seconds() < 60 {
            return Err(ApiError::validation(
                "wait at least 1 minute between punches",
            ));
        }
    }

    Ok(())
}
