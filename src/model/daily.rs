use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use utoipa::ToSchema;

use crate::model::punch::PunchEvent;

/// Completeness classification for a day (or for a whole period on the
/// dashboard). Wire names match the original Portuguese status strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display)]
pub enum DayStatus {
    #[serde(rename = "sem_registro")]
    #[strum(serialize = "sem_registro")]
    NoRecord,
    #[serde(rename = "trabalhando")]
    #[strum(serialize = "trabalhando")]
    Working,
    #[serde(rename = "ausente")]
    #[strum(serialize = "ausente")]
    Absent,
    #[serde(rename = "completo")]
    #[strum(serialize = "completo")]
    Complete,
}

/// Derived view of one calendar day. Computed on demand from the stored
/// punches, never persisted.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DailyRecord {
    #[schema(value_type = String, format = "date")]
    pub day: NaiveDate,

    /// Events sorted by instant ascending.
    pub events: Vec<PunchEvent>,

    /// Raw index-paired total. Feeds the time-bank, never a report column.
    pub worked_minutes: i64,

    /// Report total after the grace band and the 2h overtime cap.
    pub display_minutes: i64,

    /// Report-policy overtime (capped at 120 minutes).
    pub overtime_minutes: i64,

    pub is_complete: bool,
    pub status: DayStatus,
}
