use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use utoipa::ToSchema;

/// Kind of a single clock event. Serialized with the Portuguese wire names
/// the punch documents have always used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display)]
pub enum PunchKind {
    #[serde(rename = "entrada")]
    #[strum(serialize = "entrada")]
    ClockIn,
    #[serde(rename = "saida")]
    #[strum(serialize = "saida")]
    ClockOut,
}

/// A single stored clock event.
///
/// `calendar_day` is the day key the event was filed under at write time. It
/// is an independent field, never re-derived from `occurred_at`, so existing
/// skew between the two survives round trips untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PunchEvent {
    pub kind: PunchKind,

    #[schema(value_type = String, format = "date-time")]
    pub occurred_at: DateTime<Utc>,

    #[schema(value_type = String, format = "date")]
    pub calendar_day: NaiveDate,

    // Geolocation enrichment captured by the client. Carried through and
    // echoed back, never consumed by any calculation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approximate_address: Option<String>,
}

impl PunchEvent {
    pub fn new(kind: PunchKind, occurred_at: DateTime<Utc>, calendar_day: NaiveDate) -> Self {
        PunchEvent {
            kind,
            occurred_at,
            calendar_day,
            latitude: None,
            longitude: None,
            accuracy: None,
            approximate_address: None,
        }
    }
}

/// The total order every downstream computation relies on: instant ascending.
/// Stable, so events sharing an instant keep their stored order.
pub fn sort_by_instant(events: &mut [PunchEvent]) {
    events.sort_by_key(|e| e.occurred_at);
}
