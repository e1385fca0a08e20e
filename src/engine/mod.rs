pub mod batch;
pub mod daily;
pub mod overtime;
pub mod period;
pub mod report;
pub mod status;
pub mod timebank;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Every day key and display time is interpreted in this zone, regardless of
/// where the server runs.
pub const REFERENCE_ZONE: Tz = chrono_tz::America::Sao_Paulo;

/// Local calendar day for an instant, in the reference zone. This is the day
/// key a live punch gets filed under at write time.
pub fn reference_day(at: DateTime<Utc>) -> NaiveDate {
    at.with_timezone(&REFERENCE_ZONE).date_naive()
}
