use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::daily::DailyRecord;
use crate::model::employee::Cpf;

/// Aggregate over an inclusive date range for one employee. All totals use
/// the capped display minutes; the raw figures stay inside each DailyRecord.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PeriodSummary {
    #[schema(value_type = String)]
    pub cpf: Cpf,

    #[schema(value_type = String, format = "date")]
    pub start: NaiveDate,

    #[schema(value_type = String, format = "date")]
    pub end: NaiveDate,

    /// One record per calendar day in range that has any punches, ascending.
    pub days: Vec<DailyRecord>,

    pub total_worked_minutes: i64,
    pub total_overtime_minutes: i64,

    /// Days classified complete.
    pub days_worked: u32,
    pub days_with_records: u32,
    pub days_with_overtime: u32,

    /// Statistics over days with nonzero display minutes; zeros when none.
    pub average_worked_minutes: f64,
    pub max_daily_minutes: i64,
    pub min_daily_minutes: i64,
}
