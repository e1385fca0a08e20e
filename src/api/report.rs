use actix_web::{HttpResponse, Responder, web};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::engine::{period, reference_day, report, timebank};
use crate::error::ApiError;
use crate::model::employee::{Cpf, Employee};
use crate::model::punch::PunchKind;
use crate::model::timebank::TimeBankEntry;
use crate::store::PunchStore;

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ReportQuery {
    #[schema(example = 5)]
    pub month: u32,
    #[schema(example = 2024)]
    pub year: i32,
}

/// One printed punch line: kind plus wall-clock time, already display
/// adjusted.
#[derive(Serialize, ToSchema)]
pub struct ReportPunch {
    pub kind: PunchKind,
    #[schema(example = "08:00")]
    pub time: String,
}

#[derive(Serialize, ToSchema)]
pub struct ReportDay {
    #[schema(value_type = String, format = "date")]
    pub day: NaiveDate,

    /// Adjusted for display: the final saída is synthetic whenever the raw
    /// total exceeds what the report credits.
    pub punches: Vec<ReportPunch>,

    pub worked_minutes: i64,
    #[schema(example = "8h 48m")]
    pub worked_formatted: String,

    pub overtime_minutes: i64,
    /// "-" when the day earned no overtime, mirroring the printed column.
    #[schema(example = "-")]
    pub overtime_formatted: String,

    pub complete: bool,
}

#[derive(Serialize, ToSchema)]
pub struct ReportStats {
    pub average_daily_minutes: f64,
    pub max_daily_minutes: i64,
    pub min_daily_minutes: i64,
    pub days_with_overtime: u32,
}

#[derive(Serialize, ToSchema)]
pub struct MonthlyReportResponse {
    pub employee: Employee,
    pub month: u32,
    pub year: i32,

    pub total_worked_minutes: i64,
    #[schema(example = "176h 0m")]
    pub total_worked_formatted: String,

    pub total_overtime_minutes: i64,
    pub total_overtime_formatted: String,

    pub days_worked: u32,
    pub days_with_records: u32,

    pub days: Vec<ReportDay>,
    pub stats: ReportStats,
}

/// Monthly report data for one employee
#[utoipa::path(
    get,
    path = "/api/report/{cpf}",
    params(("cpf", description = "Employee CPF"), ReportQuery),
    responses(
        (status = 200, body = MonthlyReportResponse),
        (status = 400, description = "Invalid month/year"),
        (status = 404, description = "Unknown employee")
    ),
    tag = "Report"
)]
pub async fn monthly_report(
    store: web::Data<dyn PunchStore>,
    path: web::Path<String>,
    query: web::Query<ReportQuery>,
) -> Result<impl Responder, ApiError> {
    let cpf = Cpf(path.into_inner());
    let employee = store.employee(&cpf)?;

    let today = reference_day(Utc::now());
    let (start, end) = period::month_range(query.month, query.year, today)?;

    let punches = store.punches(&cpf)?;
    let summary = period::build_summary(&cpf, start, Some(end), &punches)?;

    let days: Vec<ReportDay> = summary
        .days
        .iter()
        .map(|record| {
            let punches = report::display_adjusted_events(record)
                .into_iter()
                .map(|e| ReportPunch {
                    kind: e.kind,
                    time: report::format_time(e.occurred_at),
                })
                .collect();
            ReportDay {
                day: record.day,
                punches,
                worked_minutes: record.display_minutes,
                worked_formatted: report::format_minutes(record.display_minutes),
                overtime_minutes: record.overtime_minutes,
                overtime_formatted: if record.overtime_minutes > 0 {
                    report::format_minutes(record.overtime_minutes)
                } else {
                    "-".to_string()
                },
                complete: record.is_complete,
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(MonthlyReportResponse {
        employee,
        month: query.month,
        year: query.year,
        total_worked_minutes: summary.total_worked_minutes,
        total_worked_formatted: report::format_minutes(summary.total_worked_minutes),
        total_overtime_minutes: summary.total_overtime_minutes,
        total_overtime_formatted: report::format_minutes(summary.total_overtime_minutes),
        days_worked: summary.days_worked,
        days_with_records: summary.days_with_records,
        days,
        stats: ReportStats {
            average_daily_minutes: summary.average_worked_minutes,
            max_daily_minutes: summary.max_daily_minutes,
            min_daily_minutes: summary.min_daily_minutes,
            days_with_overtime: summary.days_with_overtime,
        },
    }))
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct TimeBankQuery {
    #[schema(example = "2024-05-01", value_type = String, format = "date")]
    pub start: NaiveDate,
    /// Defaults to `start` when absent.
    #[schema(example = "2024-05-31", value_type = String, format = "date")]
    pub end: Option<NaiveDate>,
}

#[derive(Serialize, ToSchema)]
pub struct TimeBankResponse {
    #[schema(value_type = String, format = "date")]
    pub start: NaiveDate,
    #[schema(value_type = String, format = "date")]
    pub end: NaiveDate,
    /// Sorted by balance, highest credit first.
    pub entries: Vec<TimeBankEntry>,
}

/// Banco de horas balances for every employee over a range
#[utoipa::path(
    get,
    path = "/api/time-bank",
    params(TimeBankQuery),
    responses(
        (status = 200, body = TimeBankResponse),
        (status = 400, description = "Inverted date range")
    ),
    tag = "Report"
)]
pub async fn time_bank(
    store: web::Data<dyn PunchStore>,
    query: web::Query<TimeBankQuery>,
) -> Result<impl Responder, ApiError> {
    let (start, end) = period::resolve_range(query.start, query.end)?;

    let mut entries = Vec::new();
    for employee in store.list_employees() {
        let punches = store.punches(&employee.cpf)?;
        entries.push(timebank::build_entry(&employee, &punches, start, Some(end))?);
    }
    entries.sort_by(|a, b| b.balance_minutes.cmp(&a.balance_minutes));

    Ok(HttpResponse::Ok().json(TimeBankResponse { start, end, entries }))
}
