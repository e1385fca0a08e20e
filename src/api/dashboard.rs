use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::engine::{daily, overtime, period, report};
use crate::error::ApiError;
use crate::model::daily::DayStatus;
use crate::model::employee::Cpf;
use crate::model::punch::{self, PunchEvent, PunchKind};
use crate::store::PunchStore;

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct DashboardQuery {
    #[schema(example = "2024-05-06", value_type = String, format = "date")]
    pub start: NaiveDate,

    /// Defaults to `start` when absent.
    #[schema(example = "2024-05-10", value_type = String, format = "date")]
    pub end: Option<NaiveDate>,

    /// Substring filter on CPF.
    pub cpf: Option<String>,

    /// Case-insensitive substring filter on name.
    pub nome: Option<String>,

    pub status: Option<DayStatus>,
}

/// One employee row. Status, overtime and the four positional punches only
/// make sense for a single-day view; interval views leave them out.
#[derive(Serialize, ToSchema)]
pub struct DashboardRow {
    #[schema(value_type = String)]
    pub cpf: Cpf,
    pub nome: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub departamento: Option<String>,

    /// Raw worked minutes over the range (dashboard shows uncapped time).
    pub worked_minutes: i64,
    #[schema(example = "8h 48m")]
    pub worked_formatted: String,

    pub total_punches: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DayStatus>,

    /// Dashboard-policy overtime, formatted; None when not applicable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overtime_formatted: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub entrada_inicial: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saida_inicial: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entrada_final: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saida_final: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_employees: u32,
    pub working: u32,
    pub absent: u32,
    pub complete: u32,
    pub no_record: u32,
    pub total_worked_minutes: i64,
    pub average_minutes_per_employee: f64,
    pub total_punches: u32,
}

#[derive(Serialize, ToSchema)]
pub struct DashboardResponse {
    #[schema(value_type = String, format = "date")]
    pub start: NaiveDate,
    #[schema(value_type = String, format = "date")]
    pub end: NaiveDate,
    pub single_day: bool,
    pub employees: Vec<DashboardRow>,
    pub stats: DashboardStats,
}

/// The four positional punches of a single-day view: slots 0-3 read as
/// entrada inicial, saída inicial, entrada final, saída final, each shown
/// only when the event at that slot has the expected kind.
fn positional_punch(events: &[PunchEvent], index: usize, kind: PunchKind) -> Option<String> {
    events
        .get(index)
        .filter(|e| e.kind == kind)
        .map(|e| report::format_time(e.occurred_at))
}

/// Admin dashboard rows over a date range
#[utoipa::path(
    get,
    path = "/api/dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, body = DashboardResponse),
        (status = 400, description = "Inverted date range")
    ),
    tag = "Dashboard"
)]
pub async fn dashboard(
    store: web::Data<dyn PunchStore>,
    query: web::Query<DashboardQuery>,
) -> Result<impl Responder, ApiError> {
    let (start, end) = period::resolve_range(query.start, query.end)?;
    let single_day = start == end;

    let mut rows = Vec::new();
    for employee in store.list_employees() {
        if let Some(cpf_filter) = &query.cpf {
            if !employee.cpf.0.contains(cpf_filter) {
                continue;
            }
        }
        if let Some(nome_filter) = &query.nome {
            if !employee
                .nome
                .to_lowercase()
                .contains(&nome_filter.to_lowercase())
            {
                continue;
            }
        }

        // The dashboard works on the flattened, sorted event list for the
        // whole range; pairs may straddle days and totals stay raw.
        let punches = store.punches(&employee.cpf)?;
        let mut events: Vec<PunchEvent> = punches
            .range(start..=end)
            .flat_map(|(_, list)| list.iter().cloned())
            .collect();
        punch::sort_by_instant(&mut events);

        let worked = daily::worked_minutes(&events);
        let status = daily::classify(&events, single_day);

        if let Some(wanted) = query.status {
            if status != wanted {
                continue;
            }
        }

        let overtime_formatted = if single_day {
            let extra = overtime::dashboard_overtime_minutes(worked);
            (extra > 0).then(|| report::format_minutes(extra))
        } else {
            None
        };

        rows.push(DashboardRow {
            cpf: employee.cpf.clone(),
            nome: employee.nome.clone(),
            departamento: employee.departamento.clone(),
            worked_minutes: worked,
            worked_formatted: report::format_minutes(worked),
            total_punches: events.len() as u32,
            status: single_day.then_some(status),
            overtime_formatted,
            entrada_inicial: single_day
                .then(|| positional_punch(&events, 0, PunchKind::ClockIn))
                .flatten(),
            saida_inicial: single_day
                .then(|| positional_punch(&events, 1, PunchKind::ClockOut))
                .flatten(),
            entrada_final: single_day
                .then(|| positional_punch(&events, 2, PunchKind::ClockIn))
                .flatten(),
            saida_final: single_day
                .then(|| positional_punch(&events, 3, PunchKind::ClockOut))
                .flatten(),
        });
    }

    let count = |wanted: DayStatus| rows.iter().filter(|r| r.status == Some(wanted)).count() as u32;
    let total_worked: i64 = rows.iter().map(|r| r.worked_minutes).sum();
    let stats = DashboardStats {
        total_employees: rows.len() as u32,
        working: count(DayStatus::Working),
        absent: count(DayStatus::Absent),
        complete: count(DayStatus::Complete),
        no_record: count(DayStatus::NoRecord),
        total_worked_minutes: total_worked,
        average_minutes_per_employee: if rows.is_empty() {
            0.0
        } else {
            total_worked as f64 / rows.len() as f64
        },
        total_punches: rows.iter().map(|r| r.total_punches).sum(),
    };

    Ok(HttpResponse::Ok().json(DashboardResponse {
        start,
        end,
        single_day,
        employees: rows,
        stats,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::employee::Employee;
    use crate::store::MemoryStore;
    use actix_web::{App, test};
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    fn seeded_store() -> web::Data<dyn PunchStore> {
        let store = MemoryStore::new();
        store
            .create_employee(Employee {
                cpf: Cpf("111".into()),
                nome: "Ana".into(),
                departamento: Some("Operações".into()),
                email: None,
            })
            .unwrap();

        let day = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
        // 08:00-17:48 local (UTC-3): 9h48 raw
        let entrada = Utc.with_ymd_and_hms(2024, 5, 6, 11, 0, 0).unwrap();
        let saida = Utc.with_ymd_and_hms(2024, 5, 6, 20, 48, 0).unwrap();
        store
            .append_punches(
                &Cpf("111".into()),
                day,
                vec![
                    PunchEvent::new(PunchKind::ClockIn, entrada, day),
                    PunchEvent::new(PunchKind::ClockOut, saida, day),
                ],
            )
            .unwrap();

        let store: Arc<dyn PunchStore> = Arc::new(store);
        web::Data::from(store)
    }

    #[actix_web::test]
    async fn single_day_view_shows_status_and_dashboard_overtime() {
        let app = test::init_service(
            App::new()
                .app_data(seeded_store())
                .route("/api/dashboard", web::get().to(dashboard)),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/dashboard?start=2024-05-06")
                .to_request(),
        )
        .await;
        assert!(res.status().is_success());
        let body: serde_json::Value = test::read_body_json(res).await;

        let row = &body["employees"][0];
        assert_eq!(row["worked_minutes"], 588);
        assert_eq!(row["worked_formatted"], "9h 48m");
        assert_eq!(row["status"], "ausente");
        // dashboard policy: 588 - 528, no grace band
        assert_eq!(row["overtime_formatted"], "1h 0m");
        assert_eq!(row["entrada_inicial"], "08:00");
        assert_eq!(row["saida_inicial"], "17:48");
    }

    #[actix_web::test]
    async fn interval_view_suppresses_single_day_columns() {
        let app = test::init_service(
            App::new()
                .app_data(seeded_store())
                .route("/api/dashboard", web::get().to(dashboard)),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/dashboard?start=2024-05-01&end=2024-05-31")
                .to_request(),
        )
        .await;
        let body: serde_json::Value = test::read_body_json(res).await;

        let row = &body["employees"][0];
        assert_eq!(row["worked_minutes"], 588);
        assert!(row.get("status").is_none());
        assert!(row.get("overtime_formatted").is_none());
        assert!(row.get("entrada_inicial").is_none());
    }

    #[actix_web::test]
    async fn inverted_range_is_a_bad_request() {
        let app = test::init_service(
            App::new()
                .app_data(seeded_store())
                .route("/api/dashboard", web::get().to(dashboard)),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/dashboard?start=2024-05-10&end=2024-05-01")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}
