use actix_web::{HttpResponse, Responder, web};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::engine::{daily, reference_day, report, status};
use crate::error::ApiError;
use crate::model::employee::Cpf;
use crate::model::punch::{self, PunchEvent, PunchKind};
use crate::store::PunchStore;

/// Optional geolocation captured by the client at punch time. Stored on the
/// event and echoed back, never interpreted.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PunchBody {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub accuracy: Option<f64>,
    pub approximate_address: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct TodayResponse {
    #[schema(value_type = String)]
    pub cpf: Cpf,
    pub nome: String,
    #[schema(value_type = String, format = "date")]
    pub day: NaiveDate,
    pub events: Vec<PunchEvent>,
    pub status: status::PunchStatus,
    pub worked_minutes: i64,
    #[schema(example = "4h 30m")]
    pub worked_formatted: String,
}

async fn register_punch(
    store: &dyn PunchStore,
    cpf: Cpf,
    kind: PunchKind,
    body: Option<web::Json<PunchBody>>,
) -> Result<HttpResponse, ApiError> {
    let now = Utc::now();
    let day = reference_day(now);

    store.employee(&cpf)?;
    let mut today = store.punches_for_day(&cpf, day)?;
    punch::sort_by_instant(&mut today);
    status::check_punch(&today, kind, now)?;

    let mut event = PunchEvent::new(kind, now, day);
    if let Some(body) = body {
        let body = body.into_inner();
        event.latitude = body.latitude;
        event.longitude = body.longitude;
        event.accuracy = body.accuracy;
        event.approximate_address = body.approximate_address;
    }
    store.append_punches(&cpf, day, vec![event])?;

    tracing::info!(cpf = %cpf, %day, kind = %kind, "punch registered");
    Ok(HttpResponse::Ok().json(json!({
        "message": format!("{kind} registered successfully")
    })))
}

/// Self-service clock-in
#[utoipa::path(
    post,
    path = "/ponto/{cpf}/clock-in",
    request_body = PunchBody,
    params(("cpf", description = "Employee CPF")),
    responses(
        (status = 200, description = "Punch registered", body = Object, example = json!({
            "message": "entrada registered successfully"
        })),
        (status = 400, description = "Punch rejected by the daily guard"),
        (status = 404, description = "Unknown employee")
    ),
    tag = "Ponto"
)]
pub async fn clock_in(
    store: web::Data<dyn PunchStore>,
    path: web::Path<String>,
    body: Option<web::Json<PunchBody>>,
) -> Result<impl Responder, ApiError> {
    register_punch(store.get_ref(), Cpf(path.into_inner()), PunchKind::ClockIn, body).await
}

/// Self-service clock-out
#[utoipa::path(
    post,
    path = "/ponto/{cpf}/clock-out",
    request_body = PunchBody,
    params(("cpf", description = "Employee CPF")),
    responses(
        (status = 200, description = "Punch registered"),
        (status = 400, description = "Punch rejected by the daily guard"),
        (status = 404, description = "Unknown employee")
    ),
    tag = "Ponto"
)]
pub async fn clock_out(
    store: web::Data<dyn PunchStore>,
    path: web::Path<String>,
    body: Option<web::Json<PunchBody>>,
) -> Result<impl Responder, ApiError> {
    register_punch(store.get_ref(), Cpf(path.into_inner()), PunchKind::ClockOut, body).await
}

/// Today's punches plus what the employee may do next
#[utoipa::path(
    get,
    path = "/ponto/{cpf}/today",
    params(("cpf", description = "Employee CPF")),
    responses(
        (status = 200, body = TodayResponse),
        (status = 404, description = "Unknown employee")
    ),
    tag = "Ponto"
)]
pub async fn today(
    store: web::Data<dyn PunchStore>,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let cpf = Cpf(path.into_inner());
    let employee = store.employee(&cpf)?;

    let day = reference_day(Utc::now());
    let mut events = store.punches_for_day(&cpf, day)?;
    punch::sort_by_instant(&mut events);

    let worked = daily::worked_minutes(&events);
    Ok(HttpResponse::Ok().json(TodayResponse {
        cpf,
        nome: employee.nome,
        day,
        status: status::punch_status(&events),
        worked_minutes: worked,
        worked_formatted: report::format_minutes(worked),
        events,
    }))
}
