use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::engine::batch::{BatchEntry, validate_batch};
use crate::error::ApiError;
use crate::model::employee::Cpf;
use crate::store::PunchStore;

#[derive(Debug, Deserialize, ToSchema)]
pub struct BatchRequest {
    #[schema(example = "12345678900")]
    pub cpf: String,

    #[schema(example = "2024-05-06", value_type = String, format = "date")]
    pub day: NaiveDate,

    pub entries: Vec<BatchEntry>,
}

/// Admin batch entry for one employee and day
///
/// Validated as a whole; on success the punches are appended to whatever the
/// day already holds, never overwriting it.
#[utoipa::path(
    post,
    path = "/api/batch",
    request_body = BatchRequest,
    responses(
        (status = 200, description = "Punches registered", body = Object, example = json!({
            "message": "4 punches registered for 2024-05-06"
        })),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Unknown employee")
    ),
    tag = "Batch"
)]
pub async fn create_batch(
    store: web::Data<dyn PunchStore>,
    payload: web::Json<BatchRequest>,
) -> Result<impl Responder, ApiError> {
    let cpf = Cpf(payload.cpf.clone());
    store.employee(&cpf)?;

    let events = validate_batch(payload.day, &payload.entries)?;
    let count = events.len();
    store.append_punches(&cpf, payload.day, events)?;

    tracing::info!(cpf = %cpf, day = %payload.day, count, "batch punches registered");
    Ok(HttpResponse::Ok().json(json!({
        "message": format!("{count} punches registered for {}", payload.day)
    })))
}
