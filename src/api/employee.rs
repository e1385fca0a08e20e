use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::model::employee::{Cpf, Employee};
use crate::store::PunchStore;

#[derive(Deserialize, Serialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "12345678900")]
    pub cpf: String,
    #[schema(example = "Maria Silva")]
    pub nome: String,
    pub departamento: Option<String>,
    #[schema(format = "email")]
    pub email: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    pub data: Vec<Employee>,
    #[schema(example = 12)]
    pub total: u32,
}

/// Register Employee
#[utoipa::path(
    post,
    path = "/api/employee",
    request_body = CreateEmployee,
    responses(
        (status = 200, description = "Employee registered successfully", body = Object, example = json!({
            "message": "Employee registered successfully"
        })),
        (status = 400, description = "CPF already registered")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    store: web::Data<dyn PunchStore>,
    payload: web::Json<CreateEmployee>,
) -> Result<impl Responder, ApiError> {
    let payload = payload.into_inner();
    if payload.cpf.trim().is_empty() || payload.nome.trim().is_empty() {
        return Err(ApiError::validation("cpf and nome are required"));
    }

    store.create_employee(Employee {
        cpf: Cpf(payload.cpf),
        nome: payload.nome,
        departamento: payload.departamento,
        email: payload.email,
    })?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee registered successfully"
    })))
}

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employee",
    responses(
        (status = 200, body = EmployeeListResponse)
    ),
    tag = "Employee"
)]
pub async fn list_employees(store: web::Data<dyn PunchStore>) -> impl Responder {
    let data = store.list_employees();
    let total = data.len() as u32;
    HttpResponse::Ok().json(EmployeeListResponse { data, total })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use actix_web::{App, test};
    use std::sync::Arc;

    #[actix_web::test]
    async fn register_then_list() {
        let store: Arc<dyn PunchStore> = Arc::new(MemoryStore::new());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(store))
                .route(
                    "/api/employee",
                    web::post().to(create_employee),
                )
                .route("/api/employee", web::get().to(list_employees)),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/employee")
                .set_json(json!({"cpf": "111", "nome": "Ana"}))
                .to_request(),
        )
        .await;
        assert!(res.status().is_success());

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/employee").to_request(),
        )
        .await;
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["total"], 1);
        assert_eq!(body["data"][0]["nome"], "Ana");
    }
}
