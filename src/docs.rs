use crate::api::batch::BatchRequest;
use crate::api::dashboard::{DashboardQuery, DashboardResponse, DashboardRow, DashboardStats};
use crate::api::employee::{CreateEmployee, EmployeeListResponse};
use crate::api::punch::{PunchBody, TodayResponse};
use crate::api::report::{
    MonthlyReportResponse, ReportDay, ReportPunch, ReportQuery, ReportStats, TimeBankQuery,
    TimeBankResponse,
};
use crate::engine::batch::BatchEntry;
use crate::engine::status::PunchStatus;
use crate::model::daily::DayStatus;
use crate::model::employee::Employee;
use crate::model::punch::{PunchEvent, PunchKind};
use crate::model::timebank::{BalanceKind, TimeBankEntry};
use utoipa::OpenApi;
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ponto API",
        version = "1.0.0",
        description = r#"
## Ponto Eletrônico

This API powers an **electronic time-and-attendance (ponto)** service for tracking
employee working hours.

### 🔹 Key Features
- **Self-service Punching**
  - Clock in/out with optional geolocation, guarded by daily punch rules
- **Admin Dashboard**
  - Per-day and per-interval views of every employee's worked time
- **Monthly Reports**
  - Worked hours with the contractual grace band applied and overtime capped
- **Banco de Horas**
  - Signed credit/debit balances against the full-day quota
- **Manual Batch Entry**
  - Admin registration of a whole day's punches at once

### 📦 Response Format
- JSON-based RESTful responses
- All wall-clock times are rendered in America/Sao_Paulo

---
Built with **Rust**, **Actix Web**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::punch::clock_in,
        crate::api::punch::clock_out,
        crate::api::punch::today,

        crate::api::dashboard::dashboard,

        crate::api::report::monthly_report,
        crate::api::report::time_bank,

        crate::api::batch::create_batch,

        crate::api::employee::create_employee,
        crate::api::employee::list_employees
    ),
    components(
        schemas(
            PunchKind,
            PunchEvent,
            PunchBody,
            PunchStatus,
            TodayResponse,
            DayStatus,
            DashboardQuery,
            DashboardRow,
            DashboardStats,
            DashboardResponse,
            ReportQuery,
            ReportPunch,
            ReportDay,
            ReportStats,
            MonthlyReportResponse,
            TimeBankQuery,
            TimeBankResponse,
            TimeBankEntry,
            BalanceKind,
            BatchEntry,
            BatchRequest,
            CreateEmployee,
            Employee,
            EmployeeListResponse
        )
    ),
    tags(
        (name = "Ponto", description = "Self-service punch APIs"),
        (name = "Dashboard", description = "Admin dashboard APIs"),
        (name = "Report", description = "Monthly report and banco de horas APIs"),
        (name = "Batch", description = "Manual batch entry APIs"),
        (name = "Employee", description = "Employee management APIs"),
    )
)]
pub struct ApiDoc;
