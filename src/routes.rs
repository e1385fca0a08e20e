use crate::{
    api::{batch, dashboard, employee, punch, report},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let punch_limiter = Arc::new(build_limiter(config.rate_punch_per_min));
    let admin_limiter = Arc::new(build_limiter(config.rate_admin_per_min));

    // Employee self-service routes
    cfg.service(
        web::scope("/ponto")
            .wrap(punch_limiter)
            .service(
                web::resource("/{cpf}/clock-in").route(web::post().to(punch::clock_in)),
            )
            .service(
                web::resource("/{cpf}/clock-out").route(web::post().to(punch::clock_out)),
            )
            .service(web::resource("/{cpf}/today").route(web::get().to(punch::today))),
    );

    // Admin routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(admin_limiter)
            .service(
                web::resource("/employee")
                    .route(web::post().to(employee::create_employee))
                    .route(web::get().to(employee::list_employees)),
            )
            .service(web::resource("/dashboard").route(web::get().to(dashboard::dashboard)))
            .service(
                web::resource("/report/{cpf}").route(web::get().to(report::monthly_report)),
            )
            .service(web::resource("/time-bank").route(web::get().to(report::time_bank)))
            .service(web::resource("/batch").route(web::post().to(batch::create_batch))),
    );
}
