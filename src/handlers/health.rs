use actix_web::{web, HttpResponse};
use serde::Serialize;
use std::time::Instant;

/// Static identity of the running service, shared with the health route.
pub struct ServiceInfo {
    pub name: &'static str,
    pub started: Instant,
}

impl ServiceInfo {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            started: Instant::now(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub uptime_secs: u64,
}

/// GET /<service>/health
pub async fn status(info: web::Data<ServiceInfo>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        service: info.name,
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: info.started.elapsed().as_secs(),
    })
}
