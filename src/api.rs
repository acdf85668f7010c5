//! Read-only JSON API over the monitoring data

use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::report::{current_status, hourly_report, sparkline_report, UPTIME_WINDOW_HOURS};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    hours: Option<String>,
}

impl HistoryQuery {
    /// Missing, zero or malformed values fall back to a full day
    fn hours(&self) -> u32 {
        self.hours
            .as_deref()
            .and_then(|h| h.trim().parse::<u32>().ok())
            .filter(|h| *h > 0)
            .unwrap_or(UPTIME_WINDOW_HOURS)
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .service(
            web::scope("/api")
                .route("/status", web::get().to(get_status))
                .route("/history", web::get().to(get_history))
                .route("/sparklines", web::get().to(get_sparklines)),
        );
}

// Current status of every target
pub async fn get_status(data: web::Data<AppState>) -> impl Responder {
    info!("Request for current status");
    let statuses = current_status(&data.targets, &data.store).await;
    info!("Returning status for {} targets", statuses.len());

    HttpResponse::Ok().json(statuses)
}

// Hourly uptime chart series
pub async fn get_history(
    data: web::Data<AppState>,
    query: web::Query<HistoryQuery>,
) -> impl Responder {
    let hours = query.hours();
    info!("Request for {}h of hourly history", hours);
    let points = hourly_report(&data.store, hours).await;

    HttpResponse::Ok().json(points)
}

// Compact 24h series per target
pub async fn get_sparklines(data: web::Data<AppState>) -> impl Responder {
    info!("Request for sparklines");
    let lines = sparkline_report(&data.targets, &data.store, data.sparkline_points).await;

    HttpResponse::Ok().json(lines)
}

pub async fn health_check() -> impl Responder {
    web::Json(HealthResponse {
        status: "OK".into(),
    })
}
