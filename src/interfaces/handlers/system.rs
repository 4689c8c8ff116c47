use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use humantime::format_duration;
use serde::Serialize;
use std::time::Duration;

use crate::{constants::START_TIME, errors::AppError, AppState};

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime: String,
    start_at: String,
    timestamp: String,
    version: &'static str,
}

#[derive(Serialize)]
struct DatabaseHealthResponse {
    status: &'static str,
    database: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Gallery API",
        "status": "Ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[get("/health")]
pub async fn health_check() -> impl Responder {
    let now = Utc::now();
    let uptime = now.signed_duration_since(*START_TIME).num_seconds().max(0) as u64;

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy",
        uptime: format_duration(Duration::from_secs(uptime)).to_string(),
        start_at: START_TIME.to_rfc3339(),
        timestamp: now.to_rfc3339(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Always 200; the body says whether the database answered.
#[get("/health/db")]
pub async fn database_health_check(state: web::Data<AppState>) -> impl Responder {
    let check = async {
        state.gallery_handler.check_connection().await?;
        state.gallery_handler.count_images().await
    };

    let response = match check.await {
        Ok(count) => DatabaseHealthResponse {
            status: "healthy",
            database: "connected",
            image_count: Some(count),
            error: None,
        },
        Err(e) => {
            tracing::warn!("Database health check failed: {}", e);
            DatabaseHealthResponse {
                status: "unhealthy",
                database: "error",
                image_count: None,
                error: Some(match e {
                    AppError::ConnectivityFailure(_) => "Database connection failed".to_string(),
                    _ => "Database query failed".to_string(),
                }),
            }
        }
    };

    HttpResponse::Ok().json(response)
}
