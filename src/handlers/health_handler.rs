//! handlers/health_handler.rs

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::config::console_config::ConsoleConfig;

/// GET /api/health
pub async fn health_endpoint(config: web::Data<ConsoleConfig>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "backend": config.api_base_url,
        "history_poll_secs": config.history_poll_secs
    }))
}
