// src/web/handlers/system_handlers.rs
use crate::web::types::TextResponse;

use rocket::serde::json::Json;
use tracing::info;

pub async fn health_handler() -> Json<TextResponse> {
    info!("Health check");
    Json(TextResponse::success("OK".to_string(), None))
}
