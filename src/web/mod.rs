// src/web/mod.rs
pub mod handlers;
pub mod types;

pub use handlers::*;
pub use types::*;

use crate::analysis::ProfileAnalysisRequest;
use crate::database::DatabaseConfig;
use anyhow::Result;
use rocket::http::{Header, Status};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::serde::json::Json;
use rocket::{catchers, delete, get, options, post, routes, Request, Response, State};
use std::path::PathBuf;
use tracing::{error, info};

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, DELETE, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

#[post("/analyze", data = "<request>")]
pub async fn analyze_profile(
    request: Json<StandardRequest<ProfileAnalysisRequest>>,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<DataResponse<AnalysisData>>, Json<StandardErrorResponse>> {
    handlers::analyze_profile_handler(request, db_config).await
}

#[get("/analyses?<limit>")]
pub async fn list_analyses(
    limit: Option<i64>,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<DataResponse<Vec<crate::database::AnalysisSummary>>>, Json<StandardErrorResponse>>
{
    handlers::list_analyses_handler(limit, db_config).await
}

#[get("/analyses/<id>")]
pub async fn get_analysis(
    id: &str,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<DataResponse<AnalysisData>>, Json<StandardErrorResponse>> {
    handlers::get_analysis_handler(id, db_config).await
}

#[delete("/analyses/<id>")]
pub async fn delete_analysis(
    id: &str,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    handlers::delete_analysis_handler(id, db_config).await
}

#[get("/health")]
pub async fn health() -> Json<TextResponse> {
    handlers::health_handler().await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
        None,
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
        None,
    ))
}

// Main server start function
pub async fn start_web_server(database_path: PathBuf) -> Result<()> {
    let mut db_config = DatabaseConfig::new(database_path);

    if let Err(e) = db_config.init_pool().await {
        error!("Failed to initialize database: {}", e);
        return Err(e);
    }

    if let Err(e) = db_config.migrate().await {
        error!("Failed to run database migrations: {}", e);
        return Err(e);
    }

    info!("Starting Profilyze API server");
    info!("Database: {}", db_config.database_path.display());
    info!("All endpoints use standard response format with conversation_id support");

    let _rocket = rocket::build()
        .attach(Cors)
        .manage(db_config)
        .register("/api", catchers![bad_request, internal_error])
        .mount(
            "/api",
            routes![
                analyze_profile,
                list_analyses,
                get_analysis,
                delete_analysis,
                health,
                options,
            ],
        )
        .launch()
        .await;

    Ok(())
}
