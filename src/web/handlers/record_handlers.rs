// src/web/handlers/record_handlers.rs
use crate::database::{AnalysisRepository, AnalysisSummary, DatabaseConfig};
use crate::web::types::{
    ActionResponse, AnalysisData, DataResponse, StandardErrorResponse,
};

use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

const DEFAULT_LIST_LIMIT: i64 = 20;
const MAX_LIST_LIMIT: i64 = 100;

pub async fn list_analyses_handler(
    limit: Option<i64>,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<DataResponse<Vec<AnalysisSummary>>>, Json<StandardErrorResponse>> {
    let pool = db_pool(db_config)?;
    let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT);

    match AnalysisRepository::new(pool).list_recent(limit).await {
        Ok(summaries) => {
            info!("Listed {} stored analyses", summaries.len());
            Ok(Json(DataResponse::success(
                format!("Found {} stored analyses", summaries.len()),
                summaries,
                None,
            )))
        }
        Err(e) => {
            error!("Failed to list analyses: {}", e);
            Err(database_error())
        }
    }
}

pub async fn get_analysis_handler(
    id: &str,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<DataResponse<AnalysisData>>, Json<StandardErrorResponse>> {
    let pool = db_pool(db_config)?;

    let record = match AnalysisRepository::new(pool).find_by_id(id).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            return Err(Json(StandardErrorResponse::new(
                format!("No analysis found with id {}", id),
                "NOT_FOUND".to_string(),
                vec!["List stored analyses to see available ids".to_string()],
                None,
            )));
        }
        Err(e) => {
            error!("Failed to load analysis {}: {}", id, e);
            return Err(database_error());
        }
    };

    let analysis = match record.decode() {
        Ok(analysis) => analysis,
        Err(e) => {
            error!("Failed to decode stored analysis {}: {}", id, e);
            return Err(database_error());
        }
    };

    Ok(Json(DataResponse::success(
        format!("Analysis for {}", record.profile_name),
        AnalysisData {
            record_id: record.id,
            profile: analysis.profile,
            score: analysis.score,
            seed: analysis.seed,
            analysis: analysis.analysis,
        },
        None,
    )))
}

pub async fn delete_analysis_handler(
    id: &str,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    let pool = db_pool(db_config)?;

    match AnalysisRepository::new(pool).delete(id).await {
        Ok(true) => Ok(Json(ActionResponse::success(
            format!("Deleted analysis {}", id),
            "delete_analysis".to_string(),
            None,
        ))),
        Ok(false) => Err(Json(StandardErrorResponse::new(
            format!("No analysis found with id {}", id),
            "NOT_FOUND".to_string(),
            vec!["List stored analyses to see available ids".to_string()],
            None,
        ))),
        Err(e) => {
            error!("Failed to delete analysis {}: {}", id, e);
            Err(database_error())
        }
    }
}

fn db_pool<'a>(
    db_config: &'a State<DatabaseConfig>,
) -> Result<&'a sqlx::SqlitePool, Json<StandardErrorResponse>> {
    db_config.pool().map_err(|e| {
        error!("Database connection failed: {}", e);
        database_error()
    })
}

fn database_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Database error".to_string(),
        "DATABASE_ERROR".to_string(),
        vec!["Try again in a few moments".to_string()],
        None,
    ))
}
