// src/web/handlers/analysis_handlers.rs
use crate::analysis::{ProfileAnalysisRequest, ProfileAnalyzer};
use crate::database::{AnalysisRecord, AnalysisRepository, DatabaseConfig};
use crate::scoring::ProfileScore;
use crate::utils::validate_profile_url;
use crate::web::types::{
    AnalysisData, DataResponse, DisplayFormat, DisplaySection, StandardErrorResponse,
    StandardRequest, WithConversationId,
};

use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

pub async fn analyze_profile_handler(
    request: Json<StandardRequest<ProfileAnalysisRequest>>,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<DataResponse<AnalysisData>>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();
    let profile_url = request.data.url.clone();

    info!("Analysis requested for {}", profile_url);

    let slug = match validate_profile_url(&profile_url) {
        Ok(slug) => slug,
        Err(e) => {
            error!("Rejected profile URL {}: {}", profile_url, e);
            return Err(Json(StandardErrorResponse::new(
                e.to_string(),
                "INVALID_URL".to_string(),
                vec![
                    "Provide a URL like https://linkedin.com/in/username".to_string(),
                    "Check the profile URL for typos".to_string(),
                ],
                conversation_id,
            )));
        }
    };

    let pool = match db_config.pool() {
        Ok(pool) => pool,
        Err(e) => {
            error!("Database connection failed: {}", e);
            return Err(Json(StandardErrorResponse::new(
                "Database connection failed".to_string(),
                "DATABASE_ERROR".to_string(),
                vec!["Try again in a few moments".to_string()],
                conversation_id,
            )));
        }
    };

    let analyzer = match ProfileAnalyzer::new() {
        Ok(analyzer) => analyzer,
        Err(e) => {
            error!("Failed to initialize profile analyzer: {}", e);
            return Err(Json(StandardErrorResponse::new(
                "Service configuration error".to_string(),
                "SERVICE_CONFIG_ERROR".to_string(),
                vec![
                    "Ensure RAPID_API_KEY and OPENAI_API_KEY are configured".to_string(),
                    "Contact system administrator".to_string(),
                ],
                conversation_id,
            )));
        }
    };

    let analysis = match analyzer.analyze(&profile_url).await {
        Ok(analysis) => analysis,
        Err(e) => {
            let error_msg = format!("{:#}", e);
            error!("Profile analysis failed for {}: {}", profile_url, error_msg);

            let (error_code, suggestions) = categorize_error(&error_msg);
            return Err(Json(StandardErrorResponse::new(
                error_msg,
                error_code,
                suggestions,
                conversation_id,
            )));
        }
    };

    let record = match AnalysisRecord::from_analysis(&profile_url, &slug, &analysis) {
        Ok(record) => record,
        Err(e) => {
            error!("Failed to build analysis record: {}", e);
            return Err(Json(StandardErrorResponse::new(
                "Failed to prepare analysis for storage".to_string(),
                "DATABASE_ERROR".to_string(),
                vec!["Try again in a few moments".to_string()],
                conversation_id,
            )));
        }
    };

    if let Err(e) = AnalysisRepository::new(pool).insert(&record).await {
        error!("Failed to store analysis: {}", e);
        return Err(Json(StandardErrorResponse::new(
            "Failed to store analysis".to_string(),
            "DATABASE_ERROR".to_string(),
            vec!["Try again in a few moments".to_string()],
            conversation_id,
        )));
    }

    info!(
        "Analysis stored for {} (record {}, score {})",
        slug, record.id, analysis.score.overall
    );

    let display_format = create_score_display_format(&analysis.score);

    Ok(Json(
        DataResponse::success(
            format!(
                "Profile analysis completed for {} with score {}/100",
                analysis.profile.name, analysis.score.overall
            ),
            AnalysisData {
                record_id: record.id,
                profile: analysis.profile,
                score: analysis.score,
                seed: analysis.seed,
                analysis: analysis.analysis,
            },
            conversation_id,
        )
        .with_display_format(display_format),
    ))
}

fn create_score_display_format(score: &ProfileScore) -> DisplayFormat {
    let sections = vec![
        score_section("Basic Info", &score.sections.basic_info),
        score_section("Experience", &score.sections.experience),
        score_section("Skills", &score.sections.skills),
        score_section("Education", &score.sections.education),
        score_section("Keywords", &score.sections.keywords),
    ];

    DisplayFormat {
        format_type: "score".to_string(),
        sections: Some(sections),
    }
}

fn score_section(title: &str, section: &crate::scoring::SectionScore) -> DisplaySection {
    DisplaySection {
        title: title.to_string(),
        content: section.reason.clone(),
        score: Some(format!("{}/100", section.score)),
        points: None,
    }
}

pub fn categorize_error(error_msg: &str) -> (String, Vec<String>) {
    if error_msg.contains("Invalid LinkedIn profile URL") {
        (
            "INVALID_URL".to_string(),
            vec![
                "Provide a URL like https://linkedin.com/in/username".to_string(),
                "Check the profile URL for typos".to_string(),
            ],
        )
    } else if error_msg.contains("scrape") || error_msg.contains("Scraping API") {
        (
            "SCRAPING_ERROR".to_string(),
            vec![
                "Verify the LinkedIn profile URL is accessible".to_string(),
                "The profile may be private or no longer available".to_string(),
                "Try again in a few moments".to_string(),
            ],
        )
    } else if error_msg.contains("LLM") {
        (
            "LLM_ERROR".to_string(),
            vec![
                "The analysis service is temporarily unavailable".to_string(),
                "Try again in a few moments".to_string(),
                "Contact support if the problem persists".to_string(),
            ],
        )
    } else if error_msg.contains("Database") || error_msg.contains("database") {
        (
            "DATABASE_ERROR".to_string(),
            vec!["Try again in a few moments".to_string()],
        )
    } else {
        (
            "ANALYSIS_ERROR".to_string(),
            vec![
                "Try again in a few moments".to_string(),
                "Check that the profile URL is valid and accessible".to_string(),
                "Contact support if the problem persists".to_string(),
            ],
        )
    }
}
