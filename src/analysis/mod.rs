// src/analysis/mod.rs
use serde::{Deserialize, Serialize};

use crate::scoring::ProfileScore;
use crate::types::profile_data::ProfileData;

pub mod llm_client;
pub mod profile_analyzer;
pub mod profile_scraper;
pub mod response_parser;

pub use profile_analyzer::ProfileAnalyzer;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileAnalysisRequest {
    pub url: String,
}

/// Narrative output of the LLM call, normalized from its raw response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisResult {
    pub summary: String,
    pub strengths: Vec<String>,
    pub suggestions: Vec<String>,
    pub keywords: Vec<String>,
    pub career_paths: Vec<String>,
}

impl Default for AnalysisResult {
    fn default() -> Self {
        Self {
            summary: "No summary available".to_string(),
            strengths: Vec::new(),
            suggestions: Vec::new(),
            keywords: Vec::new(),
            career_paths: Vec::new(),
        }
    }
}

/// Full result of one analysis request: the scraped profile, the
/// deterministic score, the seed fed to the LLM and its narrative output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileAnalysis {
    pub profile: ProfileData,
    pub score: ProfileScore,
    pub seed: u32,
    pub analysis: AnalysisResult,
}
