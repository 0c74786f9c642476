// src/analysis/profile_analyzer.rs
use anyhow::{Context, Result};
use tracing::info;

use super::llm_client::LlmClient;
use super::profile_scraper::ProfileScraper;
use super::ProfileAnalysis;
use crate::scoring::calculate_profile_score;
use crate::scoring::seed::generate_seed;
use crate::utils::validate_profile_url;

/// End-to-end pipeline for a single analysis request: validate the URL,
/// scrape the profile, score it deterministically, then ask the LLM for the
/// narrative using the profile-derived seed.
pub struct ProfileAnalyzer {
    scraper: ProfileScraper,
    llm: LlmClient,
}

impl ProfileAnalyzer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            scraper: ProfileScraper::new()?,
            llm: LlmClient::new()?,
        })
    }

    pub async fn analyze(&self, profile_url: &str) -> Result<ProfileAnalysis> {
        let slug = validate_profile_url(profile_url)?;
        info!("Starting profile analysis for {}", slug);

        let profile = self
            .scraper
            .fetch_profile(profile_url)
            .await
            .context("Failed to scrape profile")?;

        let score = calculate_profile_score(&profile);
        let seed = generate_seed(&profile);

        let analysis = self
            .llm
            .analyze_profile(&profile, &score, seed)
            .await
            .context("Failed to generate profile analysis")?;

        info!(
            "Profile analysis completed for {} (overall score {})",
            profile.name, score.overall
        );

        Ok(ProfileAnalysis {
            profile,
            score,
            seed,
            analysis,
        })
    }
}
