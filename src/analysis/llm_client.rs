// src/analysis/llm_client.rs
use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use tracing::{error, info};

use super::response_parser;
use super::AnalysisResult;
use crate::scoring::ProfileScore;
use crate::types::profile_data::ProfileData;

const DEFAULT_API_URL: &str = "https://api.openai.com";
const MODEL: &str = "gpt-4o";

const SYSTEM_PROMPT: &str = "You are a career advisor reviewing LinkedIn profiles. \
Respond with a single JSON object containing exactly these keys: \
summary (string), strengths (array of strings), suggestions (array of strings), \
keywords (array of strings), careerPaths (array of strings). \
No markdown, no commentary outside the JSON object.";

pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl LlmClient {
    pub fn new() -> Result<Self> {
        let api_key = env::var("OPENAI_API_KEY")
            .context("OPENAI_API_KEY environment variable not set")?;

        let base_url = env::var("OPENAI_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    /// Request a narrative analysis for an already-scored profile.
    ///
    /// The deterministic seed is forwarded as the completion `seed` so the
    /// same profile state yields the same narrative across requests.
    pub async fn analyze_profile(
        &self,
        profile: &ProfileData,
        score: &ProfileScore,
        seed: u32,
    ) -> Result<AnalysisResult> {
        let prompt = build_prompt(profile, score)?;

        let request = ChatCompletionRequest {
            model: MODEL.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt,
                },
            ],
            temperature: 0.2,
            max_tokens: 1000,
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
            seed,
        };

        info!("Requesting LLM analysis (seed {})", seed);

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send request to LLM API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("LLM API error {}: {}", status, error_text);
            anyhow::bail!("LLM API returned error {}: {}", status, error_text);
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .context("Failed to parse LLM API response")?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .context("LLM response contained no choices")?
            .message
            .content;

        info!("Received LLM analysis ({} chars)", content.len());

        Ok(response_parser::parse_analysis(&content))
    }
}

/// Prompt shown to the model: the scored sections first, then the raw
/// profile as JSON so the narrative can cite concrete entries.
fn build_prompt(profile: &ProfileData, score: &ProfileScore) -> Result<String> {
    let profile_json =
        serde_json::to_string_pretty(profile).context("Failed to serialize profile for prompt")?;

    Ok(format!(
        "Analyze this LinkedIn profile and its computed score.\n\n\
Profile Score: {}/100\n\
- Basic Info: {}/100 ({})\n\
- Experience: {}/100 ({})\n\
- Skills: {}/100 ({})\n\
- Education: {}/100 ({})\n\
- Keywords: {}/100 ({})\n\n\
PROFILE DATA:\n{}\n\n\
Provide: a concise summary of the profile, its main strengths, concrete \
suggestions for improvement, industry keywords worth adding, and plausible \
career paths. Ground every point in the profile data and the section scores.",
        score.overall,
        score.sections.basic_info.score,
        score.sections.basic_info.reason,
        score.sections.experience.score,
        score.sections.experience.reason,
        score.sections.skills.score,
        score.sections.skills.reason,
        score.sections.education.score,
        score.sections.education.reason,
        score.sections.keywords.score,
        score.sections.keywords.reason,
        profile_json
    ))
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
    response_format: ResponseFormat,
    seed: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::calculate_profile_score;

    #[test]
    fn prompt_embeds_score_block_and_profile() {
        let profile = ProfileData {
            name: "Jane Doe".to_string(),
            headline: "Engineering Manager".to_string(),
            ..ProfileData::default()
        };
        let score = calculate_profile_score(&profile);

        let prompt = build_prompt(&profile, &score).unwrap();
        assert!(prompt.contains(&format!("Profile Score: {}/100", score.overall)));
        assert!(prompt.contains(&format!(
            "- Basic Info: {}/100 ({})",
            score.sections.basic_info.score, score.sections.basic_info.reason
        )));
        assert!(prompt.contains("\"name\": \"Jane Doe\""));
    }

    #[test]
    fn request_serializes_seed_and_json_response_format() {
        let request = ChatCompletionRequest {
            model: MODEL.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: "hello".to_string(),
            }],
            temperature: 0.2,
            max_tokens: 1000,
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
            seed: 42,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["seed"], 42);
        assert_eq!(json["model"], "gpt-4o");
        assert_eq!(json["response_format"]["type"], "json_object");
        assert_eq!(json["messages"][0]["role"], "user");
    }
}
