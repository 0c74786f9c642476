// src/analysis/profile_scraper.rs
use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use std::env;
use tracing::{error, info, warn};

use crate::types::profile_data::{EducationEntry, ExperienceEntry, ProfileData, UNKNOWN};

const DEFAULT_API_URL: &str = "https://linkedin-data-api.p.rapidapi.com";

pub struct ProfileScraper {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ProfileScraper {
    pub fn new() -> Result<Self> {
        let api_key = env::var("RAPID_API_KEY")
            .context("RAPID_API_KEY environment variable not set")?;

        let base_url = env::var("RAPID_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    pub async fn fetch_profile(&self, profile_url: &str) -> Result<ProfileData> {
        let request_url = format!(
            "{}/get-profile-data-by-url?url={}",
            self.base_url,
            urlencoding::encode(profile_url)
        );

        info!("Fetching profile data for {}", profile_url);

        let response = self
            .client
            .get(&request_url)
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", self.api_host())
            .send()
            .await
            .context("Failed to send request to scraping API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Scraping API error {}: {}", status, error_text);
            anyhow::bail!("Scraping API returned error {}: {}", status, error_text);
        }

        let raw: Value = response
            .json()
            .await
            .context("Failed to parse scraping API response")?;

        let profile = normalize_profile(&raw);
        if profile.name == UNKNOWN {
            warn!("Scraped profile has no name field, continuing with sentinel");
        }

        info!(
            "Scraped profile: {} ({} experience entries, {} skills)",
            profile.name,
            profile.experience.len(),
            profile.skills.len()
        );

        Ok(profile)
    }

    fn api_host(&self) -> &str {
        self.base_url
            .strip_prefix("https://")
            .or_else(|| self.base_url.strip_prefix("http://"))
            .unwrap_or(&self.base_url)
    }
}

/// Normalize the raw scraping-API payload into [`ProfileData`].
///
/// Different scraping providers disagree on field names, so every field is
/// resolved through a fallback chain. Missing text fields become the
/// `Unknown` sentinel or the empty string, never an error.
pub fn normalize_profile(raw: &Value) -> ProfileData {
    let experience = raw
        .get("experience")
        .or_else(|| raw.get("experiences"))
        .and_then(Value::as_array)
        .map(|entries| entries.iter().map(normalize_experience).collect())
        .unwrap_or_default();

    let education = raw
        .get("education")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().map(normalize_education).collect())
        .unwrap_or_default();

    let skills = raw
        .get("skills")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter_map(normalize_skill).collect())
        .unwrap_or_default();

    ProfileData {
        name: first_str(raw, &["fullName", "name"]).unwrap_or_else(|| UNKNOWN.to_string()),
        headline: first_str(raw, &["headline", "title"]).unwrap_or_default(),
        location: first_str(raw, &["location"]).unwrap_or_else(|| UNKNOWN.to_string()),
        profile_picture: first_str(raw, &["profilePicture", "profilePic", "imageUrl"])
            .unwrap_or_default(),
        about: first_str(raw, &["about", "summary"]).unwrap_or_default(),
        experience,
        education,
        skills,
    }
}

fn normalize_experience(entry: &Value) -> ExperienceEntry {
    ExperienceEntry {
        title: first_str(entry, &["title"]).unwrap_or_default(),
        company: first_str(entry, &["company", "companyName"]).unwrap_or_default(),
        duration: first_str(entry, &["dateRange", "duration"]).unwrap_or_default(),
        description: first_str(entry, &["description"]).unwrap_or_default(),
    }
}

fn normalize_education(entry: &Value) -> EducationEntry {
    EducationEntry {
        school: first_str(entry, &["school", "schoolName"]).unwrap_or_default(),
        degree: first_str(entry, &["degree"]).unwrap_or_default(),
        duration: first_str(entry, &["dateRange", "duration"]).unwrap_or_default(),
    }
}

// Skills arrive either as plain strings or as objects with a name field.
fn normalize_skill(entry: &Value) -> Option<String> {
    match entry {
        Value::String(s) => Some(s.clone()),
        Value::Object(_) => first_str(entry, &["name", "title"]),
        _ => None,
    }
}

fn first_str(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| value.get(key))
        .filter_map(Value::as_str)
        .map(str::to_string)
        .next()
}
