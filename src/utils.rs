// src/utils.rs
use anyhow::{Context, Result};
use regex::Regex;

const PROFILE_URL_PATTERN: &str = r"linkedin\.com/in/([\w-]+)";

/// Validate a LinkedIn profile URL and extract the profile slug.
///
/// Accepts any URL containing `linkedin.com/in/<slug>`; query strings and
/// trailing path segments after the slug are ignored.
pub fn validate_profile_url(url: &str) -> Result<String> {
    let pattern =
        Regex::new(PROFILE_URL_PATTERN).context("Failed to compile profile URL pattern")?;

    let captures = pattern
        .captures(url)
        .ok_or_else(|| anyhow::anyhow!("Invalid LinkedIn profile URL: {}", url))?;

    Ok(captures[1].to_string())
}
