// src/types/profile_data.rs
//! Normalized LinkedIn profile shape consumed by the scoring engine.

use serde::{Deserialize, Serialize};

/// Scraped profile, already normalized from the raw scraping-API response.
/// Every field may be empty or carry the "Unknown" sentinel; scoring treats
/// absence as a degraded score, never as an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileData {
    pub name: String,
    pub headline: String,
    pub location: String,
    pub profile_picture: String,
    pub about: String,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    pub school: String,
    pub degree: String,
    pub duration: String,
}

/// Sentinel used by the scrape normalization when a field is missing.
pub const UNKNOWN: &str = "Unknown";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_wire_shape() {
        let json = r#"{
            "name": "Jane Doe",
            "headline": "Senior Product Manager",
            "location": "Zurich",
            "profilePicture": "https://example.com/p.jpg",
            "about": "About text",
            "experience": [
                {"title": "PM", "company": "Acme", "duration": "2020-2024", "description": "Led things"}
            ],
            "education": [
                {"school": "ETH", "degree": "MSc", "duration": "2016-2018"}
            ],
            "skills": ["Strategy", "Leadership"]
        }"#;

        let profile: ProfileData = serde_json::from_str(json).unwrap();
        assert_eq!(profile.name, "Jane Doe");
        assert_eq!(profile.profile_picture, "https://example.com/p.jpg");
        assert_eq!(profile.experience.len(), 1);
        assert_eq!(profile.experience[0].company, "Acme");
        assert_eq!(profile.education[0].school, "ETH");
        assert_eq!(profile.skills.len(), 2);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let profile: ProfileData = serde_json::from_str(r#"{"name": "Jane"}"#).unwrap();
        assert_eq!(profile.name, "Jane");
        assert!(profile.headline.is_empty());
        assert!(profile.experience.is_empty());
        assert!(profile.skills.is_empty());
    }

    #[test]
    fn serializes_profile_picture_as_camel_case() {
        let profile = ProfileData {
            profile_picture: "x".to_string(),
            ..ProfileData::default()
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("profilePicture").is_some());
    }
}
