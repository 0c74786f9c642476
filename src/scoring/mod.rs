// src/scoring/mod.rs
//! Deterministic profile scoring.
//!
//! Pure functions from [`ProfileData`] to a weighted [`ProfileScore`]: no
//! I/O, no clock, no randomness. The same profile always produces the same
//! score, which is what makes the downstream seeded LLM call reproducible.

use serde::{Deserialize, Serialize};

use crate::types::profile_data::{ProfileData, UNKNOWN};

pub mod keywords;
pub mod seed;

pub use keywords::INDUSTRY_KEYWORDS;
pub use seed::generate_seed;

/// Section weights; must sum to 1.0 so the overall score stays in [0, 100].
const WEIGHT_BASIC_INFO: f64 = 0.15;
const WEIGHT_EXPERIENCE: f64 = 0.35;
const WEIGHT_SKILLS: f64 = 0.25;
const WEIGHT_EDUCATION: f64 = 0.15;
const WEIGHT_KEYWORDS: f64 = 0.10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionScore {
    pub score: u32,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionScores {
    pub basic_info: SectionScore,
    pub experience: SectionScore,
    pub skills: SectionScore,
    pub education: SectionScore,
    pub keywords: SectionScore,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileScore {
    pub overall: u32,
    pub sections: SectionScores,
}

/// Compute the weighted profile score. Never fails: missing or empty fields
/// degrade the relevant section to its floor instead of raising an error.
pub fn calculate_profile_score(profile: &ProfileData) -> ProfileScore {
    let basic_info = score_basic_info(profile);
    let experience = score_experience(profile);
    let skills = score_skills(profile);
    let education = score_education(profile);
    let keywords = score_keywords(profile);

    let overall = (f64::from(basic_info.score) * WEIGHT_BASIC_INFO
        + f64::from(experience.score) * WEIGHT_EXPERIENCE
        + f64::from(skills.score) * WEIGHT_SKILLS
        + f64::from(education.score) * WEIGHT_EDUCATION
        + f64::from(keywords.score) * WEIGHT_KEYWORDS)
        .round() as u32;

    ProfileScore {
        overall,
        sections: SectionScores {
            basic_info,
            experience,
            skills,
            education,
            keywords,
        },
    }
}

/// Name 10, headline 20, location 10, about up to 60.
pub fn score_basic_info(profile: &ProfileData) -> SectionScore {
    let mut score = 0;
    let mut reasons = Vec::new();

    if !profile.name.is_empty() && profile.name != UNKNOWN {
        score += 10;
    } else {
        reasons.push("Missing name".to_string());
    }

    if profile.headline.chars().count() > 5 {
        score += 20;
    } else {
        reasons.push("Missing or incomplete headline".to_string());
    }

    if !profile.location.is_empty() && profile.location != UNKNOWN {
        score += 10;
    } else {
        reasons.push("Missing location".to_string());
    }

    let about_len = profile.about.chars().count();
    if about_len > 500 {
        score += 60;
    } else if about_len > 300 {
        score += 45;
    } else if about_len > 100 {
        score += 30;
    } else if about_len > 0 {
        score += 15;
        reasons.push("About section is too brief".to_string());
    } else {
        reasons.push("Missing about section".to_string());
    }

    SectionScore {
        score,
        reason: join_reasons(reasons, "Complete basic information"),
    }
}

/// Entry count worth up to 20, entry quality normalized to 80.
pub fn score_experience(profile: &ProfileData) -> SectionScore {
    if profile.experience.is_empty() {
        return SectionScore {
            score: 0,
            reason: "No experience listed".to_string(),
        };
    }

    let mut score = 0;
    let mut reasons = Vec::new();

    let count = profile.experience.len();
    match count {
        c if c >= 3 => score += 20,
        2 => score += 15,
        _ => {
            score += 10;
            reasons.push("Limited work history".to_string());
        }
    }

    let mut quality = 0u32;
    let mut complete = 0usize;

    for entry in &profile.experience {
        let mut entry_score = 0u32;

        if !entry.title.is_empty() {
            entry_score += 5;
        }
        if !entry.company.is_empty() {
            entry_score += 5;
        }
        if !entry.duration.is_empty() {
            entry_score += 5;
        }

        let description_len = entry.description.chars().count();
        if description_len > 300 {
            entry_score += 5;
        } else if description_len > 100 {
            entry_score += 3;
        } else if description_len > 0 {
            entry_score += 1;
        }

        if entry_score >= 15 {
            complete += 1;
        }
        quality += entry_score;
    }

    let max_quality = (count * 20) as f64;
    let normalized = (f64::from(quality) / max_quality * 80.0).round().min(80.0) as u32;
    score += normalized;

    if complete < count {
        reasons.push(format!("{} incomplete experience entries", count - complete));
    }

    SectionScore {
        score,
        reason: join_reasons(reasons, "Complete experience section"),
    }
}

/// Tiered purely by skill count; duplicates are counted as given.
pub fn score_skills(profile: &ProfileData) -> SectionScore {
    if profile.skills.is_empty() {
        return SectionScore {
            score: 0,
            reason: "No skills listed".to_string(),
        };
    }

    let (score, reason) = match profile.skills.len() {
        c if c >= 15 => (100, "Comprehensive skills section"),
        c if c >= 10 => (80, "Good skills section"),
        c if c >= 5 => (60, "Adequate skills section"),
        c if c >= 3 => (40, "Limited skills section"),
        _ => (20, "Very few skills listed"),
    };

    SectionScore {
        score,
        reason: reason.to_string(),
    }
}

/// Entry count worth up to 30, entry quality normalized to 70.
pub fn score_education(profile: &ProfileData) -> SectionScore {
    if profile.education.is_empty() {
        return SectionScore {
            score: 0,
            reason: "No education listed".to_string(),
        };
    }

    let mut score = 0;
    let mut reasons = Vec::new();

    let count = profile.education.len();
    if count >= 2 {
        score += 30;
    } else {
        score += 20;
    }

    let mut quality = 0u32;
    let mut complete = 0usize;

    for entry in &profile.education {
        let mut entry_score = 0u32;

        if !entry.school.is_empty() {
            entry_score += 10;
        }
        if !entry.degree.is_empty() {
            entry_score += 10;
        }
        if !entry.duration.is_empty() {
            entry_score += 5;
        }

        if entry_score >= 20 {
            complete += 1;
        }
        quality += entry_score;
    }

    let max_quality = (count * 25) as f64;
    let normalized = (f64::from(quality) / max_quality * 70.0).round().min(70.0) as u32;
    score += normalized;

    if complete < count {
        reasons.push(format!("{} incomplete education entries", count - complete));
    }

    SectionScore {
        score,
        reason: join_reasons(reasons, "Complete education section"),
    }
}

/// Substring matches against [`INDUSTRY_KEYWORDS`]; match percentage is
/// doubled before capping at 100, so a 50% match rate already saturates.
pub fn score_keywords(profile: &ProfileData) -> SectionScore {
    let mut parts = vec![profile.headline.clone(), profile.about.clone()];
    for entry in &profile.experience {
        parts.push(format!("{} {}", entry.title, entry.description));
    }
    parts.extend(profile.skills.iter().cloned());
    let all_text = parts.join(" ").to_lowercase();

    let matches = INDUSTRY_KEYWORDS
        .iter()
        .filter(|keyword| all_text.contains(*keyword))
        .count();

    let percentage = matches as f64 / INDUSTRY_KEYWORDS.len() as f64 * 100.0;
    let score = (percentage * 2.0).round().min(100.0) as u32;

    let reason = if score >= 80 {
        "Excellent keyword optimization"
    } else if score >= 60 {
        "Good keyword presence"
    } else if score >= 40 {
        "Moderate keyword presence"
    } else if score >= 20 {
        "Limited keyword presence"
    } else {
        "Very few industry keywords"
    };

    SectionScore {
        score,
        reason: reason.to_string(),
    }
}

fn join_reasons(reasons: Vec<String>, complete: &str) -> String {
    if reasons.is_empty() {
        complete.to_string()
    } else {
        reasons.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::profile_data::{EducationEntry, ExperienceEntry};

    fn full_experience(description_len: usize) -> ExperienceEntry {
        ExperienceEntry {
            title: "Engineer".to_string(),
            company: "Acme".to_string(),
            duration: "2020 - 2024".to_string(),
            description: "x".repeat(description_len),
        }
    }

    fn full_education() -> EducationEntry {
        EducationEntry {
            school: "ETH".to_string(),
            degree: "MSc".to_string(),
            duration: "2016 - 2018".to_string(),
        }
    }

    #[test]
    fn empty_profile_scores_zero_overall() {
        let profile = ProfileData::default();
        let result = calculate_profile_score(&profile);

        assert_eq!(result.sections.experience.score, 0);
        assert_eq!(result.sections.experience.reason, "No experience listed");
        assert_eq!(result.sections.skills.score, 0);
        assert_eq!(result.sections.education.score, 0);
        assert_eq!(result.sections.keywords.score, 0);
        assert_eq!(
            result.sections.basic_info.reason,
            "Missing name, Missing or incomplete headline, Missing location, Missing about section"
        );
        assert_eq!(result.sections.basic_info.score, 0);
        assert_eq!(result.overall, 0);
    }

    #[test]
    fn unknown_sentinels_score_like_missing() {
        let profile = ProfileData {
            name: UNKNOWN.to_string(),
            location: UNKNOWN.to_string(),
            ..ProfileData::default()
        };
        let basic = score_basic_info(&profile);
        assert_eq!(basic.score, 0);
        assert!(basic.reason.contains("Missing name"));
        assert!(basic.reason.contains("Missing location"));
    }

    #[test]
    fn basic_info_about_tiers() {
        let mut profile = ProfileData {
            name: "Jane".to_string(),
            headline: "Senior Product Manager".to_string(),
            location: "Zurich".to_string(),
            ..ProfileData::default()
        };

        profile.about = "x".repeat(501);
        assert_eq!(score_basic_info(&profile).score, 100);
        assert_eq!(
            score_basic_info(&profile).reason,
            "Complete basic information"
        );

        profile.about = "x".repeat(301);
        assert_eq!(score_basic_info(&profile).score, 85);

        profile.about = "x".repeat(101);
        assert_eq!(score_basic_info(&profile).score, 70);

        profile.about = "x".repeat(50);
        let brief = score_basic_info(&profile);
        assert_eq!(brief.score, 55);
        assert_eq!(brief.reason, "About section is too brief");

        profile.about = String::new();
        let missing = score_basic_info(&profile);
        assert_eq!(missing.score, 40);
        assert_eq!(missing.reason, "Missing about section");
    }

    #[test]
    fn headline_must_be_longer_than_five_chars() {
        let mut profile = ProfileData {
            name: "Jane".to_string(),
            headline: "CTO".to_string(),
            ..ProfileData::default()
        };
        assert!(score_basic_info(&profile)
            .reason
            .contains("Missing or incomplete headline"));

        profile.headline = "Chief Technology Officer".to_string();
        assert!(!score_basic_info(&profile)
            .reason
            .contains("Missing or incomplete headline"));
    }

    #[test]
    fn three_full_experience_entries_score_hundred() {
        let profile = ProfileData {
            experience: vec![
                full_experience(301),
                full_experience(301),
                full_experience(301),
            ],
            ..ProfileData::default()
        };
        let result = score_experience(&profile);
        assert_eq!(result.score, 100);
        assert_eq!(result.reason, "Complete experience section");
    }

    #[test]
    fn single_entry_notes_limited_history() {
        let profile = ProfileData {
            experience: vec![full_experience(301)],
            ..ProfileData::default()
        };
        let result = score_experience(&profile);
        // count 10 + quality 20/20 normalized to 80
        assert_eq!(result.score, 90);
        assert_eq!(result.reason, "Limited work history");
    }

    #[test]
    fn incomplete_experience_entries_are_counted() {
        let profile = ProfileData {
            experience: vec![
                full_experience(301),
                ExperienceEntry {
                    title: "Intern".to_string(),
                    ..ExperienceEntry::default()
                },
            ],
            ..ProfileData::default()
        };
        let result = score_experience(&profile);
        assert_eq!(result.reason, "1 incomplete experience entries");
        // count 15 + round(25/40 * 80) = 15 + 50
        assert_eq!(result.score, 65);
    }

    #[test]
    fn description_length_tiers_feed_entry_quality() {
        let mut profile = ProfileData {
            experience: vec![full_experience(150)],
            ..ProfileData::default()
        };
        // 5+5+5+3 = 18 -> round(18/20 * 80) = 72, +10 count
        assert_eq!(score_experience(&profile).score, 82);

        profile.experience[0].description = "short".to_string();
        // 5+5+5+1 = 16 -> round(16/20 * 80) = 64, +10 count
        assert_eq!(score_experience(&profile).score, 74);
    }

    #[test]
    fn skills_tier_boundaries() {
        let skill = |n: usize| ProfileData {
            skills: (0..n).map(|i| format!("skill-{}", i)).collect(),
            ..ProfileData::default()
        };

        assert_eq!(score_skills(&skill(0)).score, 0);
        assert_eq!(score_skills(&skill(0)).reason, "No skills listed");
        assert_eq!(score_skills(&skill(1)).score, 20);
        assert_eq!(score_skills(&skill(3)).score, 40);
        assert_eq!(score_skills(&skill(5)).score, 60);
        assert_eq!(score_skills(&skill(10)).score, 80);

        let fourteen = score_skills(&skill(14));
        assert_eq!(fourteen.score, 80);
        assert_eq!(fourteen.reason, "Good skills section");

        let fifteen = score_skills(&skill(15));
        assert_eq!(fifteen.score, 100);
        assert_eq!(fifteen.reason, "Comprehensive skills section");
    }

    #[test]
    fn education_scoring_counts_and_quality() {
        let profile = ProfileData {
            education: vec![full_education(), full_education()],
            ..ProfileData::default()
        };
        let result = score_education(&profile);
        assert_eq!(result.score, 100);
        assert_eq!(result.reason, "Complete education section");

        let single = ProfileData {
            education: vec![full_education()],
            ..ProfileData::default()
        };
        // count 20 + 25/25 normalized to 70
        assert_eq!(score_education(&single).score, 90);
    }

    #[test]
    fn incomplete_education_entries_are_counted() {
        let profile = ProfileData {
            education: vec![
                full_education(),
                EducationEntry {
                    school: "High School".to_string(),
                    ..EducationEntry::default()
                },
            ],
            ..ProfileData::default()
        };
        let result = score_education(&profile);
        assert_eq!(result.reason, "1 incomplete education entries");
        // count 30 + round(35/50 * 70) = 30 + 49
        assert_eq!(result.score, 79);
    }

    #[test]
    fn keyword_match_percentage_is_doubled_then_capped() {
        // 29 of 57 keywords (>50%) saturates at 100
        let half: Vec<String> = INDUSTRY_KEYWORDS
            .iter()
            .take(29)
            .map(|k| k.to_string())
            .collect();
        let profile = ProfileData {
            skills: half,
            ..ProfileData::default()
        };
        let result = score_keywords(&profile);
        assert_eq!(result.score, 100);
        assert_eq!(result.reason, "Excellent keyword optimization");
    }

    #[test]
    fn keyword_substring_matching_has_no_word_boundaries() {
        let profile = ProfileData {
            about: "micromanagement".to_string(),
            ..ProfileData::default()
        };
        // matches "management" inside "micromanagement"
        assert!(score_keywords(&profile).score > 0);
    }

    #[test]
    fn keyword_matching_is_case_insensitive() {
        let profile = ProfileData {
            headline: "LEADERSHIP and Strategy".to_string(),
            ..ProfileData::default()
        };
        // 2 of 57 -> round(3.5087 * 2) = 7
        let result = score_keywords(&profile);
        assert_eq!(result.score, 7);
        assert_eq!(result.reason, "Very few industry keywords");
    }

    #[test]
    fn scoring_is_deterministic() {
        let profile = ProfileData {
            name: "Jane Doe".to_string(),
            headline: "Senior Product Manager".to_string(),
            location: "Zurich".to_string(),
            about: "Leadership across product strategy and execution.".to_string(),
            experience: vec![full_experience(120), full_experience(10)],
            education: vec![full_education()],
            skills: vec!["Strategy".to_string(), "Negotiation".to_string()],
            ..ProfileData::default()
        };
        assert_eq!(
            calculate_profile_score(&profile),
            calculate_profile_score(&profile.clone())
        );
    }

    #[test]
    fn all_scores_stay_within_bounds() {
        let stress = ProfileData {
            name: "N".repeat(1000),
            headline: "H".repeat(1000),
            location: "L".repeat(1000),
            about: "management leadership strategy ".repeat(100),
            experience: (0..50).map(|_| full_experience(1000)).collect(),
            education: (0..50).map(|_| full_education()).collect(),
            skills: INDUSTRY_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            ..ProfileData::default()
        };
        let result = calculate_profile_score(&stress);
        assert!(result.overall <= 100);
        for section in [
            &result.sections.basic_info,
            &result.sections.experience,
            &result.sections.skills,
            &result.sections.education,
            &result.sections.keywords,
        ] {
            assert!(section.score <= 100);
        }
    }

    #[test]
    fn reference_scenario_jane_doe() {
        // name + headline present, location unknown, 120-char about,
        // one full experience entry with 50-char description, 4 skills,
        // one full education entry
        let profile = ProfileData {
            name: "Jane Doe".to_string(),
            headline: "Senior Product Manager".to_string(),
            location: UNKNOWN.to_string(),
            about: "y".repeat(120),
            experience: vec![full_experience(50)],
            education: vec![full_education()],
            skills: vec![
                "Roadmapping".to_string(),
                "Discovery".to_string(),
                "Analytics".to_string(),
                "A/B testing".to_string(),
            ],
            ..ProfileData::default()
        };
        let result = calculate_profile_score(&profile);

        // 10 name + 20 headline + 0 location + 30 about
        assert_eq!(result.sections.basic_info.score, 60);
        assert_eq!(result.sections.basic_info.reason, "Missing location");
        // 10 count + round(16/20 * 80) = 74
        assert_eq!(result.sections.experience.score, 74);
        assert_eq!(result.sections.skills.score, 40);
        // 20 count + 70 quality
        assert_eq!(result.sections.education.score, 90);
        // headline contributes "product" + "management" inside "Manager"? no:
        // "manager" does not contain "management"; matches are "product" only
        // via headline and none via skills -> 1 match -> round(1/57*200) = 4
        assert_eq!(result.sections.keywords.score, 4);

        // overall = round(60*0.15 + 74*0.35 + 40*0.25 + 90*0.15 + 4*0.10)
        //         = round(9 + 25.9 + 10 + 13.5 + 0.4) = round(58.8) = 59
        assert_eq!(result.overall, 59);
    }
}
