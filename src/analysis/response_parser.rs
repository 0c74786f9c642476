// src/analysis/response_parser.rs
//! Turns the raw LLM completion text into an [`AnalysisResult`].
//!
//! The model is instructed to answer with a JSON object, but completions
//! occasionally arrive fenced in markdown or as free-form prose. Parsing is
//! total: JSON first, then a line-based extraction of the known sections,
//! and finally the default result.

use tracing::warn;

use super::AnalysisResult;

pub fn parse_analysis(raw: &str) -> AnalysisResult {
    let cleaned = strip_code_fences(raw);
    match serde_json::from_str::<AnalysisResult>(cleaned) {
        Ok(parsed) => parsed,
        Err(_) => {
            warn!("LLM response was not valid JSON, falling back to text extraction");
            parse_plain_text(cleaned)
        }
    }
}

fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    match rest.strip_suffix("```") {
        Some(body) => body.trim(),
        None => trimmed,
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Section {
    Summary,
    Strengths,
    Suggestions,
    Keywords,
    CareerPaths,
}

fn parse_plain_text(text: &str) -> AnalysisResult {
    let mut result = AnalysisResult::default();
    let mut summary_lines: Vec<&str> = Vec::new();
    let mut current: Option<Section> = None;

    for line in text.lines() {
        if let Some(section) = detect_heading(line) {
            current = Some(section);
            continue;
        }

        let Some(section) = current else {
            // prose before the first heading counts as summary
            if !line.trim().is_empty() {
                summary_lines.push(line.trim());
            }
            continue;
        };

        match section {
            Section::Summary => {
                if !line.trim().is_empty() {
                    summary_lines.push(line.trim());
                }
            }
            Section::Strengths => push_item(&mut result.strengths, line),
            Section::Suggestions => push_item(&mut result.suggestions, line),
            Section::CareerPaths => push_item(&mut result.career_paths, line),
            Section::Keywords => {
                if let Some(item) = bullet_item(line) {
                    result.keywords.push(item.to_string());
                } else {
                    // keyword lists often arrive comma-separated on one line
                    result.keywords.extend(
                        line.split(',')
                            .map(|k| k.trim().trim_matches('*').trim().to_string())
                            .filter(|k| !k.is_empty()),
                    );
                }
            }
        }
    }

    if !summary_lines.is_empty() {
        result.summary = summary_lines.join(" ");
    }

    result
}

fn push_item(items: &mut Vec<String>, line: &str) {
    if let Some(item) = bullet_item(line) {
        items.push(item.to_string());
    }
}

fn detect_heading(line: &str) -> Option<Section> {
    let cleaned = line
        .trim()
        .trim_matches(|c: char| {
            matches!(c, '#' | '*' | ':' | '.' | ')' | ' ') || c.is_ascii_digit()
        })
        .to_lowercase();

    match cleaned.as_str() {
        "summary" | "profile summary" => Some(Section::Summary),
        "strengths" | "key strengths" => Some(Section::Strengths),
        "suggestions" | "improvements" | "recommendations" | "suggestions for improvement" => {
            Some(Section::Suggestions)
        }
        "keywords" | "recommended keywords" | "industry keywords" => Some(Section::Keywords),
        "career paths" | "potential career paths" | "suggested career paths" => {
            Some(Section::CareerPaths)
        }
        _ => None,
    }
}

fn bullet_item(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    let rest = trimmed.strip_prefix(&['-', '*', '\u{2022}'][..]).or_else(|| {
        let digits = trimmed.trim_start_matches(|c: char| c.is_ascii_digit());
        if digits.len() < trimmed.len() {
            digits.strip_prefix(&['.', ')'][..])
        } else {
            None
        }
    })?;

    let item = rest.trim().trim_matches('*').trim();
    (!item.is_empty()).then_some(item)
}
