// src/lib.rs
pub mod analysis;
pub mod database;
pub mod environment;
pub mod records_cli;
pub mod scoring;
pub mod types;
pub mod utils;
pub mod web;

pub use analysis::{AnalysisResult, ProfileAnalysis, ProfileAnalyzer};
pub use scoring::{calculate_profile_score, ProfileScore};
pub use types::ProfileData;
pub use web::start_web_server;
