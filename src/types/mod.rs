// src/types/mod.rs
pub mod profile_data;

pub use profile_data::{EducationEntry, ExperienceEntry, ProfileData};
