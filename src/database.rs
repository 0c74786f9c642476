// src/database.rs
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::path::PathBuf;
use tracing::info;
use uuid::Uuid;

use crate::analysis::ProfileAnalysis;

#[derive(Debug)]
pub struct DatabaseConfig {
    pub database_path: PathBuf,
    pub pool: Option<SqlitePool>,
}

impl DatabaseConfig {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            database_path,
            pool: None,
        }
    }

    /// Initialize the database connection pool
    pub async fn init_pool(&mut self) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.database_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("Failed to create database directory")?;
        }

        let database_url = format!("sqlite:{}?mode=rwc", self.database_path.display());

        let pool = SqlitePool::connect(&database_url)
            .await
            .context("Failed to connect to SQLite database")?;
        self.pool = Some(pool);

        info!("Database connection pool initialized: {}", database_url);
        Ok(())
    }

    /// Get the database pool
    pub fn pool(&self) -> Result<&SqlitePool> {
        self.pool
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Database pool not initialized. Call init_pool() first."))
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        run_migrations(self.pool()?).await
    }
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS analyses (
            id TEXT PRIMARY KEY,
            profile_url TEXT NOT NULL,
            profile_slug TEXT NOT NULL,
            profile_name TEXT NOT NULL,
            overall_score INTEGER NOT NULL,
            seed INTEGER NOT NULL,
            profile_json TEXT NOT NULL,
            score_json TEXT NOT NULL,
            analysis_json TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_analyses_profile_url
        ON analyses(profile_url);
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_analyses_created_at
        ON analyses(created_at);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database migrations completed successfully");
    Ok(())
}

/// One stored analysis run. The profile, score and narrative are kept as
/// JSON columns so the full result can be replayed without re-scraping.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AnalysisRecord {
    pub id: String,
    pub profile_url: String,
    pub profile_slug: String,
    pub profile_name: String,
    pub overall_score: i64,
    pub seed: i64,
    pub profile_json: String,
    pub score_json: String,
    pub analysis_json: String,
    pub created_at: DateTime<Utc>,
}

impl AnalysisRecord {
    pub fn from_analysis(
        profile_url: &str,
        profile_slug: &str,
        analysis: &ProfileAnalysis,
    ) -> Result<Self> {
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            profile_url: profile_url.to_string(),
            profile_slug: profile_slug.to_string(),
            profile_name: analysis.profile.name.clone(),
            overall_score: i64::from(analysis.score.overall),
            seed: i64::from(analysis.seed),
            profile_json: serde_json::to_string(&analysis.profile)
                .context("Failed to serialize profile")?,
            score_json: serde_json::to_string(&analysis.score)
                .context("Failed to serialize score")?,
            analysis_json: serde_json::to_string(&analysis.analysis)
                .context("Failed to serialize analysis")?,
            created_at: Utc::now(),
        })
    }

    /// Rebuild the full analysis result from the stored JSON columns.
    pub fn decode(&self) -> Result<ProfileAnalysis> {
        Ok(ProfileAnalysis {
            profile: serde_json::from_str(&self.profile_json)
                .context("Failed to parse stored profile JSON")?,
            score: serde_json::from_str(&self.score_json)
                .context("Failed to parse stored score JSON")?,
            seed: u32::try_from(self.seed).context("Stored seed out of range")?,
            analysis: serde_json::from_str(&self.analysis_json)
                .context("Failed to parse stored analysis JSON")?,
        })
    }
}

/// Lightweight row for list views, without the JSON payload columns.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AnalysisSummary {
    pub id: String,
    pub profile_url: String,
    pub profile_slug: String,
    pub profile_name: String,
    pub overall_score: i64,
    pub seed: i64,
    pub created_at: DateTime<Utc>,
}

pub struct AnalysisRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AnalysisRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, record: &AnalysisRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO analyses (
                id, profile_url, profile_slug, profile_name,
                overall_score, seed, profile_json, score_json,
                analysis_json, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.profile_url)
        .bind(&record.profile_slug)
        .bind(&record.profile_name)
        .bind(record.overall_score)
        .bind(record.seed)
        .bind(&record.profile_json)
        .bind(&record.score_json)
        .bind(&record.analysis_json)
        .bind(record.created_at)
        .execute(self.pool)
        .await?;

        info!(
            "Stored analysis {} for {} (score {})",
            record.id, record.profile_slug, record.overall_score
        );
        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<AnalysisRecord>> {
        let record = sqlx::query_as::<_, AnalysisRecord>(
            r#"
            SELECT id, profile_url, profile_slug, profile_name,
                   overall_score, seed, profile_json, score_json,
                   analysis_json, created_at
            FROM analyses
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(record)
    }

    pub async fn latest_for_url(&self, profile_url: &str) -> Result<Option<AnalysisRecord>> {
        let record = sqlx::query_as::<_, AnalysisRecord>(
            r#"
            SELECT id, profile_url, profile_slug, profile_name,
                   overall_score, seed, profile_json, score_json,
                   analysis_json, created_at
            FROM analyses
            WHERE profile_url = ?
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(profile_url)
        .fetch_optional(self.pool)
        .await?;

        Ok(record)
    }

    pub async fn list_recent(&self, limit: i64) -> Result<Vec<AnalysisSummary>> {
        let records = sqlx::query_as::<_, AnalysisSummary>(
            r#"
            SELECT id, profile_url, profile_slug, profile_name,
                   overall_score, seed, created_at
            FROM analyses
            ORDER BY created_at DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(records)
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM analyses WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("Deleted analysis record: {}", id);
        }

        Ok(deleted)
    }

    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM analyses")
            .fetch_one(self.pool)
            .await?;

        Ok(count.0)
    }
}
