// src/records_cli.rs
use crate::database::{AnalysisRepository, DatabaseConfig};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::error;

const EXPORT_LIMIT: i64 = 100_000;

#[derive(Parser)]
#[command(name = "records")]
#[command(about = "Manage stored profile analyses")]
pub struct RecordsCli {
    #[command(subcommand)]
    pub command: RecordsCommand,

    #[arg(long, default_value = "data/profilyze.db")]
    pub database_path: PathBuf,
}

#[derive(Subcommand)]
pub enum RecordsCommand {
    /// List recent analyses
    List {
        #[arg(long, default_value_t = 20)]
        limit: i64,
    },
    /// Show a stored analysis in full
    Show { id: String },
    /// Delete a stored analysis
    Delete { id: String },
    /// Export analysis summaries to a CSV file
    Export { csv_file: PathBuf },
    /// Initialize the database
    Init,
}

pub async fn handle_records_command(cli: RecordsCli) -> Result<()> {
    let mut db_config = DatabaseConfig::new(cli.database_path.clone());
    db_config.init_pool().await?;
    db_config.migrate().await?;

    let pool = db_config.pool()?;
    let repo = AnalysisRepository::new(pool);

    match cli.command {
        RecordsCommand::List { limit } => match repo.list_recent(limit).await {
            Ok(summaries) => {
                if summaries.is_empty() {
                    println!("No stored analyses found.");
                } else {
                    println!(
                        "{:<38} {:<25} {:<7} {:<12} {:<20}",
                        "ID", "Name", "Score", "Seed", "Created"
                    );
                    println!("{}", "-".repeat(105));

                    for summary in summaries {
                        println!(
                            "{:<38} {:<25} {:<7} {:<12} {:<20}",
                            summary.id,
                            summary.profile_name,
                            summary.overall_score,
                            summary.seed,
                            summary.created_at.format("%Y-%m-%d %H:%M")
                        );
                    }
                }
            }
            Err(e) => {
                error!("Failed to list analyses: {}", e);
                println!("Error: {}", e);
            }
        },

        RecordsCommand::Show { id } => match repo.find_by_id(&id).await {
            Ok(Some(record)) => {
                println!("Analysis {}", record.id);
                println!("  Profile:  {} ({})", record.profile_name, record.profile_url);
                println!("  Score:    {}/100", record.overall_score);
                println!("  Seed:     {}", record.seed);
                println!(
                    "  Created:  {}",
                    record.created_at.format("%Y-%m-%d %H:%M:%S UTC")
                );

                let analysis = record.decode()?;
                println!();
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            }
            Ok(None) => {
                println!("No analysis found with id: {}", id);
            }
            Err(e) => {
                error!("Failed to load analysis {}: {}", id, e);
                println!("Error: {}", e);
            }
        },

        RecordsCommand::Delete { id } => match repo.delete(&id).await {
            Ok(true) => {
                println!("Deleted analysis: {}", id);
            }
            Ok(false) => {
                println!("No analysis found with id: {}", id);
            }
            Err(e) => {
                error!("Failed to delete analysis {}: {}", id, e);
                println!("Error: {}", e);
            }
        },

        RecordsCommand::Export { csv_file } => {
            let summaries = repo.list_recent(EXPORT_LIMIT).await?;

            let mut writer = csv::Writer::from_path(&csv_file)
                .with_context(|| format!("Failed to create CSV file: {}", csv_file.display()))?;

            writer.write_record([
                "id",
                "profile_url",
                "profile_slug",
                "profile_name",
                "overall_score",
                "seed",
                "created_at",
            ])?;

            let count = summaries.len();
            for summary in summaries {
                writer.write_record([
                    summary.id.as_str(),
                    summary.profile_url.as_str(),
                    summary.profile_slug.as_str(),
                    summary.profile_name.as_str(),
                    &summary.overall_score.to_string(),
                    &summary.seed.to_string(),
                    &summary.created_at.to_rfc3339(),
                ])?;
            }

            writer.flush().context("Failed to flush CSV file")?;
            println!("Exported {} analyses to {}", count, csv_file.display());
        }

        RecordsCommand::Init => {
            println!("Database initialized at: {}", cli.database_path.display());
            println!("  Tables created: analyses");
            println!("  Ready to store profile analyses");
        }
    }

    Ok(())
}
