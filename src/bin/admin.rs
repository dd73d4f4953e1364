//! CLI administration tool for share-unlock.
//!
//! Provides commands for creating resumes and share links and for checking
//! the database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a resume that unlocks after 5 clicks
//! cargo run --bin admin -- resume create --required-clicks 5
//!
//! # Show a resume's export status
//! cargo run --bin admin -- resume show 1
//!
//! # Create a share link with a generated code
//! cargo run --bin admin -- share create --resume 1
//!
//! # List share links of a resume
//! cargo run --bin admin -- share list --resume 1
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or `DB_*` components): PostgreSQL connection

use share_unlock::application::services::{ResumeService, ShareService};
use share_unlock::config::Config;
use share_unlock::domain::entities::DEFAULT_REQUIRED_CLICKS;
use share_unlock::infrastructure::persistence::{PgResumeRepository, PgShareRepository};
use share_unlock::server::connect_pool;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing share-unlock.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage resumes
    Resume {
        #[command(subcommand)]
        action: ResumeAction,
    },

    /// Manage share links
    Share {
        #[command(subcommand)]
        action: ShareAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Resume subcommands.
#[derive(Subcommand)]
enum ResumeAction {
    /// Create a new resume with export locked
    Create {
        /// Clicks needed to unlock export
        #[arg(short, long)]
        required_clicks: Option<i64>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show a resume and its export status
    Show {
        /// Resume ID
        id: i64,
    },

    /// List recent resumes
    List {
        /// Maximum number of resumes to show
        #[arg(short, long, default_value_t = 20)]
        limit: i64,
    },
}

/// Share link subcommands.
#[derive(Subcommand)]
enum ShareAction {
    /// Create a share link for a resume
    Create {
        /// Resume ID
        #[arg(short, long)]
        resume: i64,

        /// Custom code (optional, generated if not provided)
        #[arg(short, long)]
        code: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List share links of a resume
    List {
        /// Resume ID
        #[arg(short, long)]
        resume: i64,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

type Services = (
    ResumeService<PgResumeRepository>,
    ShareService<PgShareRepository, PgResumeRepository>,
);

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::Resume { action } => handle_resume_action(action, services(&pool)).await?,
        Commands::Share { action } => handle_share_action(action, services(&pool)).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn services(pool: &PgPool) -> Services {
    let pool = Arc::new(pool.clone());
    let resume_repo = Arc::new(PgResumeRepository::new(pool.clone()));
    let share_repo = Arc::new(PgShareRepository::new(pool));

    (
        ResumeService::new(resume_repo.clone()),
        ShareService::new(share_repo, resume_repo),
    )
}

/// Dispatches resume commands.
async fn handle_resume_action(action: ResumeAction, (resumes, _): Services) -> Result<()> {
    match action {
        ResumeAction::Create {
            required_clicks,
            yes,
        } => {
            println!("{}", "📄 Create Resume".bright_blue().bold());
            println!();

            let threshold = required_clicks.unwrap_or(DEFAULT_REQUIRED_CLICKS);
            println!("  Required clicks: {}", threshold.to_string().cyan());
            println!();

            if !yes && !confirm("Create this resume?", true)? {
                return Ok(());
            }

            let resume = resumes
                .create_resume(Some(threshold))
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create resume: {}", e))?;

            println!("{}", "✅ Resume created".green().bold());
            println!("  ID: {}", resume.id.to_string().bright_yellow().bold());
            println!();
            println!(
                "  Next: {} admin share create --resume {}",
                "cargo run --bin".bright_cyan(),
                resume.id
            );
        }
        ResumeAction::Show { id } => {
            let status = resumes
                .unlock_status(id)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;

            println!("{}", format!("📄 Resume {}", id).bright_blue().bold());
            println!();
            println!(
                "  Clicks:    {} / {}",
                status.actual_clicks.to_string().bright_white().bold(),
                status.required_clicks
            );
            println!("  Remaining: {}", status.clicks_remaining);
            println!("  Export:    {}", export_label(status.export_unlocked));
            println!();
        }
        ResumeAction::List { limit } => {
            println!("{}", "📋 Resumes".bright_blue().bold());
            println!();

            let list = resumes
                .list_resumes(limit)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list resumes: {}", e))?;

            if list.is_empty() {
                println!("{}", "  No resumes found".yellow());
                return Ok(());
            }

            println!(
                "  {:<6} {:<12} {:<20} {:<10}",
                "ID".bright_white().bold(),
                "Clicks".bright_white().bold(),
                "Created".bright_white().bold(),
                "Export".bright_white().bold()
            );
            println!("  {}", "─".repeat(55).bright_black());

            for resume in &list {
                println!(
                    "  {:<6} {:<12} {:<20} {}",
                    resume.id.to_string().bright_black(),
                    format!("{}/{}", resume.actual_clicks, resume.required_clicks).cyan(),
                    resume
                        .created_at
                        .format("%Y-%m-%d %H:%M")
                        .to_string()
                        .bright_black(),
                    export_label(resume.export_unlocked)
                );
            }

            println!();
            println!("  Total: {}", list.len().to_string().bright_white().bold());
            println!();
        }
    }

    Ok(())
}

/// Dispatches share link commands.
async fn handle_share_action(action: ShareAction, (_, shares): Services) -> Result<()> {
    match action {
        ShareAction::Create { resume, code, yes } => {
            println!("{}", "🔗 Create Share Link".bright_blue().bold());
            println!();
            println!("  Resume: {}", resume.to_string().cyan());
            match code {
                Some(ref c) => println!("  Code:   {}", c.cyan()),
                None => println!("  Code:   {}", "(generated)".bright_black()),
            }
            println!();

            if !yes && !confirm("Create this share link?", true)? {
                return Ok(());
            }

            let link = shares
                .create_share_link(resume, code)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create share link: {}", e))?;

            println!("{}", "✅ Share link created".green().bold());
            println!("  Code: {}", link.code.bright_yellow().bold());
            println!();
            println!("{}", "Example:".bright_white());
            println!(
                "  curl \"http://localhost:3000/api/share?code={}\"",
                link.code.bright_yellow()
            );
            println!();
        }
        ShareAction::List { resume } => {
            println!(
                "{}",
                format!("📋 Share links of resume {}", resume)
                    .bright_blue()
                    .bold()
            );
            println!();

            let links = shares
                .list_share_links(resume)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list share links: {}", e))?;

            if links.is_empty() {
                println!("{}", "  No share links found".yellow());
                return Ok(());
            }

            println!(
                "  {:<6} {:<66} {:<8}",
                "ID".bright_white().bold(),
                "Code".bright_white().bold(),
                "Clicks".bright_white().bold()
            );
            println!("  {}", "─".repeat(82).bright_black());

            for link in &links {
                println!(
                    "  {:<6} {:<66} {}",
                    link.id.to_string().bright_black(),
                    link.code.cyan(),
                    link.click_count.to_string().bright_green()
                );
            }
            println!();
        }
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1")
                .fetch_one(pool)
                .await
                .context("Database did not answer")?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
    }

    Ok(())
}

fn confirm(prompt: &str, default: bool) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
    }

    Ok(confirmed)
}

fn export_label(unlocked: bool) -> ColoredString {
    if unlocked {
        "UNLOCKED".green()
    } else {
        "LOCKED".yellow()
    }
}
