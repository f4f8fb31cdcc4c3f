use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, Subcommand};

mod config;
mod dimensions;
mod extract;
mod models;
mod normalize;
mod profile;
mod report;
mod skills;
mod store;
mod sync;

use models::{default_connections, LearningDnaProfile, Platform, PlatformDataCache};
use store::ProfileStore;

#[derive(Parser)]
#[command(name = "learning-dna")]
#[command(about = "Aggregate cross-platform achievements into a Learning DNA profile", long_about = None)]
struct Cli {
    /// User whose profile to operate on.
    #[arg(long, global = true, default_value = "demo")]
    user: String,
    /// Directory holding profile snapshots.
    #[arg(long, global = true, default_value = ".learning-dna")]
    data_dir: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect a platform account and run its first sync
    Connect {
        platform: Platform,
        #[arg(long)]
        username: String,
    },
    /// Disconnect a platform and purge its signals
    Disconnect { platform: Platform },
    /// Re-sync one connected platform
    Sync { platform: Platform },
    /// Sync every connected platform concurrently
    SyncAll,
    /// Print the overall score and dimension breakdown
    Score,
    /// List derived skills by confidence
    Skills {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Generate a markdown report
    Report {
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

fn load_or_init(store: &ProfileStore, user_id: &str) -> anyhow::Result<LearningDnaProfile> {
    if let Some(profile) = store.load(user_id)? {
        return Ok(profile);
    }
    Ok(profile::build_learning_dna_profile(
        user_id,
        Vec::new(),
        PlatformDataCache::default(),
        default_connections(),
        Utc::now(),
    ))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let store = ProfileStore::new(&cli.data_dir);
    let mut profile = load_or_init(&store, &cli.user)?;

    match cli.command {
        Commands::Connect { platform, username } => {
            sync::begin_connect(&mut profile, platform, &username);
            sync::sync_platform(&mut profile, platform).await?;
            store.save(&profile)?;
            println!(
                "Connected {} as {username}. Overall score: {}.",
                platform.display_name(),
                profile.overall_score
            );
        }
        Commands::Disconnect { platform } => {
            sync::disconnect_platform(&mut profile, platform);
            store.save(&profile)?;
            println!(
                "Disconnected {}. Overall score: {}.",
                platform.display_name(),
                profile.overall_score
            );
        }
        Commands::Sync { platform } => {
            sync::sync_platform(&mut profile, platform).await?;
            store.save(&profile)?;
            println!(
                "Synced {}. {} signals, overall score {}.",
                platform.display_name(),
                profile.signals.len(),
                profile.overall_score
            );
        }
        Commands::SyncAll => {
            let outcomes = sync::sync_all(&mut profile).await?;
            store.save(&profile)?;
            if outcomes.is_empty() {
                println!("No connected platforms to sync.");
                return Ok(());
            }
            for outcome in outcomes {
                match outcome.error {
                    None => println!("- {}: synced", outcome.platform.display_name()),
                    Some(error) => {
                        println!("- {}: failed ({error})", outcome.platform.display_name())
                    }
                }
            }
            println!("Overall score: {}.", profile.overall_score);
        }
        Commands::Score => {
            let d = &profile.dimensions;
            println!("Learning DNA score for {}: {}/100", cli.user, profile.overall_score);
            println!("- Contribution: {}", d.contribution);
            println!("- Problem solving: {}", d.problem_solving);
            println!("- Learning: {}", d.learning);
            println!("- Community: {}", d.community);
            println!("- Breadth: {}", d.breadth);
            println!("- Depth: {}", d.depth);
        }
        Commands::Skills { limit } => {
            if profile.skills.is_empty() {
                println!("No skills derived yet. Connect a platform and sync.");
                return Ok(());
            }
            for skill in profile.skills.iter().take(limit) {
                println!(
                    "- {} ({:?}) confidence {} from {} signals",
                    skill.name,
                    skill.proficiency,
                    skill.confidence,
                    skill.evidence.len()
                );
            }
        }
        Commands::Report { out } => {
            let report = report::build_report(&profile);
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
