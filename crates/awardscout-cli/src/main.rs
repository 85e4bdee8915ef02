mod render;
mod session;

use std::path::PathBuf;

use awardscout_insight::{BatchOptions, GeminiClient};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "awardscout-cli")]
#[command(about = "Match a student profile against the award catalog and get AI insight")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Inputs every subcommand needs to start a matching session.
#[derive(Debug, Args)]
struct SessionArgs {
    /// Student profile JSON file
    #[arg(long)]
    profile: PathBuf,
    /// Award catalog YAML file (defaults to `AWARDSCOUT_CATALOG_PATH`)
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Score the profile against every award and print the categorized matches
    Match {
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Estimate the chance of winning one matched award
    Analyze {
        #[command(flatten)]
        session: SessionArgs,
        /// Award id from the catalog
        #[arg(long)]
        award_id: String,
    },
    /// Analyze the top matches one at a time and print every analysis obtained
    AnalyzeTop {
        #[command(flatten)]
        session: SessionArgs,
        /// Number of leading matches to analyze (defaults to `AWARDSCOUT_BATCH_SIZE`)
        #[arg(short = 'n', long)]
        top: Option<usize>,
    },
    /// Generate an essay outline for one matched award
    Essay {
        #[command(flatten)]
        session: SessionArgs,
        /// Award id from the catalog
        #[arg(long)]
        award_id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = awardscout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let today = chrono::Local::now().date_naive();

    match cli.command {
        Commands::Match { session: args } => {
            let session = session::start(&args, &config)?;
            print!("{}", render::matches(session.categorized(), today));
        }
        Commands::Analyze { session: args, award_id } => {
            let session = session::start(&args, &config)?;
            let model = GeminiClient::from_config(&config)?;
            let analysis = session.analyze(&model, &award_id).await?;
            print!("{}", render::analysis(&analysis));
        }
        Commands::AnalyzeTop { session: args, top } => {
            let session = session::start(&args, &config)?;
            let model = GeminiClient::from_config(&config)?;
            let mut options = BatchOptions::from_config(&config);
            if let Some(top) = top {
                options.top_n = top;
            }
            let report = session.analyze_top(&model, &options).await;
            print!("{}", render::batch(&session, &report));
        }
        Commands::Essay { session: args, award_id } => {
            let session = session::start(&args, &config)?;
            let model = GeminiClient::from_config(&config)?;
            let guide = session.essay_guide(&model, &award_id).await?;
            let award_name = session
                .matches()
                .iter()
                .find(|m| m.award.id == award_id)
                .map_or(award_id.as_str(), |m| m.award.name.as_str());
            print!("{}", guide.to_plain_text(award_name));
        }
    }

    Ok(())
}
