mod commands;
mod providers;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use castdir_core::Studio;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "castdir")]
#[command(about = "Plan, produce and republish your channel's content from a local studio directory")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a studio directory with its default config
    Init {
        /// Studio location (default: the configured studio_dir)
        path: Option<PathBuf>,
    },
    /// Show or edit the creator profile
    Profile {
        #[arg(long)]
        niche: Option<String>,

        #[arg(long)]
        channel_goal: Option<String>,

        #[arg(long)]
        tone: Option<String>,

        #[arg(long)]
        audience: Option<String>,

        /// Prompt for every profile field interactively
        #[arg(long)]
        edit: bool,
    },
    /// Add a content item
    New {
        title: String,

        /// Niche tag for the item
        #[arg(long)]
        niche: Option<String>,

        /// Free-form notes stored as the brief
        #[arg(long)]
        notes: Option<String>,
    },
    /// List content items
    List {
        /// Only items in this stage
        #[arg(short, long)]
        stage: Option<String>,
    },
    /// Show one content item (by slug or id prefix)
    Show { content: String },
    /// Move a content item to another stage
    Stage { content: String, stage: String },
    /// Generate titles and book posting dates
    Plan {
        /// Posting cadence, 1-7 slots per week
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=7))]
        videos_per_week: Option<u32>,

        /// Planning horizon in months
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        months: Option<u32>,

        /// How many titles to generate
        #[arg(long, default_value_t = 10)]
        count: usize,

        /// Video style passed to the title generator
        #[arg(long, default_value = "how_to")]
        style: String,

        /// Target duration in minutes
        #[arg(long)]
        duration: Option<u32>,

        /// Constrain titles to a specific topic
        #[arg(long)]
        topic: Option<String>,

        /// Book empty slots without generating titles
        #[arg(long)]
        no_titles: bool,
    },
    /// Show booked slots in a date range
    Calendar {
        /// First date to show (YYYY-MM-DD, default today)
        #[arg(long)]
        from: Option<String>,

        /// Last date to show (YYYY-MM-DD, default end of the planning horizon)
        #[arg(long)]
        to: Option<String>,
    },
    /// Turn a booked slot into a content item
    Promote {
        /// Slot date (YYYY-MM-DD)
        date: String,
    },
    /// Draft a video script for a content item
    Script { content: String },
    /// Run one automation cycle (poll, transcribe, draft, publish)
    Run,
    /// Summarize the pipeline
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("castdir=info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Profile {
            niche,
            channel_goal,
            tone,
            audience,
            edit,
        } => {
            let studio = Studio::load()?;
            commands::profile::run(studio, niche, channel_goal, tone, audience, edit)
        }
        Commands::New {
            title,
            niche,
            notes,
        } => {
            let studio = Studio::load()?;
            commands::new::run(&studio, title, niche, notes)
        }
        Commands::List { stage } => {
            let studio = Studio::load()?;
            commands::list::run(&studio, stage.as_deref())
        }
        Commands::Show { content } => {
            let studio = Studio::load()?;
            commands::show::run(&studio, &content)
        }
        Commands::Stage { content, stage } => {
            let studio = Studio::load()?;
            commands::stage::run(&studio, &content, &stage)
        }
        Commands::Plan {
            videos_per_week,
            months,
            count,
            style,
            duration,
            topic,
            no_titles,
        } => {
            let studio = Studio::load()?;
            let args = commands::plan::PlanArgs {
                videos_per_week,
                months,
                count,
                style,
                duration,
                topic,
                no_titles,
            };
            commands::plan::run(&studio, args).await
        }
        Commands::Calendar { from, to } => {
            let studio = Studio::load()?;
            commands::calendar::run(&studio, from.as_deref(), to.as_deref())
        }
        Commands::Promote { date } => {
            let studio = Studio::load()?;
            commands::promote::run(&studio, &date)
        }
        Commands::Script { content } => {
            let studio = Studio::load()?;
            commands::script::run(&studio, &content).await
        }
        Commands::Run => {
            let studio = Studio::load()?;
            commands::run::run(&studio).await
        }
        Commands::Status => {
            let studio = Studio::load()?;
            commands::status::run(&studio)
        }
    }
}
