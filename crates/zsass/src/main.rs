//! zsass CLI - Main entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "zsass")]
#[command(version)]
#[command(about = "Build the zsass-mixins stylesheet library", long_about = None)]
struct Cli {
    /// Project root containing package.json
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Configuration file (defaults to zsass.yml in the project root)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Concatenate the mixins, then compile the sample stylesheet
    Default,

    /// Concatenate the mixins, then generate the documentation
    Doc,

    /// Run sequences or single tasks, in the given order
    Run {
        /// Sequence or task names
        #[arg(required = true)]
        targets: Vec<String>,
    },

    /// List the available sequences and tasks
    Tasks,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zsass=info,zsass_build=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let project = commands::ProjectArgs {
        root: cli.root,
        config: cli.config,
    };

    match cli.command {
        None | Some(Commands::Default) => commands::build::execute(&project, &["default"]),
        Some(Commands::Doc) => commands::build::execute(&project, &["doc"]),
        Some(Commands::Run { targets }) => commands::build::execute(&project, &targets),
        Some(Commands::Tasks) => commands::tasks::execute(&project),
    }
}
