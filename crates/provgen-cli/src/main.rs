mod cmd;
mod output;
mod prompt;
mod root;

use clap::{Parser, Subcommand};
use cmd::generate::{GenerateSubcommand, PipelineFlags};
use cmd::schema::SchemaSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "provgen",
    about = "Turn natural-language requests into Terraform and workflow pull requests",
    version,
    propagate_version = true
)]
struct Cli {
    /// Path to provgen.yaml (default: walk up from the current directory)
    #[arg(long, global = true, env = "PROVGEN_CONFIG")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a free-text request and run the full pipeline
    Run {
        /// The request, e.g. "create an Azure resource group called rg-demo"
        text: String,

        /// Override the chat API base URL (gateways, test doubles)
        #[arg(long, env = "PROVGEN_OPENAI_BASE_URL")]
        base_url: Option<String>,

        #[command(flatten)]
        flags: PipelineFlags,
    },

    /// Generate artifacts directly, without the classifier
    Generate {
        #[command(subcommand)]
        subcommand: GenerateSubcommand,
    },

    /// Inspect the built-in schema registry
    Schema {
        #[command(subcommand)]
        subcommand: SchemaSubcommand,
    },

    /// List Azure regions known to the validation catalog
    Regions,

    /// Write a starter provgen.yaml
    Init,
}

fn main() {
    // Load .env before clap resolves env-backed arguments.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Diagnostics go to stderr so `--json` stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();

    let result = match cli.command {
        Commands::Run { text, base_url, flags } => {
            cmd::run::run(config_path, &text, base_url.as_deref(), &flags, cli.json)
        }
        Commands::Generate { subcommand } => cmd::generate::run(config_path, subcommand, cli.json),
        Commands::Schema { subcommand } => cmd::schema::run(subcommand, cli.json),
        Commands::Regions => cmd::regions::run(cli.json),
        Commands::Init => cmd::init::run(config_path),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
