use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod session;

use config::ConfigLoader;
use session::SelectionArgs;

#[derive(Parser)]
#[command(name = "modelpick", about = "Pick an AI provider, API key and model")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    selection: SelectionArgs,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List providers offering the selected model kind
    Providers,
    /// Show the current selection
    Show(commands::show::ShowArgs),
    /// Set or clear the API key of the selected provider
    Key(commands::key::KeyArgs),
    /// List, choose or type the model id of the selected provider
    Model(commands::model::ModelArgs),
    /// Pick provider, model and key interactively
    Pick,
    /// Manage configuration
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = ConfigLoader::load()?;
    let selection = &cli.selection;

    match cli.command {
        Commands::Providers => commands::providers::run(&config, selection),
        Commands::Show(args) => commands::show::run(args, &config, selection),
        Commands::Key(args) => commands::key::run(args, &config, selection),
        Commands::Model(args) => commands::model::run(args, &config, selection),
        Commands::Pick => commands::pick::run(&config, selection),
        Commands::Config(args) => commands::config::run(args, &config),
    }
}
