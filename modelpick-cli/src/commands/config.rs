use crate::config::{ConfigLoader, ModelpickConfig};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (merged)
    Show,
    /// Show configuration paths and where preferences are stored
    Path,
}

pub fn run(args: ConfigArgs, config: &ModelpickConfig) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(config),
        ConfigCommands::Path => show_paths(config),
    }
}

fn show_config(config: &ModelpickConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{}", toml_str);
    Ok(())
}

fn show_paths(config: &ModelpickConfig) -> Result<()> {
    println!("User config:    {:?}", ConfigLoader::user_config_path());
    println!("Project config: {:?}", ConfigLoader::project_config_path());
    let storage = config
        .selection
        .storage_dir
        .clone()
        .unwrap_or_else(modelpick_paths::data_dir);
    println!("Model ids:      {:?}", storage);
    println!(
        "API keys:       system keyring (service {:?})",
        modelpick_models::store::DEFAULT_SERVICE
    );
    Ok(())
}
