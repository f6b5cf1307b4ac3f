//! Set or clear the API key of the selected provider.

use anyhow::Result;
use clap::Args;
use dialoguer::{Password, theme::ColorfulTheme};

use super::prompts::{print_status, print_success};
use crate::config::ModelpickConfig;
use crate::session::{self, SelectionArgs};

/// Key arguments.
#[derive(Args, Debug)]
pub struct KeyArgs {
    /// API key (prompted without echo if omitted)
    #[arg(conflicts_with = "clear")]
    pub value: Option<String>,

    /// Forget the key for this provider
    #[arg(long)]
    pub clear: bool,
}

/// Run key command.
pub fn run(args: KeyArgs, config: &ModelpickConfig, selection: &SelectionArgs) -> Result<()> {
    let mut selector = session::open(config, selection)?;
    let provider = selector.selected_provider().to_string();

    let value = if args.clear {
        String::new()
    } else if let Some(value) = args.value {
        value
    } else {
        println!("Enter API key for {}", provider);
        Password::with_theme(&ColorfulTheme::default())
            .with_prompt("API key")
            .allow_empty_password(true)
            .interact()?
    };

    selector.set_credential(value);

    if selector.credential().is_empty() {
        print_success(&format!("Cleared API key for {provider}"))?;
    } else {
        print_success(&format!(
            "Saved API key for {provider} ({})",
            selector.credential().masked()
        ))?;
    }
    print_status(selector.handle_status())?;
    Ok(())
}
