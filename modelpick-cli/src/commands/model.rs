//! Choose the model id of the selected provider.

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use modelpick_models::ModelSelector;

use super::prompts::{print_status, print_success};
use crate::config::ModelpickConfig;
use crate::session::{self, SelectionArgs};

/// Model arguments.
#[derive(Args, Debug)]
pub struct ModelArgs {
    /// Model id; ids outside the known list are accepted as custom ids
    #[arg(conflicts_with = "toggle_custom")]
    pub id: Option<String>,

    /// Switch between picking from the list and typing a custom id
    #[arg(long)]
    pub toggle_custom: bool,
}

/// Run model command.
pub fn run(args: ModelArgs, config: &ModelpickConfig, selection: &SelectionArgs) -> Result<()> {
    let mut selector = session::open(config, selection)?;

    if let Some(id) = args.id {
        selector.set_model_id(id);
    } else if args.toggle_custom {
        selector.toggle_custom_model();
    } else {
        render_to(&mut io::stdout(), &selector)?;
        return Ok(());
    }

    let mode = if selector.is_custom_model() {
        "custom"
    } else {
        "known"
    };
    print_success(&format!(
        "{} will use {} model '{}'",
        selector.selected_provider(),
        mode,
        selector.model_id()
    ))?;
    print_status(selector.handle_status())?;
    Ok(())
}

/// List known model ids, marking the current one.
fn render_to<W: Write>(w: &mut W, selector: &ModelSelector) -> io::Result<()> {
    writeln!(
        w,
        "{} {} models:",
        selector.selected_provider(),
        selector.model_kind()
    )?;
    for id in selector.known_model_ids() {
        let marker = if id == selector.model_id() { "*" } else { " " };
        writeln!(w, "  {marker} {id}")?;
    }
    if selector.is_custom_model() {
        writeln!(w, "  * {} (custom)", selector.model_id())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelpick_models::ModelKind;
    use modelpick_models::providers::catalog;

    fn render(selector: &ModelSelector) -> String {
        let mut output = Vec::new();
        render_to(&mut output, selector).unwrap();
        String::from_utf8(output).unwrap()
    }

    fn selector() -> ModelSelector {
        ModelSelector::builder(catalog::descriptors(ModelKind::Language))
            .build()
            .unwrap()
    }

    #[test]
    fn lists_known_models_with_marker() {
        let result = render(&selector());
        assert!(result.starts_with("OpenAI language models:"));
        assert!(result.contains("  * gpt-4o\n"));
        assert!(result.contains("    o4-mini\n"));
        assert!(!result.contains("(custom)"));
    }

    #[test]
    fn custom_id_is_listed_after_known_models() {
        let mut selector = selector();
        selector.set_model_id("ft:gpt-4o:acme");

        let result = render(&selector);
        assert!(result.contains("    gpt-4o\n"));
        assert!(result.ends_with("  * ft:gpt-4o:acme (custom)\n"));
    }
}
