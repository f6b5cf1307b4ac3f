//! Interactive provider, model and key picker.

use anyhow::Result;
use dialoguer::{Input, Password, Select, theme::ColorfulTheme};
use modelpick_models::ModelSelector;

use super::prompts::{print_header, print_status, print_success};
use crate::config::ModelpickConfig;
use crate::session::{self, SelectionArgs};

const CUSTOM_ITEM: &str = "Custom model id…";

/// Run the picker.
pub fn run(config: &ModelpickConfig, selection: &SelectionArgs) -> Result<()> {
    let mut selector = session::open(config, selection)?;
    let theme = ColorfulTheme::default();

    print_header(&format!("Pick a {} model", selector.model_kind()))?;

    // Provider
    let providers: Vec<String> = selector.providers().map(str::to_string).collect();
    let current = providers
        .iter()
        .position(|name| name == selector.selected_provider())
        .unwrap_or(0);
    let choice = Select::with_theme(&theme)
        .with_prompt("Provider")
        .items(&providers)
        .default(current)
        .interact()?;
    selector.set_selected_provider(&providers[choice])?;

    // Model
    let (items, default) = model_items(&selector);
    let choice = Select::with_theme(&theme)
        .with_prompt("Model")
        .items(&items)
        .default(default)
        .interact()?;

    if choice == items.len() - 1 {
        if !selector.is_custom_model() {
            selector.toggle_custom_model();
        }
        let id: String = Input::with_theme(&theme)
            .with_prompt("Model id")
            .with_initial_text(selector.model_id())
            .interact_text()?;
        selector.set_model_id(id.trim());
    } else {
        if selector.is_custom_model() {
            selector.toggle_custom_model();
        }
        selector.set_model_id(items[choice].clone());
    }

    // Key
    let hint = if selector.credential().is_empty() {
        String::new()
    } else {
        format!(" (Enter keeps {})", selector.credential().masked())
    };
    let key = Password::with_theme(&theme)
        .with_prompt(format!("API key{hint}"))
        .allow_empty_password(true)
        .interact()?;
    if !key.is_empty() {
        selector.set_credential(key);
    }

    println!();
    print_success(&format!(
        "{} will use '{}'",
        selector.selected_provider(),
        selector.model_id()
    ))?;
    print_status(selector.handle_status())?;
    Ok(())
}

/// Known model ids followed by the custom entry, and the index to preselect.
fn model_items(selector: &ModelSelector) -> (Vec<String>, usize) {
    let mut items = selector.known_model_ids().to_vec();
    let current = if selector.is_custom_model() {
        None
    } else {
        items.iter().position(|id| id == selector.model_id())
    };
    let default = current.unwrap_or(items.len());
    items.push(CUSTOM_ITEM.to_string());
    (items, default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelpick_models::ModelKind;
    use modelpick_models::providers::catalog;

    fn selector() -> ModelSelector {
        ModelSelector::builder(catalog::descriptors(ModelKind::Language))
            .build()
            .unwrap()
    }

    #[test]
    fn preselects_current_known_model() {
        let mut selector = selector();
        selector.set_model_id("o4-mini");

        let (items, default) = model_items(&selector);
        assert_eq!(items[default], "o4-mini");
        assert_eq!(items.last().map(String::as_str), Some(CUSTOM_ITEM));
    }

    #[test]
    fn preselects_custom_entry_for_custom_ids() {
        let mut selector = selector();
        selector.set_model_id("my-finetune");

        let (items, default) = model_items(&selector);
        assert_eq!(default, items.len() - 1);
    }
}
