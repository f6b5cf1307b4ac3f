//! List catalog providers for the selected model kind.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use modelpick_models::ModelSelector;
use modelpick_models::auth;

use crate::config::ModelpickConfig;
use crate::session::{self, SelectionArgs};

/// Run providers command.
pub fn run(config: &ModelpickConfig, selection: &SelectionArgs) -> Result<()> {
    let selector = session::open(config, selection)?;
    println!("{}", build_table(&selector));
    Ok(())
}

/// One row per provider: name, known models, remembered model and where its key comes from.
fn build_table(selector: &ModelSelector) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Provider").fg(Color::Cyan),
        Cell::new(format!("Known {} models", selector.model_kind())).fg(Color::Cyan),
        Cell::new("Remembered model").fg(Color::Cyan),
        Cell::new("Key").fg(Color::Cyan),
    ]);

    for descriptor in selector.descriptors() {
        let name = descriptor.name();
        let known = descriptor.known_model_ids().join(", ");
        let remembered = selector.model_id_for(name).unwrap_or("-");
        let key = match selector.credential_for(name) {
            Some(key) if !key.is_empty() => "stored",
            Some(_) => "-",
            None if auth::api_key_from_env(name).is_some() => "env",
            None => "-",
        };
        let provider = if name == selector.selected_provider() {
            Cell::new(format!("{name} *")).fg(Color::Green)
        } else {
            Cell::new(name)
        };

        table.add_row(vec![
            provider,
            Cell::new(known),
            Cell::new(remembered),
            Cell::new(key),
        ]);
    }
    table
}
