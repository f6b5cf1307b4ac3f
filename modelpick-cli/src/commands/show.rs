//! Show the current selection.

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use modelpick_models::{HandleStatus, SelectionSnapshot};

use crate::config::ModelpickConfig;
use crate::session::{self, SelectionArgs};

/// Show arguments.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run show command.
pub fn run(args: ShowArgs, config: &ModelpickConfig, selection: &SelectionArgs) -> Result<()> {
    let selector = session::open(config, selection)?;
    let snapshot = selector.snapshot();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        render_to(&mut io::stdout(), &snapshot)?;
    }
    Ok(())
}

/// Render a snapshot as aligned text.
pub fn render_to<W: Write>(w: &mut W, snapshot: &SelectionSnapshot) -> io::Result<()> {
    writeln!(w, "Provider:  {}", snapshot.provider)?;
    writeln!(w, "Kind:      {}", snapshot.model_kind)?;

    let mode = if snapshot.custom_model {
        " (custom)"
    } else {
        ""
    };
    let model = if snapshot.model_id.is_empty() {
        "(none)"
    } else {
        snapshot.model_id.as_str()
    };
    writeln!(w, "Model:     {model}{mode}")?;

    let key = if snapshot.api_key.is_empty() {
        "(not set)"
    } else {
        snapshot.api_key.as_str()
    };
    writeln!(w, "API key:   {key}")?;
    writeln!(w, "Storage:   {}", snapshot.persistence)?;

    match &snapshot.status {
        HandleStatus::Ready => writeln!(w, "Status:    ready")?,
        HandleStatus::Unavailable { reason } => writeln!(w, "Status:    unavailable ({reason})")?,
    }

    if !snapshot.known_model_ids.is_empty() {
        writeln!(w)?;
        writeln!(w, "Known models:")?;
        for id in &snapshot.known_model_ids {
            let marker = if *id == snapshot.model_id { "*" } else { " " };
            writeln!(w, "  {marker} {id}")?;
        }
    }
    Ok(())
}
