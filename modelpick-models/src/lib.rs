//! Provider, API key and model selection state for modelpick.
//!
//! This crate provides:
//! - Provider capability traits and a built-in vendor catalog
//! - Redacted API key handling
//! - Preference storage (in-memory, on disk, or in the system keyring)
//! - [`ModelSelector`], the state manager that remembers a key and model per provider
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                   ModelSelector                      │
//! │   provider ─► restore key + model ─► derive handle   │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────┐  │
//! │  │   OpenAI    │  │   Google    │  │    ...      │  │
//! │  │ Descriptor  │  │ Descriptor  │  │ Descriptor  │  │
//! │  └─────────────┘  └─────────────┘  └─────────────┘  │
//! └─────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                  PreferenceStore                     │
//! │      keys: KeyringStore   models: FileStore          │
//! └─────────────────────────────────────────────────────┘
//! ```

mod error;
mod types;

pub mod auth;
pub mod providers;
pub mod selection;
pub mod store;

pub use error::{Error, Result};
pub use selection::{HandleStatus, ModelSelector, SelectionSnapshot};
pub use types::{ModelKind, Persistence, SelectorConfig};
