//! Error types for model selection.

use thiserror::Error;

use crate::ModelKind;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while selecting providers and models.
#[derive(Debug, Error)]
pub enum Error {
    /// The selector was built without any providers.
    #[error("at least one provider is required")]
    NoProviders,

    /// Two providers share the same name.
    #[error("duplicate provider name: {0}")]
    DuplicateProvider(String),

    /// Provider not found in the selector's provider list.
    #[error("provider not found: {0}")]
    ProviderNotFound(String),

    /// Invalid API key format.
    #[error("invalid API key format")]
    InvalidApiKey,

    /// The provider has no models of the requested kind.
    #[error("provider '{provider}' does not offer {kind} models")]
    UnsupportedModelKind {
        /// Provider name.
        provider: String,
        /// Requested model kind.
        kind: ModelKind,
    },

    /// The provider SDK refused to build a handle.
    #[error("provider construction failed: {0}")]
    Construction(String),

    /// Preference storage could not be read or written.
    #[error("storage error: {0}")]
    Storage(String),

    /// System keyring operation failed.
    #[error("keyring error: {0}")]
    Keyring(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
