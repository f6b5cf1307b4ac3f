//! Core types for model selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of model capability being selected.
///
/// Deserialization is lenient: any unrecognised name becomes
/// [`ModelKind::Language`].
///
/// # Examples
///
/// ```
/// use modelpick_models::ModelKind;
///
/// assert_eq!("embedding".parse::<ModelKind>().unwrap(), ModelKind::Embedding);
/// assert_eq!(ModelKind::parse_lossy("speech"), ModelKind::Language);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ModelKind {
    /// Text generation.
    #[default]
    Language,
    /// Text embeddings.
    Embedding,
    /// Image generation.
    Image,
}

impl ModelKind {
    /// All kinds, in display order.
    pub const ALL: [ModelKind; 3] = [Self::Language, Self::Embedding, Self::Image];

    /// Parse a kind name, falling back to `Language` for unknown names.
    pub fn parse_lossy(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    /// Lowercase name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Language => "language",
            Self::Embedding => "embedding",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "language" | "text" | "chat" => Ok(Self::Language),
            "embedding" | "embeddings" => Ok(Self::Embedding),
            "image" | "images" => Ok(Self::Image),
            other => Err(format!("unknown model kind: {other}")),
        }
    }
}

impl From<String> for ModelKind {
    fn from(s: String) -> Self {
        Self::parse_lossy(&s)
    }
}

/// Where remembered keys and model ids live.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persistence {
    /// In memory, for the lifetime of one selector.
    #[default]
    Ephemeral,
    /// In a [`PreferenceStore`](crate::store::PreferenceStore) that outlives the selector.
    Durable,
}

impl fmt::Display for Persistence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ephemeral => f.write_str("ephemeral"),
            Self::Durable => f.write_str("durable"),
        }
    }
}

/// Selector configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Which accessor is used to derive the active model.
    #[serde(default)]
    pub model_kind: ModelKind,
    /// Where per-provider preferences are remembered.
    #[serde(default)]
    pub persistence: Persistence,
}
