//! Built-in catalog of hosted providers.
//!
//! Each vendor lists the model ids it is known to serve per [`ModelKind`].
//! Constructing one of these providers never touches the network; the
//! resulting [`ModelHandle`] carries an [`EndpointBinding`] with everything
//! a client needs to make the call.

use std::sync::Arc;

use crate::auth::{ApiKey, Credentials};
use crate::providers::{ModelHandle, ProviderDescriptor, ProviderHandle};
use crate::{Error, ModelKind, Result};

/// A hosted vendor and the models it is known to serve.
#[derive(Debug)]
struct Vendor {
    name: &'static str,
    base_url: &'static str,
    language: &'static [&'static str],
    embedding: &'static [&'static str],
    image: &'static [&'static str],
}

impl Vendor {
    fn models(&self, kind: ModelKind) -> &'static [&'static str] {
        match kind {
            ModelKind::Language => self.language,
            ModelKind::Embedding => self.embedding,
            ModelKind::Image => self.image,
        }
    }
}

const VENDORS: &[Vendor] = &[
    Vendor {
        name: "OpenAI",
        base_url: "https://api.openai.com/v1",
        language: &["gpt-4o", "o4-mini", "gpt-4.1", "gpt-4.1-mini"],
        embedding: &["text-embedding-3-small", "text-embedding-3-large"],
        image: &["gpt-image-1", "dall-e-3"],
    },
    Vendor {
        name: "Anthropic",
        base_url: "https://api.anthropic.com/v1",
        language: &[
            "claude-sonnet-4-0",
            "claude-opus-4-0",
            "claude-3-5-haiku-latest",
        ],
        embedding: &[],
        image: &[],
    },
    Vendor {
        name: "Google",
        base_url: "https://generativelanguage.googleapis.com/v1beta",
        language: &["gemini-2.0-flash", "gemini-2.5-flash", "gemini-2.5-pro"],
        embedding: &["text-embedding-004"],
        image: &["imagen-3.0-generate-002"],
    },
    Vendor {
        name: "Mistral",
        base_url: "https://api.mistral.ai/v1",
        language: &[
            "mistral-large-latest",
            "mistral-small-latest",
            "codestral-latest",
        ],
        embedding: &["mistral-embed"],
        image: &[],
    },
    Vendor {
        name: "Groq",
        base_url: "https://api.groq.com/openai/v1",
        language: &["llama-3.3-70b-versatile", "llama-3.1-8b-instant"],
        embedding: &[],
        image: &[],
    },
];

/// Everything needed to call a hosted model.
#[derive(Debug, Clone)]
pub struct EndpointBinding {
    /// Vendor display name.
    pub provider: &'static str,
    /// API base URL.
    pub base_url: &'static str,
    /// Model id sent with each request.
    pub model: String,
    /// Kind of model the binding was made for.
    pub kind: ModelKind,
    /// Key sent with each request.
    pub api_key: ApiKey,
}

/// Provider handle for a catalog vendor.
#[derive(Debug)]
pub struct EndpointProvider {
    vendor: &'static Vendor,
    api_key: ApiKey,
}

impl EndpointProvider {
    fn connect(vendor: &'static Vendor, credentials: &Credentials) -> Result<Self> {
        let key = credentials.api_key.expose_secret();
        if key.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(Error::InvalidApiKey);
        }
        Ok(Self {
            vendor,
            api_key: credentials.api_key.clone(),
        })
    }

    fn bind(&self, kind: ModelKind, model_id: &str) -> Result<ModelHandle> {
        if self.vendor.models(kind).is_empty() {
            return Err(Error::UnsupportedModelKind {
                provider: self.vendor.name.to_string(),
                kind,
            });
        }
        if model_id.trim().is_empty() {
            return Err(Error::Construction("model id is empty".to_string()));
        }
        let binding = EndpointBinding {
            provider: self.vendor.name,
            base_url: self.vendor.base_url,
            model: model_id.to_string(),
            kind,
            api_key: self.api_key.clone(),
        };
        Ok(ModelHandle::new(self.vendor.name, kind, model_id, binding))
    }
}

impl ProviderHandle for EndpointProvider {
    fn language_model(&self, model_id: &str) -> Result<ModelHandle> {
        self.bind(ModelKind::Language, model_id)
    }

    fn embedding_model(&self, model_id: &str) -> Result<ModelHandle> {
        self.bind(ModelKind::Embedding, model_id)
    }

    fn image_model(&self, model_id: &str) -> Result<ModelHandle> {
        self.bind(ModelKind::Image, model_id)
    }
}

/// Descriptors for every catalog vendor that serves `kind`, in catalog order.
///
/// Known model ids are the vendor's list for that kind.
pub fn descriptors(kind: ModelKind) -> Vec<ProviderDescriptor> {
    VENDORS
        .iter()
        .filter(|vendor| !vendor.models(kind).is_empty())
        .map(|vendor| descriptor_for(vendor, kind))
        .collect()
}

fn descriptor_for(vendor: &'static Vendor, kind: ModelKind) -> ProviderDescriptor {
    ProviderDescriptor::new(
        vendor.name,
        vendor.models(kind).iter().copied(),
        move |credentials: &Credentials| -> Result<Arc<dyn ProviderHandle>> {
            let provider = EndpointProvider::connect(vendor, credentials)?;
            Ok(Arc::new(provider) as Arc<dyn ProviderHandle>)
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(kind: ModelKind, name: &str) -> ProviderDescriptor {
        descriptors(kind)
            .into_iter()
            .find(|d| d.name() == name)
            .unwrap()
    }

    #[test]
    fn language_catalog_lists_every_vendor() {
        let names: Vec<_> = descriptors(ModelKind::Language)
            .iter()
            .map(|d| d.name().to_string())
            .collect();
        assert_eq!(names, ["OpenAI", "Anthropic", "Google", "Mistral", "Groq"]);
    }

    #[test]
    fn image_catalog_skips_vendors_without_image_models() {
        let names: Vec<_> = descriptors(ModelKind::Image)
            .iter()
            .map(|d| d.name().to_string())
            .collect();
        assert_eq!(names, ["OpenAI", "Google"]);
    }

    #[test]
    fn openai_defaults_to_gpt_4o() {
        let openai = find(ModelKind::Language, "OpenAI");
        assert_eq!(openai.default_model_id(), "gpt-4o");
        assert!(openai.is_known_model("o4-mini"));
    }

    #[test]
    fn handle_carries_endpoint_binding() {
        let google = find(ModelKind::Embedding, "Google");
        let provider = google.construct(&Credentials::new("g-key")).unwrap();
        let handle = provider.embedding_model("text-embedding-004").unwrap();

        let binding = handle.downcast_ref::<EndpointBinding>().unwrap();
        assert_eq!(binding.provider, "Google");
        assert_eq!(binding.model, "text-embedding-004");
        assert_eq!(binding.kind, ModelKind::Embedding);
        assert_eq!(binding.api_key.expose_secret(), "g-key");
        assert_eq!(
            binding.base_url,
            "https://generativelanguage.googleapis.com/v1beta"
        );
    }

    #[test]
    fn custom_model_ids_are_accepted() {
        let openai = find(ModelKind::Language, "OpenAI");
        let provider = openai.construct(&Credentials::new("sk-1")).unwrap();
        let handle = provider.language_model("ft:gpt-4o:my-org").unwrap();
        assert_eq!(handle.model_id(), "ft:gpt-4o:my-org");
    }

    #[test]
    fn empty_key_constructs() {
        let openai = find(ModelKind::Language, "OpenAI");
        assert!(openai.construct(&Credentials::default()).is_ok());
    }

    #[test]
    fn key_with_whitespace_is_rejected() {
        let openai = find(ModelKind::Language, "OpenAI");
        let err = openai
            .construct(&Credentials::new("sk-1 sk-2"))
            .err()
            .unwrap();
        assert!(matches!(err, Error::InvalidApiKey));
    }

    #[test]
    fn unsupported_kind_is_rejected() {
        let anthropic = find(ModelKind::Language, "Anthropic");
        let provider = anthropic.construct(&Credentials::new("sk-ant")).unwrap();
        let err = provider.image_model("claude-sonnet-4-0").unwrap_err();
        assert!(matches!(err, Error::UnsupportedModelKind { .. }));
    }

    #[test]
    fn empty_model_id_is_rejected() {
        let openai = find(ModelKind::Language, "OpenAI");
        let provider = openai.construct(&Credentials::default()).unwrap();
        assert!(provider.language_model("  ").is_err());
    }
}
