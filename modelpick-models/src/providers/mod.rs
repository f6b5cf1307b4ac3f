//! Provider capability traits and descriptors.
//!
//! A provider SDK is reached through two narrow traits:
//! [`ProviderFactory`] turns [`Credentials`] into a [`ProviderHandle`], and
//! the handle binds a model id to an opaque [`ModelHandle`] for one of the
//! three [`ModelKind`]s. A [`ProviderDescriptor`] pairs a factory with the
//! provider's display name and its list of known model ids.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use modelpick_models::auth::Credentials;
//! use modelpick_models::providers::{ModelHandle, ProviderDescriptor, ProviderHandle};
//! use modelpick_models::{ModelKind, Result};
//!
//! struct Echo;
//!
//! impl ProviderHandle for Echo {
//!     fn language_model(&self, model_id: &str) -> Result<ModelHandle> {
//!         Ok(ModelHandle::new("echo", ModelKind::Language, model_id, ()))
//!     }
//!     fn embedding_model(&self, model_id: &str) -> Result<ModelHandle> {
//!         Ok(ModelHandle::new("echo", ModelKind::Embedding, model_id, ()))
//!     }
//!     fn image_model(&self, model_id: &str) -> Result<ModelHandle> {
//!         Ok(ModelHandle::new("echo", ModelKind::Image, model_id, ()))
//!     }
//! }
//!
//! let echo = ProviderDescriptor::new(
//!     "echo",
//!     ["echo-1"],
//!     |_: &Credentials| -> Result<Arc<dyn ProviderHandle>> { Ok(Arc::new(Echo)) },
//! );
//! assert_eq!(echo.default_model_id(), "echo-1");
//! ```

pub mod catalog;

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::auth::Credentials;
use crate::{ModelKind, Result};

/// Opaque model bound to a provider, kind and model id.
///
/// The payload is whatever the provider SDK hands back; callers that know
/// the concrete type recover it with [`downcast_ref`](Self::downcast_ref).
#[derive(Clone)]
pub struct ModelHandle {
    provider: String,
    kind: ModelKind,
    model_id: String,
    inner: Arc<dyn Any + Send + Sync>,
}

impl ModelHandle {
    /// Wrap an SDK model object.
    pub fn new<T>(
        provider: impl Into<String>,
        kind: ModelKind,
        model_id: impl Into<String>,
        inner: T,
    ) -> Self
    where
        T: Any + Send + Sync,
    {
        Self {
            provider: provider.into(),
            kind,
            model_id: model_id.into(),
            inner: Arc::new(inner),
        }
    }

    /// Name of the provider that built this handle.
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Kind of model this handle was built for.
    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    /// Model id the handle is bound to.
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Borrow the SDK payload as a concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }
}

impl fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelHandle")
            .field("provider", &self.provider)
            .field("kind", &self.kind)
            .field("model_id", &self.model_id)
            .finish_non_exhaustive()
    }
}

/// A constructed provider, ready to bind model ids.
pub trait ProviderHandle: Send + Sync {
    /// Bind a text generation model.
    fn language_model(&self, model_id: &str) -> Result<ModelHandle>;

    /// Bind an embedding model.
    fn embedding_model(&self, model_id: &str) -> Result<ModelHandle>;

    /// Bind an image generation model.
    fn image_model(&self, model_id: &str) -> Result<ModelHandle>;

    /// Bind a model through the accessor matching `kind`.
    fn model(&self, kind: ModelKind, model_id: &str) -> Result<ModelHandle> {
        match kind {
            ModelKind::Language => self.language_model(model_id),
            ModelKind::Embedding => self.embedding_model(model_id),
            ModelKind::Image => self.image_model(model_id),
        }
    }
}

/// Builds a [`ProviderHandle`] from credentials.
///
/// Implemented for any `Fn(&Credentials) -> Result<Arc<dyn ProviderHandle>>`,
/// so most descriptors are built from a closure.
pub trait ProviderFactory: Send + Sync {
    /// Construct the provider. Fails when the credentials are unusable.
    fn construct(&self, credentials: &Credentials) -> Result<Arc<dyn ProviderHandle>>;
}

impl<F> ProviderFactory for F
where
    F: Fn(&Credentials) -> Result<Arc<dyn ProviderHandle>> + Send + Sync,
{
    fn construct(&self, credentials: &Credentials) -> Result<Arc<dyn ProviderHandle>> {
        self(credentials)
    }
}

/// A selectable provider: name, known model ids and constructor.
#[derive(Clone)]
pub struct ProviderDescriptor {
    name: String,
    known_model_ids: Vec<String>,
    factory: Arc<dyn ProviderFactory>,
}

impl ProviderDescriptor {
    /// Create a descriptor.
    pub fn new<I, S>(
        name: impl Into<String>,
        known_model_ids: I,
        factory: impl ProviderFactory + 'static,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            known_model_ids: known_model_ids.into_iter().map(Into::into).collect(),
            factory: Arc::new(factory),
        }
    }

    /// Display name, unique within a selector.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Known model ids in caller order.
    pub fn known_model_ids(&self) -> &[String] {
        &self.known_model_ids
    }

    /// First known model id, or `""` when the list is empty.
    pub fn default_model_id(&self) -> &str {
        self.known_model_ids.first().map(String::as_str).unwrap_or("")
    }

    /// Whether `model_id` is one of the known ids.
    pub fn is_known_model(&self, model_id: &str) -> bool {
        self.known_model_ids.iter().any(|id| id == model_id)
    }

    /// Construct the provider with the given credentials.
    pub fn construct(&self, credentials: &Credentials) -> Result<Arc<dyn ProviderHandle>> {
        self.factory.construct(credentials)
    }
}

impl fmt::Debug for ProviderDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderDescriptor")
            .field("name", &self.name)
            .field("known_model_ids", &self.known_model_ids)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    /// A mock provider that only offers language models.
    struct MockProvider {
        key: String,
    }

    impl ProviderHandle for MockProvider {
        fn language_model(&self, model_id: &str) -> Result<ModelHandle> {
            Ok(ModelHandle::new(
                "mock",
                ModelKind::Language,
                model_id,
                self.key.clone(),
            ))
        }

        fn embedding_model(&self, _model_id: &str) -> Result<ModelHandle> {
            Err(Error::UnsupportedModelKind {
                provider: "mock".to_string(),
                kind: ModelKind::Embedding,
            })
        }

        fn image_model(&self, _model_id: &str) -> Result<ModelHandle> {
            Err(Error::UnsupportedModelKind {
                provider: "mock".to_string(),
                kind: ModelKind::Image,
            })
        }
    }

    fn mock_descriptor(models: &[&str]) -> ProviderDescriptor {
        ProviderDescriptor::new(
            "mock",
            models.iter().copied(),
            |creds: &Credentials| -> Result<Arc<dyn ProviderHandle>> {
                Ok(Arc::new(MockProvider {
                    key: creds.api_key.expose_secret().to_string(),
                }))
            },
        )
    }

    #[test]
    fn descriptor_constructs_through_closure() {
        let descriptor = mock_descriptor(&["m1", "m2"]);
        let provider = descriptor.construct(&Credentials::new("k1")).unwrap();
        let handle = provider.language_model("m2").unwrap();

        assert_eq!(handle.provider(), "mock");
        assert_eq!(handle.model_id(), "m2");
        assert_eq!(handle.downcast_ref::<String>().unwrap(), "k1");
    }

    #[test]
    fn model_dispatches_by_kind() {
        let provider = mock_descriptor(&["m1"])
            .construct(&Credentials::default())
            .unwrap();

        assert!(provider.model(ModelKind::Language, "m1").is_ok());
        let err = provider.model(ModelKind::Image, "m1").unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedModelKind {
                kind: ModelKind::Image,
                ..
            }
        ));
    }

    #[test]
    fn default_model_id_is_first_or_empty() {
        assert_eq!(mock_descriptor(&["a", "b"]).default_model_id(), "a");
        assert_eq!(mock_descriptor(&[]).default_model_id(), "");
    }

    #[test]
    fn is_known_model_matches_exactly() {
        let descriptor = mock_descriptor(&["gpt-4o"]);
        assert!(descriptor.is_known_model("gpt-4o"));
        assert!(!descriptor.is_known_model("gpt-4"));
    }

    #[test]
    fn downcast_to_wrong_type_is_none() {
        let handle = ModelHandle::new("mock", ModelKind::Language, "m1", 42_u32);
        assert!(handle.downcast_ref::<String>().is_none());
        assert_eq!(handle.downcast_ref::<u32>(), Some(&42));
    }

    #[test]
    fn debug_omits_payload() {
        let handle = ModelHandle::new("mock", ModelKind::Language, "m1", "secret".to_string());
        let debug = format!("{handle:?}");
        assert!(debug.contains("m1"));
        assert!(!debug.contains("secret"));
    }
}
