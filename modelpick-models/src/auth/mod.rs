//! API keys and the credentials handed to provider constructors.
//!
//! Keys are free-form text typed by the user, so nothing here validates
//! their shape. Providers decide what they accept when constructed.
//! A provider without a remembered key can start from its `*_API_KEY`
//! environment variable, see [`api_key_from_env`].
//!
//! # Example
//!
//! ```
//! use modelpick_models::auth::{ApiKey, Credentials};
//!
//! let credentials = Credentials::new("sk-test-1234567890");
//! assert_eq!(credentials.api_key.expose_secret(), "sk-test-1234567890");
//! assert_eq!(format!("{:?}", credentials.api_key), "ApiKey([REDACTED])");
//! assert_eq!(ApiKey::new("sk-test-1234567890").masked(), "sk-…7890");
//! ```

use std::env;

use secrecy::{ExposeSecret, SecretString};

/// Number of leading characters kept visible by [`ApiKey::masked`].
const VISIBLE_PREFIX: usize = 3;

/// Number of trailing characters kept visible by [`ApiKey::masked`].
const VISIBLE_SUFFIX: usize = 4;

/// Keys shorter than this are masked entirely.
const MIN_PARTIAL_MASK_LEN: usize = 16;

/// Environment variable names for each provider.
const ENV_VARS: &[(&str, &str)] = &[
    ("openai", "OPENAI_API_KEY"),
    ("anthropic", "ANTHROPIC_API_KEY"),
    ("google", "GOOGLE_API_KEY"),
    ("mistral", "MISTRAL_API_KEY"),
    ("groq", "GROQ_API_KEY"),
];

/// A secure API key that prevents accidental logging.
///
/// The key is wrapped in `SecretString` which:
/// - Implements `Debug` as `"[REDACTED]"`
/// - Zeroizes memory on drop
/// - Requires explicit `.expose_secret()` to access the value
#[derive(Clone)]
pub struct ApiKey(SecretString);

impl ApiKey {
    /// Create a new API key from a string.
    pub fn new(key: impl Into<String>) -> Self {
        Self(SecretString::from(key.into()))
    }

    /// Expose the secret key value.
    ///
    /// Use sparingly - only when actually sending to an API or persisting it.
    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }

    /// Whether the key is empty (no key entered yet).
    pub fn is_empty(&self) -> bool {
        self.expose_secret().is_empty()
    }

    /// Display form that keeps a short prefix and the last few characters.
    ///
    /// Keys under 16 characters are fully hidden.
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.expose_secret().chars().collect();
        if chars.is_empty() {
            return String::new();
        }
        if chars.len() < MIN_PARTIAL_MASK_LEN {
            return "•".repeat(chars.len());
        }
        let prefix: String = chars.iter().take(VISIBLE_PREFIX).collect();
        let suffix: String = chars[chars.len() - VISIBLE_SUFFIX..].iter().collect();
        format!("{prefix}…{suffix}")
    }
}

impl Default for ApiKey {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ApiKey([REDACTED])")
    }
}

impl From<String> for ApiKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ApiKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Get the environment variable name for a provider.
///
/// Provider names match case-insensitively.
pub fn env_var_for_provider(provider: &str) -> Option<&'static str> {
    ENV_VARS
        .iter()
        .find(|(p, _)| p.eq_ignore_ascii_case(provider))
        .map(|(_, v)| *v)
}

/// Read a provider's API key from its environment variable.
///
/// Unset and empty variables both yield `None`.
pub fn api_key_from_env(provider: &str) -> Option<ApiKey> {
    let var = env_var_for_provider(provider)?;
    env::var(var)
        .ok()
        .filter(|value| !value.is_empty())
        .map(ApiKey::new)
}

/// Credentials passed to [`ProviderFactory::construct`](crate::providers::ProviderFactory).
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// Key for the provider's API.
    pub api_key: ApiKey,
}

impl Credentials {
    /// Create credentials from an API key.
    pub fn new(api_key: impl Into<ApiKey>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}
