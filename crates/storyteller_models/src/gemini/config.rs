//! Gemini client configuration.

use serde::{Deserialize, Serialize};

/// Gemini client settings.
///
/// The API key is not part of this struct; it is passed to
/// [`GeminiClient::new`](crate::GeminiClient::new) from the secret source.
///
/// # Examples
///
/// ```
/// use storyteller_models::GeminiConfig;
///
/// let config = GeminiConfig::builder()
///     .model("gemini-2.5-flash")
///     .build()
///     .unwrap();
/// assert_eq!(config.model(), "gemini-2.5-flash");
/// assert_eq!(*config.timeout_secs(), 300);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into), default)]
pub struct GeminiConfig {
    /// Model identifier
    #[serde(default = "default_model")]
    model: String,

    /// API root, without trailing slash
    #[serde(default = "default_base_url")]
    base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
}

fn default_model() -> String {
    "gemini-2.5-pro".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_timeout_secs() -> u64 {
    300
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GeminiConfig {
    /// Creates a new config builder.
    pub fn builder() -> GeminiConfigBuilder {
        GeminiConfigBuilder::default()
    }
}
