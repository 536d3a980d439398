//! Text-to-Speech client configuration.

use serde::{Deserialize, Serialize};

/// How requests authenticate against Cloud Text-to-Speech.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TtsCredential {
    /// API key sent as `x-goog-api-key`
    ApiKey(String),
    /// OAuth access token sent as a bearer token (needed for long audio)
    AccessToken(String),
}

impl TtsCredential {
    fn secret(&self) -> &str {
        match self {
            TtsCredential::ApiKey(s) | TtsCredential::AccessToken(s) => s,
        }
    }

    /// True when the secret is blank.
    pub fn is_empty(&self) -> bool {
        self.secret().trim().is_empty()
    }
}

/// Text-to-Speech client settings.
///
/// # Examples
///
/// ```
/// use storyteller_models::GoogleTtsConfig;
///
/// let config = GoogleTtsConfig::default();
/// assert_eq!(config.base_url(), "https://texttospeech.googleapis.com/v1");
/// assert_eq!(config.location(), "global");
/// assert!(config.project_id().is_none());
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
pub struct GoogleTtsConfig {
    /// API root, without trailing slash
    #[serde(default = "default_base_url")]
    base_url: String,

    /// Cloud project for long audio synthesis
    #[serde(default)]
    project_id: Option<String>,

    /// Cloud location for long audio synthesis
    #[serde(default = "default_location")]
    location: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://texttospeech.googleapis.com/v1".to_string()
}

fn default_location() -> String {
    "global".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for GoogleTtsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            project_id: None,
            location: default_location(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GoogleTtsConfig {
    /// Creates a new config builder.
    pub fn builder() -> GoogleTtsConfigBuilder {
        GoogleTtsConfigBuilder::default()
    }
}
