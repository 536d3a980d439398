//! Layered application configuration.
//!
//! Sources, lowest precedence first:
//! 1. Bundled defaults (include_str! from storyteller.toml)
//! 2. `~/.config/storyteller/storyteller.toml`
//! 3. `./storyteller.toml`, or the file passed with `--config`
//! 4. Environment variables `STORYTELLER__SECTION__KEY`
//!
//! Secrets are read separately by [`Secrets`] and never appear in files.

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use storyteller_error::{ConfigError, StorytellerError, StorytellerResult};
use storyteller_models::{GeminiConfig, GoogleTtsConfig, TtsCredential};
use storyteller_pipeline::{PipelineConfig, SpeechConfig};
use storyteller_server::ServerConfig;
use storyteller_storage::StorageConfig;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../storyteller.toml");

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "STORYTELLER";

/// Task store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct DatabaseConfig {
    /// SQLite file path or `sqlite://` URL
    #[serde(default = "default_database_url")]
    url: String,
}

fn default_database_url() -> String {
    "sqlite://storyteller.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

impl DatabaseConfig {
    /// Config pointing at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Complete application configuration.
///
/// Built once at startup and handed to constructors.
///
/// # Example
///
/// ```no_run
/// use storyteller::StorytellerConfig;
///
/// let config = StorytellerConfig::load()?;
/// println!("listening on {}", config.server().address());
/// # Ok::<(), storyteller::StorytellerError>(())
/// ```
#[derive(
    Debug, Clone, PartialEq, Default, Serialize, Deserialize, derive_getters::Getters,
)]
pub struct StorytellerConfig {
    /// Text generation client
    #[serde(default)]
    gemini: GeminiConfig,

    /// Speech client
    #[serde(default)]
    tts: GoogleTtsConfig,

    /// Narration behavior
    #[serde(default)]
    speech: SpeechConfig,

    /// Audio object storage
    #[serde(default)]
    storage: StorageConfig,

    /// Story writing
    #[serde(default)]
    pipeline: PipelineConfig,

    /// HTTP surface
    #[serde(default)]
    server: ServerConfig,

    /// Task store
    #[serde(default)]
    database: DatabaseConfig,
}

impl StorytellerConfig {
    /// Load with precedence: environment > current dir > home dir > bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a file is malformed or a value has
    /// the wrong type.
    pub fn load() -> StorytellerResult<Self> {
        Self::load_from(None)
    }

    /// Like [`load`](Self::load), but `path` replaces `./storyteller.toml`.
    ///
    /// An explicit path must exist.
    pub fn load_from(path: Option<&Path>) -> StorytellerResult<Self> {
        Self::load_layers(
            path,
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
    }

    /// Load from bundled defaults, the home and local (or `path`) files, and
    /// the given environment source.
    #[instrument(skip(environment))]
    pub fn load_layers(path: Option<&Path>, environment: Environment) -> StorytellerResult<Self> {
        debug!("Loading configuration");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/storyteller/storyteller.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = match path {
            Some(path) => builder.add_source(File::from(path.to_path_buf()).required(true)),
            None => builder.add_source(File::with_name("storyteller").required(false)),
        };

        builder
            .add_source(environment)
            .build()
            .map_err(|e| {
                StorytellerError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                StorytellerError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Parse a TOML document layered over the bundled defaults only.
    pub fn from_toml_str(toml: &str) -> StorytellerResult<Self> {
        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(|e| {
                StorytellerError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Apply secrets that override file settings (`DATABASE_URL`,
    /// `GOOGLE_APPLICATION_CREDENTIALS`).
    pub fn with_secrets(mut self, secrets: &Secrets) -> Self {
        if let Some(url) = secrets.database_url() {
            self.database = DatabaseConfig::new(url.clone());
        }
        if self.storage.service_account_path().is_none() {
            if let Some(path) = secrets.service_account_path() {
                self.storage = self.storage.with_service_account_path(path.clone());
            }
        }
        self
    }

    /// Replace the server settings.
    pub fn with_server(mut self, server: ServerConfig) -> Self {
        self.server = server;
        self
    }

    /// Replace the pipeline settings.
    pub fn with_pipeline(mut self, pipeline: PipelineConfig) -> Self {
        self.pipeline = pipeline;
        self
    }
}

/// Credentials read from the environment.
#[derive(Clone, Default, derive_getters::Getters)]
pub struct Secrets {
    /// `GEMINI_API_KEY`
    gemini_api_key: Option<String>,
    /// `GOOGLE_ACCESS_TOKEN`, preferred over the API key
    google_access_token: Option<String>,
    /// `GOOGLE_TTS_API_KEY`
    tts_api_key: Option<String>,
    /// `GOOGLE_APPLICATION_CREDENTIALS`
    service_account_path: Option<PathBuf>,
    /// `DATABASE_URL`
    database_url: Option<String>,
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| "***"))
            .field(
                "google_access_token",
                &self.google_access_token.as_ref().map(|_| "***"),
            )
            .field("tts_api_key", &self.tts_api_key.as_ref().map(|_| "***"))
            .field("service_account_path", &self.service_account_path)
            .field("database_url", &self.database_url)
            .finish()
    }
}

impl Secrets {
    /// Read secrets from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read secrets through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            gemini_api_key: get("GEMINI_API_KEY"),
            google_access_token: get("GOOGLE_ACCESS_TOKEN"),
            tts_api_key: get("GOOGLE_TTS_API_KEY"),
            service_account_path: get("GOOGLE_APPLICATION_CREDENTIALS").map(PathBuf::from),
            database_url: get("DATABASE_URL"),
        }
    }

    /// The Gemini key, or a configuration error naming the variable.
    pub fn require_gemini_api_key(&self) -> Result<&str, ConfigError> {
        self.gemini_api_key
            .as_deref()
            .ok_or_else(|| ConfigError::new("GEMINI_API_KEY not set"))
    }

    /// Speech credential: an access token if present, else the API key.
    pub fn require_tts_credential(&self) -> Result<TtsCredential, ConfigError> {
        match (&self.google_access_token, &self.tts_api_key) {
            (Some(token), _) => Ok(TtsCredential::AccessToken(token.clone())),
            (None, Some(key)) => Ok(TtsCredential::ApiKey(key.clone())),
            (None, None) => Err(ConfigError::new(
                "Set GOOGLE_ACCESS_TOKEN or GOOGLE_TTS_API_KEY for speech synthesis",
            )),
        }
    }
}
