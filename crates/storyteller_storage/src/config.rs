//! Storage configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which object store backs the audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Google Cloud Storage bucket
    #[default]
    Gcs,
    /// Directory on the local filesystem
    Local,
    /// Process memory, lost at exit
    Memory,
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct StorageConfig {
    /// Backend selection
    #[serde(default)]
    backend: StorageBackend,

    /// Bucket name (GCS) or logical bucket label (local, memory)
    #[serde(default = "default_bucket")]
    bucket: String,

    /// Directory for the local backend
    #[serde(default = "default_local_dir")]
    local_dir: PathBuf,

    /// Override for the public URL prefix; defaults to
    /// `https://storage.googleapis.com/<bucket>`
    #[serde(default)]
    public_base_url: Option<String>,

    /// Service account JSON for GCS; falls back to ambient credentials
    #[serde(default)]
    service_account_path: Option<PathBuf>,
}

fn default_bucket() -> String {
    "storyteller-audio-bucket".to_string()
}

fn default_local_dir() -> PathBuf {
    PathBuf::from("./audio")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            bucket: default_bucket(),
            local_dir: default_local_dir(),
            public_base_url: None,
            service_account_path: None,
        }
    }
}

impl StorageConfig {
    /// Config for a given backend and bucket with all other fields defaulted.
    pub fn new(backend: StorageBackend, bucket: impl Into<String>) -> Self {
        Self {
            backend,
            bucket: bucket.into(),
            ..Self::default()
        }
    }

    /// Set the local directory.
    pub fn with_local_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.local_dir = dir.into();
        self
    }

    /// Set the public URL prefix.
    pub fn with_public_base_url(mut self, url: impl Into<String>) -> Self {
        self.public_base_url = Some(url.into());
        self
    }

    /// Set the service account path.
    pub fn with_service_account_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.service_account_path = Some(path.into());
        self
    }

    /// Public URL prefix in effect.
    pub fn effective_public_base_url(&self) -> String {
        self.public_base_url
            .clone()
            .unwrap_or_else(|| format!("https://storage.googleapis.com/{}", self.bucket))
    }
}
