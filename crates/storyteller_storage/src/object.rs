//! Audio store over the `object_store` crate.

use crate::{StorageBackend, StorageConfig};
use async_trait::async_trait;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload};
use std::sync::Arc;
use storyteller_error::{StorageError, StorageErrorKind, StorytellerResult};
use storyteller_interface::{AudioStore, StoredAudio};

/// Audio store backed by any [`ObjectStore`].
///
/// Objects land at the bucket root under the name they are given; the
/// public URL is `<public_base_url>/<name>`.
#[derive(Debug, Clone)]
pub struct ObjectAudioStore {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    public_base_url: String,
    uri_scheme: &'static str,
    content_type_attributes: bool,
}

impl ObjectAudioStore {
    /// Build the store selected by configuration.
    #[tracing::instrument(skip(config), fields(backend = ?config.backend(), bucket = %config.bucket()))]
    pub fn from_config(config: &StorageConfig) -> StorytellerResult<Self> {
        let public_base_url = config.effective_public_base_url();
        match config.backend() {
            StorageBackend::Gcs => {
                let mut builder =
                    GoogleCloudStorageBuilder::from_env().with_bucket_name(config.bucket());
                if let Some(path) = config.service_account_path() {
                    builder = builder.with_service_account_path(path.to_string_lossy());
                }
                let store = builder.build().map_err(|e| {
                    StorageError::new(StorageErrorKind::InvalidConfig(format!(
                        "GCS bucket {}: {}",
                        config.bucket(),
                        e
                    )))
                })?;
                tracing::info!("Using Google Cloud Storage for audio");
                Ok(Self {
                    store: Arc::new(store),
                    bucket: config.bucket().clone(),
                    public_base_url,
                    uri_scheme: "gs",
                    content_type_attributes: true,
                })
            }
            StorageBackend::Local => {
                std::fs::create_dir_all(config.local_dir()).map_err(|e| {
                    StorageError::new(StorageErrorKind::InvalidConfig(format!(
                        "Failed to create {}: {}",
                        config.local_dir().display(),
                        e
                    )))
                })?;
                let store = LocalFileSystem::new_with_prefix(config.local_dir()).map_err(|e| {
                    StorageError::new(StorageErrorKind::InvalidConfig(e.to_string()))
                })?;
                tracing::info!(path = %config.local_dir().display(), "Using local directory for audio");
                Ok(Self {
                    store: Arc::new(store),
                    bucket: config.bucket().clone(),
                    public_base_url,
                    uri_scheme: "file",
                    content_type_attributes: false,
                })
            }
            StorageBackend::Memory => {
                tracing::info!("Using in-memory audio store");
                Ok(Self::in_memory(config.bucket().clone()).with_public_base_url(public_base_url))
            }
        }
    }

    /// In-memory store with GCS-style public URLs for `bucket`.
    pub fn in_memory(bucket: impl Into<String>) -> Self {
        let bucket = bucket.into();
        Self {
            store: Arc::new(InMemory::new()),
            public_base_url: format!("https://storage.googleapis.com/{}", bucket),
            bucket,
            uri_scheme: "memory",
            content_type_attributes: true,
        }
    }

    /// Replace the public URL prefix.
    pub fn with_public_base_url(mut self, url: impl Into<String>) -> Self {
        self.public_base_url = url.into();
        self
    }

    /// Bucket label.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Read an object back.
    #[tracing::instrument(skip(self))]
    pub async fn fetch(&self, name: &str) -> StorytellerResult<Vec<u8>> {
        let path = object_path(name)?;
        let result = self.store.get(&path).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => {
                StorageError::new(StorageErrorKind::NotFound(name.to_string()))
            }
            other => StorageError::new(StorageErrorKind::Read(other.to_string())),
        })?;
        let bytes = result
            .bytes()
            .await
            .map_err(|e| StorageError::new(StorageErrorKind::Read(e.to_string())))?;
        Ok(bytes.to_vec())
    }
}

fn object_path(name: &str) -> Result<ObjectPath, StorageError> {
    if name.is_empty() || name.contains('/') {
        return Err(StorageError::new(StorageErrorKind::InvalidName(
            name.to_string(),
        )));
    }
    ObjectPath::parse(name)
        .map_err(|e| StorageError::new(StorageErrorKind::InvalidName(format!("{}: {}", name, e))))
}

#[async_trait]
impl AudioStore for ObjectAudioStore {
    #[tracing::instrument(skip(self, bytes), fields(bucket = %self.bucket, size = bytes.len()))]
    async fn put(
        &self,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> StorytellerResult<StoredAudio> {
        let path = object_path(name)?;

        let mut attributes = Attributes::new();
        if self.content_type_attributes {
            attributes.insert(Attribute::ContentType, content_type.to_string().into());
        }
        let options = PutOptions {
            attributes,
            ..Default::default()
        };

        self.store
            .put_opts(&path, PutPayload::from(bytes), options)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to write audio object");
                StorageError::new(StorageErrorKind::Write(format!("{}: {}", name, e)))
            })?;

        let url = self.public_url(name);
        tracing::info!(url = %url, "Stored audio");
        Ok(StoredAudio {
            name: name.to_string(),
            url,
        })
    }

    fn public_url(&self, name: &str) -> String {
        format!("{}/{}", self.public_base_url.trim_end_matches('/'), name)
    }

    fn location_uri(&self, name: &str) -> String {
        format!("{}://{}/{}", self.uri_scheme, self.bucket, name)
    }
}
