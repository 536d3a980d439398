//! Wiring of collaborators into a runnable pipeline.

use crate::{Secrets, StorytellerConfig};
use std::sync::Arc;
use storyteller_database::SqliteTaskRepository;
use storyteller_error::StorytellerResult;
use storyteller_interface::{AudioStore, TaskRepository, TextGenerator};
use storyteller_models::{GeminiClient, GoogleTtsClient};
use storyteller_pipeline::{
    NarrationMode, Narrator, PipelineObserver, StoryPipeline, TaskDispatcher, TracingObserver,
};
use storyteller_server::AppState;
use storyteller_storage::ObjectAudioStore;
use tracing::{info, instrument, warn};

/// Open the configured SQLite task store, running migrations.
#[instrument(skip_all, fields(url = %config.database().url()))]
pub fn open_repository(config: &StorytellerConfig) -> StorytellerResult<Arc<dyn TaskRepository>> {
    let repository = SqliteTaskRepository::open(config.database().url())?;
    Ok(Arc::new(repository))
}

/// Build the speech client from configuration and secrets.
pub fn speech_client(
    config: &StorytellerConfig,
    secrets: &Secrets,
) -> StorytellerResult<GoogleTtsClient> {
    let credential = secrets.require_tts_credential()?;
    GoogleTtsClient::new(config.tts().clone(), credential)
}

/// Build the narrator: speech client, audio store, and long-form backend
/// when a project is configured.
pub fn narrator(config: &StorytellerConfig, secrets: &Secrets) -> StorytellerResult<Narrator> {
    let tts = Arc::new(speech_client(config, secrets)?);
    let store: Arc<dyn AudioStore> = Arc::new(ObjectAudioStore::from_config(config.storage())?);

    let mut narrator = Narrator::new(tts.clone(), store, config.speech().clone());
    if config.tts().project_id().is_some() {
        narrator = narrator.with_long_form(tts);
    } else if *config.speech().mode() == NarrationMode::LongForm {
        warn!("Long-form narration selected but tts.project_id is not set");
    }
    Ok(narrator)
}

/// Build a pipeline over `repository` using the real model clients.
///
/// # Errors
///
/// Fails when a credential is missing or the audio store cannot be opened.
#[instrument(skip_all)]
pub fn build_pipeline(
    config: &StorytellerConfig,
    secrets: &Secrets,
    repository: Arc<dyn TaskRepository>,
) -> StorytellerResult<Arc<StoryPipeline>> {
    let generator: Arc<dyn TextGenerator> = Arc::new(GeminiClient::new(
        config.gemini().clone(),
        secrets.require_gemini_api_key()?,
    )?);
    let observer: Arc<dyn PipelineObserver> = Arc::new(TracingObserver);

    info!(
        model = %config.gemini().model(),
        beats = *config.pipeline().beat_count(),
        mode = ?config.speech().mode(),
        "Pipeline ready"
    );

    Ok(Arc::new(StoryPipeline::new(
        repository,
        generator,
        narrator(config, secrets)?,
        config.pipeline().clone(),
        observer,
    )))
}

/// Build the HTTP application state: SQLite store, pipeline, and dispatcher.
pub fn build_state(config: &StorytellerConfig, secrets: &Secrets) -> StorytellerResult<Arc<AppState>> {
    let repository = open_repository(config)?;
    let pipeline = build_pipeline(config, secrets, repository)?;
    let dispatcher = TaskDispatcher::new(pipeline, *config.server().max_concurrent_tasks());
    Ok(Arc::new(AppState::new(dispatcher, config.server().clone())))
}
