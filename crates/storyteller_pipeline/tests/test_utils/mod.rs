//! Test utilities for pipeline tests.
//!
//! Scripted stand-ins for the text model, the speech backends, and the
//! audio store, plus a helper that wires them into a pipeline.

#![allow(dead_code)]

pub mod mock_model;
pub mod mock_speech;

pub use mock_model::MockStoryModel;
pub use mock_speech::{FailingAudioStore, MockLongForm, MockSynthesizer};

use std::sync::Arc;
use storyteller_interface::{AudioStore, TextGenerator};
use storyteller_pipeline::{
    InMemoryTaskRepository, Narrator, PipelineConfig, RecordingObserver, SpeechConfig,
    StoryPipeline,
};
use storyteller_storage::ObjectAudioStore;

pub const BUCKET: &str = "storyteller-audio-bucket";

/// Everything a pipeline test needs to inspect after a run.
pub struct Harness {
    pub repository: Arc<InMemoryTaskRepository>,
    pub model: Arc<MockStoryModel>,
    pub synthesizer: Arc<MockSynthesizer>,
    pub store: Arc<ObjectAudioStore>,
    pub observer: Arc<RecordingObserver>,
    pub pipeline: Arc<StoryPipeline>,
}

/// Build a chunked-mode pipeline around the given model.
pub fn harness(model: MockStoryModel, config: PipelineConfig, speech: SpeechConfig) -> Harness {
    harness_with(model, MockSynthesizer::new(), config, speech, None, None)
}

/// Build a pipeline with full control over the speech side.
pub fn harness_with(
    model: MockStoryModel,
    synthesizer: MockSynthesizer,
    config: PipelineConfig,
    speech: SpeechConfig,
    long_form: Option<Arc<MockLongForm>>,
    store_override: Option<Arc<dyn AudioStore>>,
) -> Harness {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let model = Arc::new(model);
    let synthesizer = Arc::new(synthesizer);
    let store = Arc::new(ObjectAudioStore::in_memory(BUCKET));
    let observer = Arc::new(RecordingObserver::new());

    let audio_store: Arc<dyn AudioStore> = match store_override {
        Some(custom) => custom,
        None => store.clone(),
    };
    let mut narrator = Narrator::new(synthesizer.clone(), audio_store, speech);
    if let Some(long_form) = long_form {
        narrator = narrator.with_long_form(long_form);
    }

    let generator: Arc<dyn TextGenerator> = model.clone();
    let pipeline = Arc::new(StoryPipeline::new(
        repository.clone(),
        generator,
        narrator,
        config,
        observer.clone(),
    ));

    Harness {
        repository,
        model,
        synthesizer,
        store,
        observer,
        pipeline,
    }
}

/// Object name at the end of a public URL.
pub fn object_name(url: &str) -> &str {
    url.rsplit('/').next().unwrap()
}
