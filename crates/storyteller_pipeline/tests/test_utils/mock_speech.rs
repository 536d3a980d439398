//! Scripted speech backends and a failing audio store.

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use storyteller_core::{LongFormRequest, OperationHandle, OperationState, SpeechRequest};
use storyteller_error::{
    StorageError, StorageErrorKind, StorytellerResult, SynthesisError, SynthesisErrorKind,
};
use storyteller_interface::{AudioStore, LongFormSynthesizer, SpeechSynthesizer, StoredAudio};

/// Synthesizer whose "audio" is the chunk text wrapped in angle brackets.
pub struct MockSynthesizer {
    fail_on_call: Option<usize>,
    max_input_bytes: usize,
    requests: Mutex<Vec<SpeechRequest>>,
}

impl MockSynthesizer {
    pub fn new() -> Self {
        Self {
            fail_on_call: None,
            max_input_bytes: 5000,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fail the `n`th call (zero-based).
    pub fn failing_on(mut self, n: usize) -> Self {
        self.fail_on_call = Some(n);
        self
    }

    pub fn with_max_input_bytes(mut self, limit: usize) -> Self {
        self.max_input_bytes = limit;
        self
    }

    pub fn requests(&self) -> Vec<SpeechRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn audio_for(text: &str) -> Vec<u8> {
        format!("<{}>", text).into_bytes()
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    async fn synthesize(&self, req: &SpeechRequest) -> StorytellerResult<Vec<u8>> {
        let call = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(req.clone());
            requests.len() - 1
        };
        if self.fail_on_call == Some(call) {
            return Err(SynthesisError::new(SynthesisErrorKind::HttpStatus {
                status_code: 500,
                message: "backend error".to_string(),
            })
            .into());
        }
        Ok(Self::audio_for(&req.text))
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn max_input_bytes(&self) -> usize {
        self.max_input_bytes
    }
}

/// How a mocked long-form operation ends.
#[derive(Debug, Clone)]
pub enum LongFormOutcome {
    /// Report `Done` after this many `Running` polls
    DoneAfter(usize),
    /// Report `Failed` on the first poll
    Fails(String),
    /// Keep reporting `Running`
    Never,
}

pub struct MockLongForm {
    outcome: LongFormOutcome,
    polls: AtomicUsize,
    started: Mutex<Vec<LongFormRequest>>,
}

impl MockLongForm {
    pub fn new(outcome: LongFormOutcome) -> Self {
        Self {
            outcome,
            polls: AtomicUsize::new(0),
            started: Mutex::new(Vec::new()),
        }
    }

    pub fn started(&self) -> Vec<LongFormRequest> {
        self.started.lock().unwrap().clone()
    }

    pub fn polls(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LongFormSynthesizer for MockLongForm {
    async fn start(&self, req: &LongFormRequest) -> StorytellerResult<OperationHandle> {
        self.started.lock().unwrap().push(req.clone());
        Ok(OperationHandle {
            name: "operations/mock-1".to_string(),
        })
    }

    async fn poll(&self, _operation: &OperationHandle) -> StorytellerResult<OperationState> {
        let seen = self.polls.fetch_add(1, Ordering::SeqCst);
        Ok(match &self.outcome {
            LongFormOutcome::DoneAfter(n) if seen >= *n => OperationState::Done,
            LongFormOutcome::DoneAfter(_) | LongFormOutcome::Never => OperationState::Running,
            LongFormOutcome::Fails(message) => OperationState::Failed(message.clone()),
        })
    }
}

/// Store that rejects every write.
pub struct FailingAudioStore;

#[async_trait]
impl AudioStore for FailingAudioStore {
    async fn put(
        &self,
        _name: &str,
        _bytes: Vec<u8>,
        _content_type: &str,
    ) -> StorytellerResult<StoredAudio> {
        Err(StorageError::new(StorageErrorKind::Write("bucket is read-only".to_string())).into())
    }

    fn public_url(&self, name: &str) -> String {
        format!("https://storage.googleapis.com/read-only/{}", name)
    }

    fn location_uri(&self, name: &str) -> String {
        format!("gs://read-only/{}", name)
    }
}
