//! Layered configuration, secrets, and collaborator wiring.

use config::Environment;
use std::collections::HashMap;
use std::sync::Arc;
use storyteller::{
    DatabaseConfig, InMemoryTaskRepository, NarrationMode, PipelineConfig, Secrets,
    ServerConfig, StorageBackend, StorytellerConfig, StorytellerErrorKind, TaskRepository,
    TaskStatus, TtsCredential, build_pipeline, open_repository,
};

fn secrets(vars: &[(&str, &str)]) -> Secrets {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Secrets::from_lookup(|key| vars.get(key).cloned())
}

fn environment(vars: &[(&str, &str)]) -> Environment {
    let source: config::Map<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Environment::with_prefix("STORYTELLER")
        .separator("__")
        .try_parsing(true)
        .source(Some(source))
}

fn memory_config() -> StorytellerConfig {
    StorytellerConfig::from_toml_str(
        r#"
        [storage]
        backend = "memory"
        "#,
    )
    .unwrap()
}

#[test]
fn test_bundled_defaults_match_component_defaults() {
    let config = StorytellerConfig::from_toml_str("").unwrap();

    assert_eq!(config.server(), &ServerConfig::default());
    assert_eq!(config.pipeline(), &PipelineConfig::default());
    assert_eq!(config.database(), &DatabaseConfig::default());
    assert_eq!(config.gemini().model(), "gemini-2.5-pro");
    assert_eq!(*config.storage().backend(), StorageBackend::Gcs);
    assert_eq!(config.storage().bucket(), "storyteller-audio-bucket");

    let speech = config.speech();
    assert_eq!(*speech.mode(), NarrationMode::Chunked);
    assert_eq!(speech.voice(), "en-US-Chirp3-HD-Achernar");
    assert_eq!(speech.voices().len(), 6);
    assert_eq!(*speech.chunk_max_bytes(), 4500);
    assert_eq!(*speech.poll_interval_secs(), 10);
    assert_eq!(*speech.long_form_timeout_secs(), 600);
    assert!((speech.speaking_rate() - 0.85).abs() < 1e-6);
}

#[test]
fn test_file_values_override_defaults() {
    let config = StorytellerConfig::from_toml_str(
        r#"
        [server]
        port = 9000

        [pipeline]
        beat_count = 8

        [speech]
        mode = "long_form"
        randomize_voice = true

        [tts]
        project_id = "dreams"
        "#,
    )
    .unwrap();

    assert_eq!(*config.server().port(), 9000);
    assert_eq!(config.server().host(), "0.0.0.0");
    assert_eq!(*config.pipeline().beat_count(), 8);
    assert_eq!(*config.pipeline().tail_window_chars(), 500);
    assert_eq!(*config.speech().mode(), NarrationMode::LongForm);
    assert!(*config.speech().randomize_voice());
    assert_eq!(config.tts().project_id().as_deref(), Some("dreams"));
}

#[test]
fn test_wrong_type_is_config_error() {
    let err = StorytellerConfig::from_toml_str(
        r#"
        [server]
        port = "not a port"
        "#,
    )
    .unwrap_err();

    assert!(matches!(err.kind(), StorytellerErrorKind::Config(_)));
}

#[test]
fn test_environment_overrides_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(
        &path,
        "[server]\nport = 9000\nmax_concurrent_tasks = 2\n\n[pipeline]\nbeat_count = 6\n",
    )
    .unwrap();

    let config = StorytellerConfig::load_layers(
        Some(&path),
        environment(&[
            ("STORYTELLER__SERVER__PORT", "9100"),
            ("STORYTELLER__SPEECH__VOICE", "en-US-Chirp3-HD-Kore"),
        ]),
    )
    .unwrap();

    assert_eq!(*config.server().port(), 9100);
    assert_eq!(*config.server().max_concurrent_tasks(), 2);
    assert_eq!(*config.pipeline().beat_count(), 6);
    assert_eq!(config.speech().voice(), "en-US-Chirp3-HD-Kore");
}

#[test]
fn test_explicit_config_path_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");

    let err = StorytellerConfig::load_layers(Some(&missing), environment(&[])).unwrap_err();
    assert!(matches!(err.kind(), StorytellerErrorKind::Config(_)));
}

#[test]
fn test_access_token_is_preferred_for_speech() {
    let both = secrets(&[
        ("GOOGLE_ACCESS_TOKEN", "ya29.token"),
        ("GOOGLE_TTS_API_KEY", "tts-key"),
    ]);
    assert_eq!(
        both.require_tts_credential().unwrap(),
        TtsCredential::AccessToken("ya29.token".into())
    );

    let key_only = secrets(&[("GOOGLE_TTS_API_KEY", "tts-key")]);
    assert_eq!(
        key_only.require_tts_credential().unwrap(),
        TtsCredential::ApiKey("tts-key".into())
    );
}

#[test]
fn test_blank_secrets_count_as_missing() {
    let secrets = secrets(&[("GEMINI_API_KEY", "   "), ("GOOGLE_TTS_API_KEY", "")]);

    let err = secrets.require_gemini_api_key().unwrap_err();
    assert!(err.message.contains("GEMINI_API_KEY"));
    assert!(secrets.require_tts_credential().is_err());
}

#[test]
fn test_secrets_debug_hides_values() {
    let secrets = secrets(&[("GEMINI_API_KEY", "super-secret")]);
    let rendered = format!("{:?}", secrets);

    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("***"));
}

#[test]
fn test_secrets_override_database_and_service_account() {
    let config = StorytellerConfig::default().with_secrets(&secrets(&[
        ("DATABASE_URL", "sqlite:///var/lib/storyteller/tasks.db"),
        ("GOOGLE_APPLICATION_CREDENTIALS", "/etc/storyteller/sa.json"),
    ]));

    assert_eq!(
        config.database().url(),
        "sqlite:///var/lib/storyteller/tasks.db"
    );
    assert_eq!(
        config.storage().service_account_path().as_deref(),
        Some(std::path::Path::new("/etc/storyteller/sa.json"))
    );
}

#[tokio::test]
async fn test_open_repository_creates_database() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("tasks.db").display());
    let config = StorytellerConfig::default().with_secrets(&secrets(&[("DATABASE_URL", url.as_str())]));

    let repository = open_repository(&config).unwrap();
    let task = repository.create("a quiet harbor").await.unwrap();

    let stored = repository.get(task.id).await.unwrap().unwrap();
    assert_eq!(stored.status, TaskStatus::Pending);
    assert_eq!(stored.prompt, "a quiet harbor");
}

#[test]
fn test_build_pipeline_requires_gemini_key() {
    let repository: Arc<dyn TaskRepository> = Arc::new(InMemoryTaskRepository::new());
    let result = build_pipeline(
        &memory_config(),
        &secrets(&[("GOOGLE_TTS_API_KEY", "tts-key")]),
        repository,
    );

    let err = result.err().unwrap();
    assert!(matches!(err.kind(), StorytellerErrorKind::Config(_)));
}

#[test]
fn test_build_pipeline_requires_speech_credential() {
    let repository: Arc<dyn TaskRepository> = Arc::new(InMemoryTaskRepository::new());
    let result = build_pipeline(
        &memory_config(),
        &secrets(&[("GEMINI_API_KEY", "gemini-key")]),
        repository,
    );

    let err = result.err().unwrap();
    assert!(matches!(err.kind(), StorytellerErrorKind::Config(_)));
}

#[tokio::test]
async fn test_build_pipeline_shares_repository() {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let pipeline = build_pipeline(
        &memory_config(),
        &secrets(&[
            ("GEMINI_API_KEY", "gemini-key"),
            ("GOOGLE_TTS_API_KEY", "tts-key"),
        ]),
        repository.clone(),
    )
    .unwrap();

    pipeline.repository().create("a sleepy owl").await.unwrap();
    assert_eq!(repository.len().await, 1);
}
