//! Tests for the Cloud Text-to-Speech client against a mock server.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::json;
use storyteller_core::{LongFormRequest, OperationHandle, OperationState, SpeechRequest, Voice};
use storyteller_error::{StorytellerErrorKind, SynthesisErrorKind};
use storyteller_interface::{LongFormSynthesizer, SpeechSynthesizer};
use storyteller_models::{GoogleTtsClient, GoogleTtsConfig, TtsCredential};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, project: Option<&str>) -> GoogleTtsClient {
    let mut builder = GoogleTtsConfig::builder();
    builder.base_url(server.uri());
    if let Some(project) = project {
        builder.project_id(Some(project.to_string()));
    }
    GoogleTtsClient::new(
        builder.build().unwrap(),
        TtsCredential::ApiKey("tts-key".to_string()),
    )
    .unwrap()
}

fn synthesis_kind(err: &storyteller_error::StorytellerError) -> SynthesisErrorKind {
    match err.kind() {
        StorytellerErrorKind::Synthesis(e) => e.kind.clone(),
        other => panic!("expected synthesis error, got {other}"),
    }
}

#[test]
fn test_blank_credential_is_configuration_error() {
    let err = GoogleTtsClient::new(
        GoogleTtsConfig::default(),
        TtsCredential::AccessToken(String::new()),
    )
    .unwrap_err();
    assert!(matches!(err.kind(), StorytellerErrorKind::Config(_)));
}

#[tokio::test]
async fn test_synthesize_decodes_audio() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/text:synthesize"))
        .and(header("x-goog-api-key", "tts-key"))
        .and(body_partial_json(json!({
            "input": {"text": "The tide rolls in."},
            "voice": {"languageCode": "en-US", "name": "en-US-Chirp3-HD-Achernar"},
            "audioConfig": {"audioEncoding": "MP3", "speakingRate": 0.75}
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"audioContent": STANDARD.encode(b"mp3-bytes")})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let request = SpeechRequest::new(
        "The tide rolls in.",
        Voice::new("en-US-Chirp3-HD-Achernar"),
    )
    .with_speaking_rate(0.75);

    let audio = client.synthesize(&request).await.unwrap();
    assert_eq!(audio, b"mp3-bytes".to_vec());
    assert_eq!(client.max_input_bytes(), 5000);
}

#[tokio::test]
async fn test_synthesize_without_audio_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/text:synthesize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let request = SpeechRequest::new("Hi.", Voice::new("en-US-Chirp3-HD-Achernar"));
    let err = client.synthesize(&request).await.unwrap_err();
    assert_eq!(synthesis_kind(&err), SynthesisErrorKind::MissingAudio);
}

#[tokio::test]
async fn test_synthesize_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string("text too long"))
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let request = SpeechRequest::new("Hi.", Voice::new("en-US-Chirp3-HD-Achernar"));
    let err = client.synthesize(&request).await.unwrap_err();
    assert!(matches!(
        synthesis_kind(&err),
        SynthesisErrorKind::HttpStatus { status_code: 400, .. }
    ));
}

#[tokio::test]
async fn test_list_voices_filters_by_language() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/voices"))
        .and(query_param("languageCode", "en-US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "voices": [{
                "name": "en-US-Chirp3-HD-Achernar",
                "languageCodes": ["en-US"],
                "ssmlGender": "FEMALE",
                "naturalSampleRateHertz": 24000
            }]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let voices = client.list_voices(Some("en-US")).await.unwrap();
    assert_eq!(voices.len(), 1);
    assert_eq!(voices[0].name, "en-US-Chirp3-HD-Achernar");
    assert_eq!(voices[0].natural_sample_rate_hertz, Some(24000));
}

#[tokio::test]
async fn test_long_audio_requires_project() {
    let server = MockServer::start().await;
    let client = client_for(&server, None);
    let request = LongFormRequest {
        text: "Long story.".to_string(),
        voice: Voice::new("en-US-Chirp3-HD-Achernar"),
        speaking_rate: 0.85,
        output_uri: "gs://bucket/story-1.wav".to_string(),
    };
    let err = client.start(&request).await.unwrap_err();
    assert_eq!(synthesis_kind(&err), SynthesisErrorKind::LongFormUnavailable);
}

#[tokio::test]
async fn test_long_audio_submit_and_poll() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/projects/dreams/locations/global:synthesizeLongAudio"))
        .and(body_partial_json(json!({
            "parent": "projects/dreams/locations/global",
            "outputGcsUri": "gs://bucket/story-1.wav",
            "audioConfig": {"audioEncoding": "LINEAR16"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "projects/dreams/locations/global/operations/77",
            "done": false
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/projects/dreams/locations/global/operations/77"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "projects/dreams/locations/global/operations/77",
            "done": true
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, Some("dreams"));
    let request = LongFormRequest {
        text: "Long story.".to_string(),
        voice: Voice::new("en-US-Chirp3-HD-Achernar"),
        speaking_rate: 0.85,
        output_uri: "gs://bucket/story-1.wav".to_string(),
    };

    let handle = client.start(&request).await.unwrap();
    assert_eq!(handle.name, "projects/dreams/locations/global/operations/77");
    assert_eq!(client.poll(&handle).await.unwrap(), OperationState::Done);
}

#[tokio::test]
async fn test_poll_reports_operation_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/operations/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "operations/9",
            "done": true,
            "error": {"code": 3, "message": "bad voice"}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, Some("dreams"));
    let state = client
        .poll(&OperationHandle {
            name: "operations/9".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(state, OperationState::Failed("code 3: bad voice".to_string()));
}
