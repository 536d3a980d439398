//! Router tests driven through `tower::ServiceExt::oneshot`.

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use std::sync::Arc;
use storyteller_core::{
    GenerateRequest, GenerateResponse, Output, SpeechRequest, TaskId, TaskStatus,
};
use storyteller_error::StorytellerResult;
use storyteller_interface::{SpeechSynthesizer, TaskRepository, TextGenerator};
use storyteller_pipeline::{
    InMemoryTaskRepository, Narrator, PipelineConfig, SpeechConfig, StoryPipeline,
    TaskDispatcher, TracingObserver,
};
use storyteller_server::{AppState, ServerConfig, create_router};
use storyteller_storage::ObjectAudioStore;
use tower::ServiceExt;

struct OneBeatModel;

#[async_trait]
impl TextGenerator for OneBeatModel {
    async fn generate(&self, req: &GenerateRequest) -> StorytellerResult<GenerateResponse> {
        let wants_outline = req
            .response_schema
            .as_ref()
            .is_some_and(|s| s["properties"].get("outline").is_some());
        let payload = if wants_outline {
            json!({"outline": ["The dragon pulls warm bread from the oven"]})
        } else {
            json!({"section": "The kitchen is warm. Flour drifts like snow."})
        };
        Ok(GenerateResponse {
            outputs: vec![Output::Json(payload)],
        })
    }

    fn provider_name(&self) -> &'static str {
        "test"
    }

    fn model_name(&self) -> &str {
        "one-beat"
    }
}

struct EchoSynthesizer;

#[async_trait]
impl SpeechSynthesizer for EchoSynthesizer {
    async fn synthesize(&self, req: &SpeechRequest) -> StorytellerResult<Vec<u8>> {
        Ok(req.text.as_bytes().to_vec())
    }

    fn provider_name(&self) -> &'static str {
        "echo"
    }
}

struct TestApp {
    router: Router,
    state: Arc<AppState>,
}

fn app(config: ServerConfig) -> TestApp {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let narrator = Narrator::new(
        Arc::new(EchoSynthesizer),
        Arc::new(ObjectAudioStore::in_memory("storyteller-audio-bucket")),
        SpeechConfig::default(),
    );
    let pipeline = Arc::new(StoryPipeline::new(
        repository,
        Arc::new(OneBeatModel),
        narrator,
        PipelineConfig::default(),
        Arc::new(TracingObserver),
    ));
    let dispatcher = TaskDispatcher::new(pipeline, *config.max_concurrent_tasks());
    let state = Arc::new(AppState::new(dispatcher, config));

    TestApp {
        router: create_router(state.clone()),
        state,
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_story(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/stories")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health() {
    let app = app(ServerConfig::default());
    let response = app.router.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_create_story_returns_pending_task() {
    let app = app(ServerConfig::default());
    let response = app
        .router
        .oneshot(post_story(
            r#"{"prompt": "A story about a friendly dragon who learns to bake"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = body_json(response).await;
    assert_eq!(body["status"], "pending");
    assert!(body["task_id"].is_i64());
}

#[tokio::test]
async fn test_blank_prompt_is_rejected() {
    let app = app(ServerConfig::default());
    let response = app
        .router
        .oneshot(post_story(r#"{"prompt": "   "}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
    assert!(app.state.repository.get(TaskId::from(1)).await.unwrap().is_none());
}

#[tokio::test]
async fn test_overlong_prompt_is_rejected() {
    let config = ServerConfig::builder()
        .max_prompt_chars(10usize)
        .build()
        .unwrap();
    let app = app(config);
    let response = app
        .router
        .oneshot(post_story(r#"{"prompt": "a lighthouse keeper at dusk"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("10 characters"));
}

#[tokio::test]
async fn test_missing_prompt_field_is_unprocessable() {
    let app = app(ServerConfig::default());
    let response = app
        .router
        .oneshot(post_story(r#"{"topic": "owls"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_unknown_task_is_not_found() {
    let app = app(ServerConfig::default());
    let response = app.router.oneshot(get("/stories/4242")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Task 4242 not found"})
    );
}

#[tokio::test]
async fn test_non_numeric_task_id_is_bad_request() {
    let app = app(ServerConfig::default());
    let response = app.router.oneshot(get("/stories/abc")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_pending_task_omits_results() {
    let app = app(ServerConfig::default());
    let task = app.state.repository.create("a quiet pond").await.unwrap();

    let response = app
        .router
        .oneshot(get(&format!("/stories/{}", task.id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"task_id": task.id.value(), "status": "pending"})
    );
}

#[tokio::test]
async fn test_story_completes_and_is_reported() {
    let app = app(ServerConfig::default());

    let response = app
        .router
        .clone()
        .oneshot(post_story(r#"{"prompt": "a dragon who bakes"}"#))
        .await
        .unwrap();
    let task_id = body_json(response).await["task_id"].as_i64().unwrap();

    app.state.dispatcher.shutdown().await;

    let response = app
        .router
        .oneshot(get(&format!("/stories/{}", task_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], TaskStatus::Complete.as_str());
    assert_eq!(
        body["story_text"],
        "The kitchen is warm. Flour drifts like snow."
    );
    assert!(
        body["audio_url"]
            .as_str()
            .unwrap()
            .starts_with("https://storage.googleapis.com/storyteller-audio-bucket/story-")
    );
}
