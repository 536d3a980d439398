//! Tests for the in-memory task store.

use storyteller_core::{TaskId, TaskStatus};
use storyteller_error::{DatabaseErrorKind, StorytellerErrorKind};
use storyteller_interface::TaskRepository;
use storyteller_pipeline::InMemoryTaskRepository;

#[tokio::test]
async fn test_create_assigns_increasing_ids() {
    let repo = InMemoryTaskRepository::new();
    let first = repo.create("first").await.unwrap();
    let second = repo.create("second").await.unwrap();

    assert!(second.id > first.id);
    assert_eq!(first.status, TaskStatus::Pending);
    assert_eq!(repo.len().await, 2);
}

#[tokio::test]
async fn test_get_unknown_is_none() {
    let repo = InMemoryTaskRepository::new();
    assert!(repo.get(TaskId::from(99)).await.unwrap().is_none());
}

#[tokio::test]
async fn test_full_lifecycle() {
    let repo = InMemoryTaskRepository::new();
    let task = repo.create("a snowy village").await.unwrap();

    repo.update_status(task.id, TaskStatus::GeneratingStory)
        .await
        .unwrap();
    repo.update_status(task.id, TaskStatus::GeneratingAudio)
        .await
        .unwrap();
    let done = repo
        .complete(task.id, "Snow falls.", "https://example.com/a.mp3")
        .await
        .unwrap();

    assert_eq!(done.status, TaskStatus::Complete);
    assert_eq!(done.story_text.as_deref(), Some("Snow falls."));
    assert_eq!(done.audio_url.as_deref(), Some("https://example.com/a.mp3"));
    assert!(done.updated_at >= task.created_at);
}

#[tokio::test]
async fn test_status_never_moves_backward() {
    let repo = InMemoryTaskRepository::new();
    let task = repo.create("a quiet meadow").await.unwrap();
    repo.update_status(task.id, TaskStatus::GeneratingStory)
        .await
        .unwrap();

    let err = repo
        .update_status(task.id, TaskStatus::Pending)
        .await
        .unwrap_err();
    assert!(matches!(
        err.kind(),
        StorytellerErrorKind::Database(e)
            if matches!(e.kind, DatabaseErrorKind::InvalidTransition { .. })
    ));
}

#[tokio::test]
async fn test_complete_requires_generating_audio() {
    let repo = InMemoryTaskRepository::new();
    let task = repo.create("a candlelit room").await.unwrap();

    assert!(repo.complete(task.id, "text", "url").await.is_err());
    let unchanged = repo.get(task.id).await.unwrap().unwrap();
    assert!(unchanged.story_text.is_none());
}

#[tokio::test]
async fn test_failed_is_terminal() {
    let repo = InMemoryTaskRepository::new();
    let task = repo.create("a rainy night").await.unwrap();
    repo.update_status(task.id, TaskStatus::Failed).await.unwrap();

    assert!(
        repo.update_status(task.id, TaskStatus::GeneratingStory)
            .await
            .is_err()
    );
    assert!(repo.update_status(task.id, TaskStatus::Failed).await.is_err());
}

#[tokio::test]
async fn test_update_unknown_is_not_found() {
    let repo = InMemoryTaskRepository::new();
    let err = repo
        .update_status(TaskId::from(7), TaskStatus::Failed)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}
