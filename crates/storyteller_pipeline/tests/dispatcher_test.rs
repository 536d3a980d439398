//! Background dispatch of pipeline runs.

mod test_utils;

use storyteller_core::TaskStatus;
use storyteller_interface::TaskRepository;
use storyteller_pipeline::{PipelineConfig, SpeechConfig, TaskDispatcher};
use test_utils::{MockStoryModel, harness};

#[tokio::test]
async fn test_submit_returns_pending_task_immediately() {
    let h = harness(
        MockStoryModel::with_beats(&["One", "Two"]),
        PipelineConfig::default(),
        SpeechConfig::default(),
    );
    let dispatcher = TaskDispatcher::new(h.pipeline.clone(), 4);

    let task = dispatcher.submit("a sleepy harbor").await.unwrap();
    assert_eq!(task.status, TaskStatus::Pending);
    assert!(task.story_text.is_none());
    assert!(task.audio_url.is_none());

    dispatcher.shutdown().await;

    let finished = h.repository.get(task.id).await.unwrap().unwrap();
    assert_eq!(finished.status, TaskStatus::Complete);
    assert!(finished.audio_url.is_some());
    assert_eq!(dispatcher.in_flight(), 0);
}

#[tokio::test]
async fn test_runs_are_independent() {
    let h = harness(
        MockStoryModel::with_beats(&["One"]),
        PipelineConfig::default(),
        SpeechConfig::default(),
    );
    let dispatcher = TaskDispatcher::new(h.pipeline.clone(), 2);

    let mut ids = Vec::new();
    for n in 0..5 {
        ids.push(dispatcher.submit(&format!("story {n}")).await.unwrap().id);
    }
    dispatcher.shutdown().await;

    for id in ids {
        let task = h.repository.get(id).await.unwrap().unwrap();
        assert_eq!(task.status, TaskStatus::Complete);
    }
    assert_eq!(h.repository.len().await, 5);
}

#[tokio::test]
async fn test_failed_run_does_not_affect_others() {
    let h = harness(
        MockStoryModel::failing_outline(),
        PipelineConfig::default(),
        SpeechConfig::default(),
    );
    let dispatcher = TaskDispatcher::new(h.pipeline.clone(), 0);

    let first = dispatcher.submit("one").await.unwrap();
    let second = dispatcher.submit("two").await.unwrap();
    dispatcher.shutdown().await;

    for id in [first.id, second.id] {
        let task = h.repository.get(id).await.unwrap().unwrap();
        assert_eq!(task.status, TaskStatus::Failed);
    }
}
