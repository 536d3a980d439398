//! End-to-end story runs.

use crate::{
    Narrator, OutlineGenerator, PipelineConfig, PipelineEvent, PipelineObserver, RunContext,
    SectionWriter,
};
use std::sync::Arc;
use std::time::Instant;
use storyteller_core::{Task, TaskId, TaskStatus};
use storyteller_error::StorytellerResult;
use storyteller_interface::{TaskRepository, TextGenerator};
use tracing::{error, info, instrument};

/// Drives one task from `pending` to a terminal status.
///
/// All phases run sequentially. Any error ends the run with the task
/// marked `failed`; nothing is retried.
#[derive(Clone)]
pub struct StoryPipeline {
    repository: Arc<dyn TaskRepository>,
    outline: OutlineGenerator,
    writer: SectionWriter,
    narrator: Narrator,
    observer: Arc<dyn PipelineObserver>,
}

impl StoryPipeline {
    /// Assemble a pipeline from its collaborators.
    pub fn new(
        repository: Arc<dyn TaskRepository>,
        generator: Arc<dyn TextGenerator>,
        narrator: Narrator,
        config: PipelineConfig,
        observer: Arc<dyn PipelineObserver>,
    ) -> Self {
        Self {
            repository,
            outline: OutlineGenerator::new(generator.clone(), *config.beat_count()),
            writer: SectionWriter::new(generator, config),
            narrator,
            observer,
        }
    }

    /// Task store the pipeline writes to.
    pub fn repository(&self) -> &Arc<dyn TaskRepository> {
        &self.repository
    }

    /// Run a task and return its final status.
    ///
    /// Never returns an error: failures are recorded on the task. A failure
    /// to record `failed` is logged.
    #[instrument(skip(self, prompt), fields(task_id = %task_id))]
    pub async fn run(&self, task_id: TaskId, prompt: &str) -> TaskStatus {
        let started = Instant::now();
        let ctx = RunContext::new(task_id, self.observer.as_ref());

        match self.execute(prompt, &ctx).await {
            Ok(task) => {
                ctx.emit(PipelineEvent::Completed {
                    task_id,
                    url: task.audio_url.unwrap_or_default(),
                    elapsed_secs: started.elapsed().as_secs_f64(),
                });
                task.status
            }
            Err(e) => {
                ctx.emit(PipelineEvent::Failed {
                    task_id,
                    reason: e.to_string(),
                    elapsed_secs: started.elapsed().as_secs_f64(),
                });
                match self.repository.update_status(task_id, TaskStatus::Failed).await {
                    Ok(_) => ctx.emit(PipelineEvent::StatusChanged {
                        task_id,
                        status: TaskStatus::Failed,
                    }),
                    Err(record_err) => {
                        error!(error = %record_err, "Could not record failed status");
                    }
                }
                TaskStatus::Failed
            }
        }
    }

    async fn execute(&self, prompt: &str, ctx: &RunContext<'_>) -> StorytellerResult<Task> {
        let task_id = ctx.task_id();

        self.advance(task_id, TaskStatus::GeneratingStory, ctx).await?;
        let outline = self.outline.generate(prompt).await?;
        ctx.emit(PipelineEvent::OutlineReady {
            task_id,
            beats: outline.len(),
        });

        let draft = self.writer.write(prompt, &outline, ctx).await?;
        info!(
            sections = draft.sections.len(),
            chars = draft.text.chars().count(),
            "Story written"
        );

        self.advance(task_id, TaskStatus::GeneratingAudio, ctx).await?;
        let url = self.narrator.narrate(&draft.text, ctx).await?;

        let task = self.repository.complete(task_id, &draft.text, &url).await?;
        ctx.emit(PipelineEvent::StatusChanged {
            task_id,
            status: task.status,
        });
        Ok(task)
    }

    async fn advance(
        &self,
        task_id: TaskId,
        status: TaskStatus,
        ctx: &RunContext<'_>,
    ) -> StorytellerResult<()> {
        self.repository.update_status(task_id, status).await?;
        ctx.emit(PipelineEvent::StatusChanged { task_id, status });
        Ok(())
    }
}
