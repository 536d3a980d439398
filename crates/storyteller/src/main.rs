//! Storyteller CLI binary.
//!
//! This binary provides command-line access to Storyteller:
//! - Serve the story API over HTTP
//! - Write and narrate a single story in-process
//! - Inspect voices and stored tasks

use anyhow::{Context, bail};
use clap::Parser;
use storyteller::{ObservabilityConfig, Secrets, StorytellerConfig, TaskStatus, init_observability};

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use cli::{Cli, Commands, list_voices, run_story, serve_command, task_status};

    let cli = Cli::parse();

    // .env is optional
    dotenvy::dotenv().ok();

    let log_level = if cli.verbose { "debug" } else { "info" };
    init_observability(
        ObservabilityConfig::default()
            .with_log_level(log_level)
            .with_json_logs(cli.json_logs),
    )
    .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    let secrets = Secrets::from_env();
    let config = StorytellerConfig::load_from(cli.config.as_deref())
        .context("Failed to load configuration")?
        .with_secrets(&secrets);

    match cli.command {
        Commands::Serve { host, port } => {
            serve_command(config, &secrets, host, port)
                .await
                .context("Service stopped with an error")?;
        }

        Commands::Run { prompt, beats } => {
            let prompt = prompt.trim();
            if prompt.is_empty() {
                bail!("Prompt must not be blank");
            }
            let task = run_story(config, &secrets, prompt, beats).await?;
            match (task.status, task.audio_url) {
                (TaskStatus::Complete, Some(url)) => println!("{}", url),
                (status, _) => bail!("Story {} ended as {}", task.id, status),
            }
        }

        Commands::Voices { language } => {
            let voices = list_voices(&config, &secrets, &language)
                .await
                .context("Failed to list voices")?;
            for voice in voices {
                println!(
                    "{}\t{}\t{}",
                    voice.name,
                    voice.ssml_gender.unwrap_or_default(),
                    voice.language_codes.join(",")
                );
            }
        }

        Commands::Status { id } => {
            let task = task_status(&config, id).await?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
    }

    Ok(())
}
