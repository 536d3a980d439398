//! `voices` command handler.

use storyteller::{
    Secrets, SpeechSynthesizer, StorytellerConfig, StorytellerResult, VoiceInfo, speech_client,
};

/// Voices offered for `language`, sorted by name.
pub async fn list_voices(
    config: &StorytellerConfig,
    secrets: &Secrets,
    language: &str,
) -> StorytellerResult<Vec<VoiceInfo>> {
    let client = speech_client(config, secrets)?;
    let mut voices = client.list_voices(Some(language)).await?;
    voices.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(voices)
}
