//! Object naming.

use storyteller_core::AudioEncoding;

/// Fresh object name for a story narration: `story-<uuid>.<ext>`.
///
/// # Examples
///
/// ```
/// use storyteller_core::AudioEncoding;
/// use storyteller_storage::story_object_name;
///
/// let name = story_object_name(AudioEncoding::Mp3);
/// assert!(name.starts_with("story-"));
/// assert!(name.ends_with(".mp3"));
/// assert_ne!(name, story_object_name(AudioEncoding::Mp3));
/// ```
pub fn story_object_name(encoding: AudioEncoding) -> String {
    format!("story-{}.{}", uuid::Uuid::new_v4(), encoding.extension())
}
