//! Shared value types for collaborator traits.

use serde::{Deserialize, Serialize};

/// Location of a persisted audio object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoredAudio {
    /// Object name within the store, e.g. `story-<uuid>.mp3`
    pub name: String,
    /// Public URL listeners fetch the audio from
    pub url: String,
}
