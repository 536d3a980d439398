//! Model provider clients for Storyteller.
//!
//! - [`GeminiClient`]: Google Gemini `generateContent` over REST, with
//!   structured (JSON schema) output support.
//! - [`GoogleTtsClient`]: Google Cloud Text-to-Speech, both per-chunk
//!   `text:synthesize` and long-running `synthesizeLongAudio`.
//!
//! ```no_run
//! use storyteller_core::{GenerateRequest, Message};
//! use storyteller_interface::TextGenerator;
//! use storyteller_models::{GeminiClient, GeminiConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::new(GeminiConfig::default(), std::env::var("GEMINI_API_KEY")?)?;
//! let request = GenerateRequest {
//!     messages: vec![Message::user("Describe a quiet harbor at dusk.")],
//!     ..Default::default()
//! };
//! let response = client.generate(&request).await?;
//! println!("{:?}", response.text());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gemini;
mod google_tts;
mod metrics;

pub use gemini::{GeminiClient, GeminiConfig, GeminiConfigBuilder};
pub use google_tts::{GoogleTtsClient, GoogleTtsConfig, GoogleTtsConfigBuilder, TtsCredential};
pub use metrics::{LlmMetrics, SpeechMetrics};
