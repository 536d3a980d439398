//! Google Cloud Text-to-Speech client.

mod client;
mod config;
mod dto;

pub use client::GoogleTtsClient;
pub use config::{GoogleTtsConfig, GoogleTtsConfigBuilder, TtsCredential};
