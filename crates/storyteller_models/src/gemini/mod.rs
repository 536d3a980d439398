//! Google Gemini REST client.

mod client;
mod config;
mod dto;

pub use client::GeminiClient;
pub use config::{GeminiConfig, GeminiConfigBuilder};
