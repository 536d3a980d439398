//! Server settings.

use serde::{Deserialize, Serialize};

/// Request surface settings.
///
/// # Examples
///
/// ```
/// use storyteller_server::ServerConfig;
///
/// let config = ServerConfig::default();
/// assert_eq!(config.address(), "0.0.0.0:8080");
/// assert_eq!(*config.max_prompt_chars(), 2000);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into), default)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    host: String,

    /// Port to bind
    #[serde(default = "default_port")]
    port: u16,

    /// Longest accepted prompt, in characters
    #[serde(default = "default_max_prompt_chars")]
    max_prompt_chars: usize,

    /// Story runs allowed to execute at once
    #[serde(default = "default_max_concurrent_tasks")]
    max_concurrent_tasks: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_prompt_chars() -> usize {
    2000
}

fn default_max_concurrent_tasks() -> usize {
    4
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_prompt_chars: default_max_prompt_chars(),
            max_concurrent_tasks: default_max_concurrent_tasks(),
        }
    }
}

impl ServerConfig {
    /// Creates a new config builder.
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// `host:port` socket address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Same settings bound to another host and port.
    pub fn with_address(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }
}
