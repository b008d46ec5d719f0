use serde::Deserialize;
use std::env;
use std::sync::OnceLock;
use thiserror::Error;

/// Default word budget per chunk; keeps each model call under a ~1024 token input window.
pub const DEFAULT_MAX_CHUNK_WORDS: usize = 1000;
const DEFAULT_SUMMARIZATION_MODEL: &str = "llama3.2";
const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the Rusty Summary server.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Backend that answers model calls.
    pub summarization_provider: SummarizationProvider,
    /// Model identifier passed to the provider.
    pub summarization_model: String,
    /// Base URL of the Ollama runtime.
    pub ollama_url: String,
    /// Per-call timeout applied to provider HTTP requests.
    pub summarization_timeout_secs: u64,
    /// Word budget for a single model call; longer documents are chunked.
    pub max_chunk_words: usize,
    /// Upper bound on accepted multipart request bodies.
    pub max_upload_bytes: usize,
    /// Optional override for the HTTP server port.
    pub server_port: Option<u16>,
}

/// Supported summarization backends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummarizationProvider {
    /// Local Ollama runtime.
    Ollama,
    /// Deterministic lead-sentence model that needs no runtime.
    Extractive,
}

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        let max_chunk_words = parse_optional::<usize>("SUMMARY_MAX_CHUNK_WORDS")?
            .unwrap_or(DEFAULT_MAX_CHUNK_WORDS);
        if max_chunk_words == 0 {
            return Err(ConfigError::InvalidValue("SUMMARY_MAX_CHUNK_WORDS".into()));
        }

        Ok(Self {
            summarization_provider: load_env_optional("SUMMARIZATION_PROVIDER")
                .map(|value| {
                    value.parse().map_err(|()| {
                        ConfigError::InvalidValue("SUMMARIZATION_PROVIDER".to_string())
                    })
                })
                .transpose()?
                .unwrap_or(SummarizationProvider::Ollama),
            summarization_model: load_env_optional("SUMMARIZATION_MODEL")
                .unwrap_or_else(|| DEFAULT_SUMMARIZATION_MODEL.to_string()),
            ollama_url: load_env_optional("OLLAMA_URL")
                .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string()),
            summarization_timeout_secs: parse_optional("SUMMARIZATION_TIMEOUT_SECS")?
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            max_chunk_words,
            max_upload_bytes: parse_optional("MAX_UPLOAD_BYTES")?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            server_port: parse_optional("SERVER_PORT")?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            summarization_provider: SummarizationProvider::Ollama,
            summarization_model: DEFAULT_SUMMARIZATION_MODEL.to_string(),
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            summarization_timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_chunk_words: DEFAULT_MAX_CHUNK_WORDS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            server_port: None,
        }
    }
}

fn load_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_optional<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    load_env_optional(key)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(key.to_string()))
        })
        .transpose()
}

impl std::str::FromStr for SummarizationProvider {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "extractive" => Ok(Self::Extractive),
            _ => Err(()),
        }
    }
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Retrieve the loaded configuration, panicking if initialization has not occurred.
pub fn get_config() -> &'static Config {
    CONFIG.get().expect("Config not initialized")
}

/// Load configuration from the environment and install it in the global cache.
pub fn init_config() {
    dotenvy::dotenv().ok();
    let config = Config::from_env().expect("Failed to load config from environment");
    tracing::debug!(
        provider = ?config.summarization_provider,
        model = %config.summarization_model,
        max_chunk_words = config.max_chunk_words,
        server_port = ?config.server_port,
        "Loaded configuration"
    );
    CONFIG.set(config).expect("Failed to set config");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_parses_case_insensitively() {
        assert_eq!(
            "Ollama".parse::<SummarizationProvider>(),
            Ok(SummarizationProvider::Ollama)
        );
        assert_eq!(
            " extractive ".parse::<SummarizationProvider>(),
            Ok(SummarizationProvider::Extractive)
        );
        assert!("bart".parse::<SummarizationProvider>().is_err());
    }

    #[test]
    fn defaults_match_chunk_budget() {
        let config = Config::default();
        assert_eq!(config.max_chunk_words, 1000);
        assert_eq!(config.summarization_provider, SummarizationProvider::Ollama);
        assert!(config.server_port.is_none());
    }
}
