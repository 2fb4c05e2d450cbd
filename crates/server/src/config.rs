use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use patata_core::Lexicon;
use patata_vision::{Credentials, DEFAULT_MAX_LABELS, DEFAULT_TRANSLATE_ENDPOINT, DEFAULT_VISION_ENDPOINT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "patata-server", about = "Detects food in images")]
pub struct Args {
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    #[arg(long, env = "PATATA_BIND", default_value = "0.0.0.0")]
    pub bind: IpAddr,

    /// Maximum accepted request body, in bytes.
    #[arg(long, env = "PATATA_BODY_LIMIT", default_value_t = 10 * 1024 * 1024)]
    pub body_limit: usize,

    #[arg(long, env = "PATATA_TARGET_LANGUAGE", default_value = "es")]
    pub target_language: String,

    #[arg(long, env = "PATATA_MAX_LABELS", default_value_t = DEFAULT_MAX_LABELS)]
    pub max_labels: u32,

    /// Service-account JSON key used when no API key is given.
    #[arg(long, env = "PATATA_CREDENTIALS", default_value = "credentials.json")]
    pub credentials: PathBuf,

    #[arg(long, env = "PATATA_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// TOML lexicon replacing the built-in food vocabulary and synonyms.
    #[arg(long, env = "PATATA_LEXICON")]
    pub lexicon: Option<PathBuf>,

    /// Allowed CORS origins; any origin when empty.
    #[arg(long, env = "PATATA_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,

    #[arg(long, env = "PATATA_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Ceiling for each outbound Google request, token exchange included.
    #[arg(long, env = "PATATA_UPSTREAM_TIMEOUT_SECS", default_value_t = 30)]
    pub upstream_timeout_secs: u64,

    #[arg(long, env = "PATATA_VISION_ENDPOINT", default_value = DEFAULT_VISION_ENDPOINT)]
    pub vision_endpoint: String,

    #[arg(long, env = "PATATA_TRANSLATE_ENDPOINT", default_value = DEFAULT_TRANSLATE_ENDPOINT)]
    pub translate_endpoint: String,
}

impl Args {
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    pub fn credentials(&self) -> anyhow::Result<Credentials> {
        if let Some(key) = &self.api_key {
            return Ok(Credentials::ApiKey(key.clone()));
        }
        Credentials::from_key_file(&self.credentials)
            .with_context(|| format!("loading credentials from {}", self.credentials.display()))
    }

    pub fn lexicon(&self) -> anyhow::Result<Lexicon> {
        match &self.lexicon {
            Some(path) => Lexicon::load(path)
                .with_context(|| format!("loading lexicon from {}", path.display())),
            None => Ok(Lexicon::default()),
        }
    }
}
