use secrecy::Secret;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Flash-tier model used when `GEMINI_MODEL` is not set.
pub const DEFAULT_CHAT_MODEL: &str = "gemini-1.5-flash";

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Request body cap for `/api/ask` (4.5 MiB, the serverless platform limit).
pub const DEFAULT_MAX_BODY_BYTES: usize = 4_718_592;

#[derive(Debug, Clone, Deserialize)]
pub struct AskConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
    pub log_level: String,
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSettings {
    /// Optional on purpose: a missing key fails each request with a 500
    /// instead of keeping the process from starting.
    pub api_key: Option<Secret<String>>,
    pub model: String,
    pub api_base: String,
    pub timeout_secs: u64,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_CHAT_MODEL.to_string(),
            api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AskConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        Self::from_lookup(common_config, |key| env::var(key).ok())
    }

    /// Build the service configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs = get_env(&lookup, "GEMINI_TIMEOUT_SECS", &DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("GEMINI_TIMEOUT_SECS is invalid: {}", e))
            })?;

        let max_body_bytes = get_env(
            &lookup,
            "ASK_MAX_BODY_BYTES",
            &DEFAULT_MAX_BODY_BYTES.to_string(),
        )
        .parse::<usize>()
        .map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("ASK_MAX_BODY_BYTES is invalid: {}", e))
        })?;

        Ok(AskConfig {
            common,
            gemini: GeminiSettings {
                api_key: lookup("GEMINI_API_KEY")
                    .filter(|key| !key.trim().is_empty())
                    .map(Secret::new),
                model: get_env(&lookup, "GEMINI_MODEL", DEFAULT_CHAT_MODEL),
                api_base: get_env(&lookup, "GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE),
                timeout_secs,
            },
            log_level: get_env(&lookup, "LOG_LEVEL", "info"),
            max_body_bytes,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.gemini.api_key.is_some()
    }
}

fn get_env<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|val| !val.is_empty())
        .unwrap_or_else(|| default.to_string())
}
