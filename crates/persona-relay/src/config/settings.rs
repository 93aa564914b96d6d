use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the credential variable, both in the process environment and in `.env`.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Settings {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    pub conversation: ConversationConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory with the avatar page assets; unset means API only
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3456,
            static_dir: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub timeout_seconds: u64,
    #[serde(deserialize_with = "deserialize_api_key")]
    pub api_key: Option<ApiKey>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: 150,
            temperature: 0.9,
            timeout_seconds: 30,
            api_key: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ConversationConfig {
    pub persona: String,
    /// Sliding window size for a session's history (user + assistant turns)
    pub max_turns: usize,
    pub default_session_id: String,
    pub max_sessions: usize,
    pub idle_ttl_seconds: u64,
    pub sweep_interval_seconds: u64,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            persona: "hood-toly".to_string(),
            max_turns: 20,
            default_session_id: "default".to_string(),
            max_sessions: 10_000,
            idle_ttl_seconds: 6 * 60 * 60,
            sweep_interval_seconds: 300,
        }
    }
}

/// Provider bearer credential. Never printed.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    /// Returns `None` for blank values so an empty `OPENAI_API_KEY=` means "not configured".
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

/// Blank `api_key` values in the settings file or `APP__PROVIDER__API_KEY` mean "not configured".
fn deserialize_api_key<'de, D>(deserializer: D) -> std::result::Result<Option<ApiKey>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.and_then(ApiKey::new))
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::load_from("config/settings", Path::new(".env"))
    }

    /// Defaults <- optional settings file <- `APP__*` environment.
    /// The credential is then resolved separately, see [`resolve_api_key`].
    pub fn load_from(config_name: &str, env_file: &Path) -> Result<Self> {
        dotenvy::from_path(env_file).ok();

        let config = Config::builder()
            .add_source(File::with_name(config_name).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let mut settings: Settings = config
            .try_deserialize()
            .context("Invalid configuration")?;

        settings.provider.api_key = resolve_api_key(
            settings.provider.api_key.take(),
            std::env::var(API_KEY_VAR).ok(),
            env_file,
        );

        Ok(settings)
    }
}

/// Credential precedence, lowest to highest: settings file / `APP__PROVIDER__API_KEY`,
/// process environment, then an `OPENAI_API_KEY=` line in the local env file.
pub fn resolve_api_key(
    configured: Option<ApiKey>,
    from_env: Option<String>,
    env_file: &Path,
) -> Option<ApiKey> {
    let mut key = configured;

    if let Some(value) = from_env.and_then(ApiKey::new) {
        key = Some(value);
    }

    match dotenvy::from_path_iter(env_file) {
        Ok(entries) => {
            for (name, value) in entries.flatten() {
                if name == API_KEY_VAR {
                    if let Some(value) = ApiKey::new(value) {
                        debug!("Credential overridden from {}", env_file.display());
                        key = Some(value);
                    }
                }
            }
        }
        Err(e) => debug!("No env file at {}: {}", env_file.display(), e),
    }

    key
}
