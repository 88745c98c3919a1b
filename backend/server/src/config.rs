use std::{env, fmt::Display, fs::read_to_string, str::FromStr};

use tracing::{info, warn};

pub const DEFAULT_CHAT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_CHAT_MODEL: &str = "llama-3.1-8b-instant";

pub struct Config {
    pub port: u16,
    pub questions_path: String,
    pub chat: ChatConfig,
}

#[derive(Clone)]
pub struct ChatConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_CHAT_API_URL.to_string(),
            model: DEFAULT_CHAT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 1024,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, String> {
        Ok(Self {
            port: try_load("RUST_PORT", "1111")?,
            questions_path: try_load("QUESTIONS_PATH", "data/questions.csv")?,
            chat: ChatConfig {
                api_key: var("GROQ_API_KEY")
                    .ok()
                    .filter(|key| !key.trim().is_empty())
                    .or_else(|| read_secret("GROQ_API_KEY")),
                api_url: try_load("CHAT_API_URL", DEFAULT_CHAT_API_URL)?,
                model: try_load("CHAT_MODEL", DEFAULT_CHAT_MODEL)?,
                temperature: try_load("CHAT_TEMPERATURE", "0.7")?,
                max_tokens: try_load("CHAT_MAX_TOKENS", "1024")?,
            },
        })
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        info!("Environment variable {key} not found");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, String>
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
            format!("Environment misconfigured: {key}")
        })
}

/// Docker secret fallback. Missing secrets are not fatal, the relay reports them per request.
fn read_secret(secret_name: &str) -> Option<String> {
    let path = format!("/run/secrets/{secret_name}");

    read_to_string(&path)
        .map(|s| s.trim().to_string())
        .map_err(|e| {
            warn!("Failed to read {secret_name} from file: {e}");
        })
        .ok()
        .filter(|secret| !secret.is_empty())
}
