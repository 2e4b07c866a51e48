use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use url::Url;

use crate::utils::generation_mode::{DEFAULT_DELAY, DEFAULT_TIMEOUT, GenerationMode};
use crate::utils::request_builder::DEFAULT_API_BASE;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_BIND_ADDR: &str = "127.0.0.1";
const DEFAULT_HISTORY_PATH: &str = "qr_history.json";
const DEFAULT_HISTORY_LIMIT: usize = 50;
const DEFAULT_CORS_ORIGINS: &[&str] = &["http://localhost:5173", "http://localhost:4173"];

/// Where the history collection is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryStorage {
    File(PathBuf),
    Memory, // lost when the process exits
}

/// Runtime settings, read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub bind_addr: String,
    pub history_storage: HistoryStorage,
    pub history_limit: Option<usize>, // None keeps every entry
    pub api_base: Url,
    pub generation_mode: GenerationMode,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup; unset keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(v) => v.trim().parse::<u16>().context("PORT is not a valid port")?,
            None => DEFAULT_PORT,
        };

        let api_base = get("QR_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let api_base = Url::parse(&api_base).context("QR_API_BASE is not a valid URL")?;

        let history_limit = match get("HISTORY_LIMIT") {
            Some(v) => match v.trim().parse::<usize>().context("HISTORY_LIMIT is not a number")? {
                0 => None,
                n => Some(n),
            },
            None => Some(DEFAULT_HISTORY_LIMIT),
        };

        let millis = |key: &str, default: Duration| -> Result<Duration> {
            match get(key) {
                Some(v) => {
                    let ms = v
                        .trim()
                        .parse::<u64>()
                        .with_context(|| format!("{} is not a number of milliseconds", key))?;
                    Ok(Duration::from_millis(ms))
                }
                None => Ok(default),
            }
        };

        let generation_mode = match get("GENERATION_MODE").as_deref().map(str::trim) {
            None | Some("simulated") => GenerationMode::Simulated {
                delay: millis("GENERATION_DELAY_MS", DEFAULT_DELAY)?,
            },
            Some("remote") => GenerationMode::Remote {
                timeout: millis("GENERATION_TIMEOUT_MS", DEFAULT_TIMEOUT)?,
            },
            Some(other) => bail!(
                "GENERATION_MODE must be \"simulated\" or \"remote\", got \"{}\"",
                other
            ),
        };

        let history_storage = match get("HISTORY_STORAGE").as_deref().map(str::trim) {
            None | Some("file") => HistoryStorage::File(
                get("HISTORY_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_HISTORY_PATH)),
            ),
            Some("memory") => HistoryStorage::Memory,
            Some(other) => bail!(
                "HISTORY_STORAGE must be \"file\" or \"memory\", got \"{}\"",
                other
            ),
        };

        let cors_origins = match get("CORS_ORIGINS") {
            Some(v) => v
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect(),
            None => DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };

        Ok(Self {
            port,
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            history_storage,
            history_limit,
            api_base,
            generation_mode,
            cors_origins,
        })
    }
}
