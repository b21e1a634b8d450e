use std::{env, fs, path::Path};

use crate::{errors::Error, Result};

/// Process-wide immutable configuration, read once at startup.
///
/// Every field is required unless noted; a missing variable is a fatal
/// startup error, never a runtime one.
#[derive(Clone, Debug)]
pub struct Config {
    // Telegram
    pub telegram_bot_token: String,

    // Downstream StashIt API (full ingest endpoint URL)
    pub stashit_api_url: String,

    // Object storage (S3-compatible)
    pub storage_url: String,
    pub storage_region: String,
    pub storage_access_key: String,
    pub storage_secret_key: String,
    pub storage_bucket: String,
    /// Whether stored objects are publicly readable. Default false.
    pub storage_public: bool,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        Ok(Self {
            telegram_bot_token: required("TELEGRAM_BOT_TOKEN")?,
            stashit_api_url: required("STASHIT_API")?,
            storage_url: required("STORAGE_URL")?,
            storage_region: env_str("STORAGE_REGION")
                .and_then(non_empty)
                .unwrap_or_else(|| "us-east-1".to_string()),
            storage_access_key: required("STORAGE_ACCESS_KEY")?,
            storage_secret_key: required("STORAGE_SECRET_KEY")?,
            storage_bucket: required("STORAGE_BUCKET")?,
            storage_public: env_bool("STORAGE_PUBLIC").unwrap_or(false),
        })
    }
}

fn required(key: &str) -> Result<String> {
    env_str(key)
        .and_then(non_empty)
        .ok_or_else(|| Error::Config(format!("{key} environment variable is required")))
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

fn env_bool(key: &str) -> Option<bool> {
    env_str(key).map(|s| {
        matches!(
            s.trim().to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
