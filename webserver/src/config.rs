//! Environment-based runtime configuration

use std::fmt::Debug;
use std::str::FromStr;

use crate::error::{WebServerError, WebServerResult};

pub const DEFAULT_GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash-lite:generateContent";
pub const DEFAULT_GOTENBERG_API_URL: &str = "http://localhost:5001/forms/chromium/convert/html";

/// Runtime settings read from the environment.
///
/// Every field has a working default so the server starts without any
/// configuration. A `.env` file is honored when present (loaded in `main`).
#[derive(Clone, Debug)]
pub struct Settings {
    pub app_host: String,
    pub app_port: u16,
    pub log_level: String,
    pub data_dir: String,
    pub gemini_api_url: String,
    pub gemini_api_key: String,
    pub request_retry_count: u32,
    pub gotenberg_api_url: String,
    pub gotenberg_auth_username: String,
    pub gotenberg_auth_password: String,
}

impl Settings {
    pub fn from_env() -> WebServerResult<Self> {
        Ok(Self {
            app_host: env_or("APP_HOST", "0.0.0.0"),
            app_port: env_parse("APP_PORT", 7777)?,
            log_level: env_or("LOG_LEVEL", "debug"),
            data_dir: env_or("PROJECTS_DIR", "project_data"),
            gemini_api_url: env_or("GEMINI_API_URL", DEFAULT_GEMINI_API_URL),
            gemini_api_key: env_or("GEMINI_API_KEY", "your_api_key_here"),
            request_retry_count: env_parse("REQUEST_RETRY_COUNT", 5)?,
            gotenberg_api_url: env_or("GOTENBERG_API_URL", DEFAULT_GOTENBERG_API_URL),
            gotenberg_auth_username: env_or("GOTENBERG_AUTH_USERNAME", "gotenberg"),
            gotenberg_auth_password: env_or("GOTENBERG_AUTH_PASSWORD", "gotenberg"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T>(key: &str, default: T) -> WebServerResult<T>
where
    T: FromStr,
    T::Err: Debug,
{
    match std::env::var(key) {
        Ok(value) => value
            .parse()
            .map_err(|e| WebServerError::Config(format!("Invalid {key} value {value:?}: {e:?}"))),
        Err(_) => Ok(default),
    }
}
