//! Server Configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, bail};
use auth::AuthConfig;
use axum::http::HeaderValue;
use platform::crypto::decode_secret;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// `None` selects the in-memory store
    pub database_url: Option<String>,
    /// Origins allowed to make credentialed cross-origin requests
    pub frontend_origins: Vec<HeaderValue>,
    /// Directory of the rotating JSON log file
    pub log_dir: PathBuf,
    /// `SESSION_SECRET` was absent and a random one was generated
    pub ephemeral_secret: bool,
    pub auth: AuthConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), cfg!(debug_assertions))
    }

    /// Build from an arbitrary variable source
    ///
    /// Release builds (`development == false`) refuse to start without
    /// `SESSION_SECRET` and default to Secure cookies.
    pub fn from_lookup<F>(lookup: F, development: bool) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address such as 0.0.0.0:3000")?;

        let (mut auth, ephemeral_secret) = match var("SESSION_SECRET") {
            Some(secret) => {
                let auth = AuthConfig {
                    session_secret: decode_secret(&secret).context("SESSION_SECRET")?,
                    ..AuthConfig::default()
                };
                (auth, false)
            }
            None if development => (AuthConfig::with_random_secret(), true),
            None => bail!("SESSION_SECRET must be set in production"),
        };

        auth.cookie_secure = match var("COOKIE_SECURE") {
            Some(v) => parse_bool(&v).context("COOKIE_SECURE must be true or false")?,
            None => !development,
        };
        auth.password_pepper = var("PASSWORD_PEPPER").map(String::into_bytes);

        let frontend_origins = match var("FRONTEND_ORIGINS") {
            Some(origins) => parse_origins(&origins)?,
            None => Vec::new(),
        };

        Ok(Self {
            bind_addr,
            database_url: var("DATABASE_URL"),
            frontend_origins,
            log_dir: var("LOG_DIR")
                .unwrap_or_else(|| DEFAULT_LOG_DIR.to_string())
                .into(),
            ephemeral_secret,
            auth,
        })
    }
}

fn parse_origins(origins: &str) -> anyhow::Result<Vec<HeaderValue>> {
    origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            origin
                .parse()
                .with_context(|| format!("FRONTEND_ORIGINS contains an invalid origin: {origin:?}"))
        })
        .collect()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
