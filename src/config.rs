//! Application configuration parsed from environment variables.
//!
//! SYSTEM CONTEXT
//! ==============
//! `main` loads `.env` (if present) and then builds one `AppConfig`, which is
//! shared read-only through `AppState`. Unset variables fall back to defaults;
//! a set-but-unparseable variable is a startup error rather than a silent
//! default.

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_UPLOADS_DIR: &str = "uploads";
pub const DEFAULT_UPLOADS_URL: &str = "/uploads";
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "/images/placeholder.png";
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;
pub const DEFAULT_CAROUSEL_AUTOPLAY_MS: u64 = 5000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// How uploaded image references are turned into display URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrls {
    /// URL prefix under which uploaded files are served.
    pub uploads_url: String,
    /// Image shown for absent or empty references.
    pub placeholder: String,
}

impl Default for ImageUrls {
    fn default() -> Self {
        Self { uploads_url: DEFAULT_UPLOADS_URL.to_owned(), placeholder: DEFAULT_PLACEHOLDER_IMAGE.to_owned() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub uploads_dir: PathBuf,
    pub images: ImageUrls,
    pub max_upload_bytes: u64,
    /// Home carousel autoplay delay; `0` disables autoplay.
    pub carousel_autoplay_ms: u64,
    pub carousel_loop: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: None,
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            uploads_dir: PathBuf::from(DEFAULT_UPLOADS_DIR),
            images: ImageUrls::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            carousel_autoplay_ms: DEFAULT_CAROUSEL_AUTOPLAY_MS,
            carousel_loop: true,
        }
    }
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `DATABASE_URL`: in-memory storage when absent
    /// - `DB_MAX_CONNECTIONS`: default 5
    /// - `UPLOADS_DIR`: default `uploads`
    /// - `UPLOADS_URL`: default `/uploads`
    /// - `PLACEHOLDER_IMAGE`: default `/images/placeholder.png`
    /// - `MAX_UPLOAD_BYTES`: default 5 MiB
    /// - `CAROUSEL_AUTOPLAY_MS`: default 5000, `0` disables
    /// - `CAROUSEL_LOOP`: default `true`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a variable is set but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let database_url = std::env::var("DATABASE_URL").ok().filter(|v| !v.trim().is_empty());
        let uploads_url = std::env::var("UPLOADS_URL")
            .map(|v| v.trim_end_matches('/').to_owned())
            .unwrap_or(defaults.images.uploads_url);
        let placeholder = std::env::var("PLACEHOLDER_IMAGE").unwrap_or(defaults.images.placeholder);

        Ok(Self {
            port: env_parse("PORT", defaults.port)?,
            database_url,
            db_max_connections: env_parse("DB_MAX_CONNECTIONS", defaults.db_max_connections)?,
            uploads_dir: std::env::var("UPLOADS_DIR").map_or(defaults.uploads_dir, PathBuf::from),
            images: ImageUrls { uploads_url, placeholder },
            max_upload_bytes: env_parse("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            carousel_autoplay_ms: env_parse("CAROUSEL_AUTOPLAY_MS", defaults.carousel_autoplay_ms)?,
            carousel_loop: env_parse("CAROUSEL_LOOP", defaults.carousel_loop)?,
        })
    }
}

fn env_parse<T>(var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match std::env::var(var) {
        Ok(raw) => raw.trim().parse::<T>().map_err(|_| ConfigError::Invalid { var, value: raw }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
