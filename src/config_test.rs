use std::sync::{Mutex, MutexGuard, PoisonError};

use super::*;

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn env_guard() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// # Safety
/// Callers must hold `env_guard()` so env mutations do not race.
unsafe fn clear_app_env() {
    unsafe {
        std::env::remove_var("PORT");
        std::env::remove_var("DATABASE_URL");
        std::env::remove_var("DB_MAX_CONNECTIONS");
        std::env::remove_var("UPLOADS_DIR");
        std::env::remove_var("UPLOADS_URL");
        std::env::remove_var("PLACEHOLDER_IMAGE");
        std::env::remove_var("MAX_UPLOAD_BYTES");
        std::env::remove_var("CAROUSEL_AUTOPLAY_MS");
        std::env::remove_var("CAROUSEL_LOOP");
    }
}

#[test]
fn from_env_uses_defaults_when_unset() {
    let _guard = env_guard();
    unsafe { clear_app_env() };

    let cfg = AppConfig::from_env().unwrap();
    assert_eq!(cfg, AppConfig::default());
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert!(cfg.database_url.is_none());
    assert_eq!(cfg.max_upload_bytes, 5 * 1024 * 1024);
    assert!(cfg.carousel_loop);
}

#[test]
fn from_env_parses_overrides() {
    let _guard = env_guard();
    unsafe {
        clear_app_env();
        std::env::set_var("PORT", "8080");
        std::env::set_var("DATABASE_URL", "postgres://localhost/studyhall");
        std::env::set_var("UPLOADS_URL", "https://cdn.example.test/uploads/");
        std::env::set_var("CAROUSEL_AUTOPLAY_MS", "0");
        std::env::set_var("CAROUSEL_LOOP", "false");
    }

    let cfg = AppConfig::from_env().unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.database_url.as_deref(), Some("postgres://localhost/studyhall"));
    assert_eq!(cfg.images.uploads_url, "https://cdn.example.test/uploads");
    assert_eq!(cfg.carousel_autoplay_ms, 0);
    assert!(!cfg.carousel_loop);

    unsafe { clear_app_env() };
}

#[test]
fn from_env_treats_blank_database_url_as_absent() {
    let _guard = env_guard();
    unsafe {
        clear_app_env();
        std::env::set_var("DATABASE_URL", "   ");
    }

    let cfg = AppConfig::from_env().unwrap();
    assert!(cfg.database_url.is_none());

    unsafe { clear_app_env() };
}

#[test]
fn from_env_rejects_unparseable_port() {
    let _guard = env_guard();
    unsafe {
        clear_app_env();
        std::env::set_var("PORT", "not-a-port");
    }

    let err = AppConfig::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "PORT", .. }));

    unsafe { clear_app_env() };
}
