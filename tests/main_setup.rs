use cafe_site::{AppConfig, config::Env};
use serial_test::serial;
use std::{env, panic, time::Duration};

// --- Setup/Teardown Utilities ---

const CONFIG_VARS: [&str; 11] = [
    "APP_ENV",
    "BIND_ADDR",
    "JWT_SECRET",
    "SESSION_TTL_SECS",
    "ADMIN_EMAIL",
    "ADMIN_PASSWORD",
    "AUTH_BACKEND_URL",
    "SUBMIT_DELAY_MS",
    "AUTOPLAY_INTERVAL_MS",
    "INQUIRY_CAPACITY",
    "RUST_LOG",
];

/// Runs `test` with a clean configuration environment and restores the
/// original variables afterwards, even if the test panics.
fn run_with_env<T, R>(test: T) -> R
where
    T: FnOnce() -> R + panic::UnwindSafe,
{
    let originals: Vec<(&str, Option<String>)> = CONFIG_VARS
        .iter()
        .map(|&var| (var, env::var(var).ok()))
        .collect();

    unsafe {
        for var in CONFIG_VARS {
            env::remove_var(var);
        }
    }

    let result = panic::catch_unwind(test);

    for (key, original_value) in originals.into_iter().rev() {
        unsafe {
            match original_value {
                Some(val) => env::set_var(key, val),
                None => env::remove_var(key),
            }
        }
    }

    match result {
        Ok(value) => value,
        Err(e) => panic::resume_unwind(e),
    }
}

// --- Tests ---

#[test]
#[serial]
fn test_app_config_production_fail_fast_without_jwt_secret() {
    let result = run_with_env(|| {
        panic::catch_unwind(|| {
            unsafe {
                env::set_var("APP_ENV", "production");
                env::set_var("ADMIN_EMAIL", "owner@cafe.test");
                env::set_var("ADMIN_PASSWORD", "correct horse");
            }
            AppConfig::load()
        })
    });

    assert!(
        result.is_err(),
        "Production config loading should panic when JWT_SECRET is missing"
    );
}

#[test]
#[serial]
fn test_app_config_production_fail_fast_without_admin_credentials() {
    let result = run_with_env(|| {
        panic::catch_unwind(|| {
            unsafe {
                env::set_var("APP_ENV", "production");
                env::set_var("JWT_SECRET", "prod-secret");
            }
            AppConfig::load()
        })
    });

    assert!(
        result.is_err(),
        "Production config loading should panic on missing admin credentials"
    );
}

#[test]
#[serial]
fn test_app_config_local_env_defaults() {
    let config = run_with_env(|| {
        unsafe {
            env::set_var("APP_ENV", "local");
        }
        AppConfig::load()
    });

    assert_eq!(config.env, Env::Local);
    assert_eq!(config.bind_addr, "0.0.0.0:3000");
    assert_eq!(config.admin_email, "admin@deglobecafe.com");
    assert_eq!(config.admin_password, "admin123");
    assert_eq!(config.auth_backend_url, None);
    assert_eq!(config.submit_delay, Duration::from_millis(2000));
    assert_eq!(config.autoplay_interval, Duration::from_millis(5000));
    assert_eq!(config.session_ttl, Duration::from_secs(86_400));
    assert_eq!(config.inquiry_capacity, 1000);
}

#[test]
#[serial]
fn test_app_config_reads_overrides() {
    let config = run_with_env(|| {
        unsafe {
            env::set_var("APP_ENV", "production");
            env::set_var("JWT_SECRET", "prod-secret");
            env::set_var("ADMIN_EMAIL", "owner@cafe.test");
            env::set_var("ADMIN_PASSWORD", "correct horse");
            env::set_var("BIND_ADDR", "127.0.0.1:8080");
            env::set_var("AUTH_BACKEND_URL", "http://auth.internal/api");
            env::set_var("SUBMIT_DELAY_MS", "0");
            env::set_var("AUTOPLAY_INTERVAL_MS", "750");
            env::set_var("INQUIRY_CAPACITY", "25");
        }
        AppConfig::load()
    });

    assert_eq!(config.env, Env::Production);
    assert_eq!(config.jwt_secret, "prod-secret");
    assert_eq!(config.admin_email, "owner@cafe.test");
    assert_eq!(config.bind_addr, "127.0.0.1:8080");
    assert_eq!(
        config.auth_backend_url.as_deref(),
        Some("http://auth.internal/api")
    );
    assert_eq!(config.submit_delay, Duration::ZERO);
    assert_eq!(config.autoplay_interval, Duration::from_millis(750));
    assert_eq!(config.inquiry_capacity, 25);
}

#[test]
#[serial]
fn test_app_config_malformed_number_falls_back_to_default() {
    let config = run_with_env(|| {
        unsafe {
            env::set_var("SUBMIT_DELAY_MS", "soon");
            env::set_var("SESSION_TTL_SECS", "-5");
        }
        AppConfig::load()
    });

    assert_eq!(config.submit_delay, Duration::from_millis(2000));
    assert_eq!(config.session_ttl, Duration::from_secs(86_400));
}

#[test]
#[serial]
fn test_app_config_blank_auth_backend_is_ignored() {
    let config = run_with_env(|| {
        unsafe {
            env::set_var("AUTH_BACKEND_URL", "   ");
        }
        AppConfig::load()
    });

    assert_eq!(config.auth_backend_url, None);
}
