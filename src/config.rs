use std::{env, time::Duration};

use crate::repository::DEFAULT_INQUIRY_CAPACITY;

/// AppConfig
///
/// Holds the service's entire configuration state. Loaded once at startup and
/// shared immutably through the `AppState` via `FromRef`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Controls log format and which secrets are mandatory.
    pub env: Env,
    // Address the HTTP listener binds to.
    pub bind_addr: String,
    // HMAC secret used to sign and validate session tokens.
    pub jwt_secret: String,
    // Lifetime of an issued session token.
    pub session_ttl: Duration,
    // The single credential pair accepted by the static verifier.
    pub admin_email: String,
    pub admin_password: String,
    // When set, credentials are checked against `{url}/auth/login` instead of the static pair.
    pub auth_backend_url: Option<String>,
    // Artificial pause before a contact submission is recorded.
    pub submit_delay: Duration,
    // Period of the home page carousel autoplay.
    pub autoplay_interval: Duration,
    // Most contact inquiries held in memory before the oldest are evicted.
    pub inquiry_capacity: usize,
}

/// Env
///
/// Runtime context. `Local` enables demo credentials and pretty logs;
/// `Production` demands explicit secrets and emits JSON logs.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@deglobecafe.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
const LOCAL_JWT_SECRET: &str = "local-dev-secret-do-not-deploy";

impl Default for AppConfig {
    /// Non-panicking configuration for tests. The submission delay is zero so
    /// contact tests don't sleep.
    fn default() -> Self {
        Self {
            env: Env::Local,
            bind_addr: "127.0.0.1:0".to_string(),
            jwt_secret: LOCAL_JWT_SECRET.to_string(),
            session_ttl: Duration::from_secs(60 * 60),
            admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            auth_backend_url: None,
            submit_delay: Duration::ZERO,
            autoplay_interval: Duration::from_millis(5000),
            inquiry_capacity: DEFAULT_INQUIRY_CAPACITY,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads every parameter from the environment and fails fast.
    ///
    /// # Panics
    /// Panics in `Production` when `JWT_SECRET`, `ADMIN_EMAIL` or
    /// `ADMIN_PASSWORD` is missing, so the service never starts with the demo
    /// credentials exposed.
    pub fn load() -> Self {
        let env = match env::var("APP_ENV").as_deref() {
            Ok("production") => Env::Production,
            _ => Env::Local,
        };

        let (jwt_secret, admin_email, admin_password) = match env {
            Env::Production => (
                env::var("JWT_SECRET").expect("FATAL: JWT_SECRET must be set in production."),
                env::var("ADMIN_EMAIL").expect("FATAL: ADMIN_EMAIL must be set in production."),
                env::var("ADMIN_PASSWORD")
                    .expect("FATAL: ADMIN_PASSWORD must be set in production."),
            ),
            Env::Local => (
                env::var("JWT_SECRET").unwrap_or_else(|_| LOCAL_JWT_SECRET.to_string()),
                env::var("ADMIN_EMAIL").unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_string()),
                env::var("ADMIN_PASSWORD").unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_string()),
            ),
        };

        Self {
            env,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            jwt_secret,
            session_ttl: Duration::from_secs(read_u64("SESSION_TTL_SECS", 86_400)),
            admin_email,
            admin_password,
            auth_backend_url: env::var("AUTH_BACKEND_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            submit_delay: Duration::from_millis(read_u64("SUBMIT_DELAY_MS", 2000)),
            autoplay_interval: Duration::from_millis(read_u64("AUTOPLAY_INTERVAL_MS", 5000)),
            inquiry_capacity: read_u64("INQUIRY_CAPACITY", DEFAULT_INQUIRY_CAPACITY as u64)
                .try_into()
                .unwrap_or(usize::MAX),
        }
    }
}

/// Parses a numeric variable, falling back to `default` when it is absent or malformed.
fn read_u64(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "ignoring malformed numeric setting");
            default
        }),
        Err(_) => default,
    }
}
