//! Session cookie configuration parsing and validation.
//!
//! The cart identity lives in a private cookie keyed from `SESSION_SECRET`.
//! Production deployments must supply the secret; development falls back to
//! a per-process key so carts simply reset on restart.

use actix_web::cookie::Key;
use mockable::Env;
use tracing::warn;
use zeroize::Zeroize;

pub(crate) const SESSION_SECRET_ENV: &str = "SESSION_SECRET";
pub(crate) const NODE_ENV: &str = "NODE_ENV";
/// `Key::derive_from` needs at least this much key material.
pub const SESSION_SECRET_MIN_LEN: usize = 32;

/// Deployment mode selected by `NODE_ENV`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RuntimeMode {
    /// Anything other than `production`.
    #[default]
    Development,
    /// Secure cookies, mandatory secret, static bundle served.
    Production,
}

impl RuntimeMode {
    /// Interpret a `NODE_ENV` value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use backend::inbound::http::session_config::RuntimeMode;
    ///
    /// assert_eq!(RuntimeMode::from_node_env(Some("production")), RuntimeMode::Production);
    /// assert_eq!(RuntimeMode::from_node_env(Some("test")), RuntimeMode::Development);
    /// assert_eq!(RuntimeMode::from_node_env(None), RuntimeMode::Development);
    /// ```
    #[must_use]
    pub fn from_node_env(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(mode) if mode.eq_ignore_ascii_case("production") => Self::Production,
            _ => Self::Development,
        }
    }

    /// Read the mode from `NODE_ENV`.
    pub fn from_env<E: Env>(env: &E) -> Self {
        Self::from_node_env(env.string(NODE_ENV).as_deref())
    }

    #[must_use]
    pub fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Session settings derived from the environment.
pub struct SessionSettings {
    /// Signing and encryption key for cookie sessions.
    pub key: Key,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SessionConfigError {
    /// Production requires an explicit secret.
    #[error("missing required environment variable: {name}")]
    MissingSecret { name: &'static str },
    /// The secret is too short to derive a cookie key from.
    #[error("{name} too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort {
        name: &'static str,
        length: usize,
        min_len: usize,
    },
}

/// Build session settings from `SESSION_SECRET` for the given mode.
///
/// # Examples
///
/// ```rust
/// use backend::inbound::http::session_config::{RuntimeMode, session_settings_from_env};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string()
///     .returning(|name| (name == "SESSION_SECRET").then(|| "s".repeat(48)));
///
/// let settings = session_settings_from_env(&env, RuntimeMode::Production)
///     .expect("valid secret");
/// assert!(settings.cookie_secure);
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: RuntimeMode,
) -> Result<SessionSettings, SessionConfigError> {
    Ok(SessionSettings {
        key: session_key_from_env(env, mode)?,
        cookie_secure: mode.is_production(),
    })
}

fn session_key_from_env<E: Env>(env: &E, mode: RuntimeMode) -> Result<Key, SessionConfigError> {
    let Some(secret) = env.string(SESSION_SECRET_ENV).filter(|s| !s.is_empty()) else {
        if mode.is_production() {
            return Err(SessionConfigError::MissingSecret {
                name: SESSION_SECRET_ENV,
            });
        }
        warn!("SESSION_SECRET not set; using temporary session key (dev only)");
        return Ok(Key::generate());
    };

    let mut bytes = secret.into_bytes();
    let length = bytes.len();
    if length < SESSION_SECRET_MIN_LEN {
        bytes.zeroize();
        if mode.is_production() {
            return Err(SessionConfigError::SecretTooShort {
                name: SESSION_SECRET_ENV,
                length,
                min_len: SESSION_SECRET_MIN_LEN,
            });
        }
        warn!(
            length,
            min_len = SESSION_SECRET_MIN_LEN,
            "SESSION_SECRET too short; using temporary session key (dev only)"
        );
        return Ok(Key::generate());
    }
    let key = Key::derive_from(&bytes);
    bytes.zeroize();
    Ok(key)
}
