//! Process settings read from the environment.
//!
//! Everything the binary needs before it can serve a request: where to bind,
//! how to reach PostgreSQL, which session key to use and whether to serve the
//! prebuilt front-end bundle.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use mockable::Env;

use crate::inbound::http::session_config::{
    RuntimeMode, SessionConfigError, SessionSettings, session_settings_from_env,
};

const DATABASE_URL_ENV: &str = "DATABASE_URL";
const DATABASE_POOL_SIZE_ENV: &str = "DATABASE_POOL_SIZE";
const HOST_ENV: &str = "HOST";
const PORT_ENV: &str = "PORT";
const STATIC_DIR_ENV: &str = "STATIC_DIR";

const DEFAULT_HOST: IpAddr = IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_STATIC_DIR: &str = "dist/public";

/// Errors raised while reading settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error(transparent)]
    Session(#[from] SessionConfigError),
}

/// Validated process settings.
pub struct Settings {
    pub database_url: String,
    pub pool_size: u32,
    pub bind_addr: SocketAddr,
    pub mode: RuntimeMode,
    /// Front-end bundle served in production.
    pub static_dir: PathBuf,
    pub session: SessionSettings,
}

impl Settings {
    /// Read and validate every setting.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use backend::settings::Settings;
    /// use mockable::MockEnv;
    ///
    /// let mut env = MockEnv::new();
    /// env.expect_string().returning(|name| match name {
    ///     "DATABASE_URL" => Some("postgres://localhost/golf_carts".to_owned()),
    ///     "PORT" => Some("8080".to_owned()),
    ///     _ => None,
    /// });
    ///
    /// let settings = Settings::from_env(&env).expect("valid settings");
    /// assert_eq!(settings.bind_addr.port(), 8080);
    /// assert!(!settings.mode.is_production());
    /// ```
    pub fn from_env<E: Env>(env: &E) -> Result<Self, ConfigError> {
        let mode = RuntimeMode::from_env(env);
        let database_url = env
            .string(DATABASE_URL_ENV)
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingEnv {
                name: DATABASE_URL_ENV,
            })?;
        let host = parse_or(env, HOST_ENV, DEFAULT_HOST, "an IP address")?;
        let port = parse_or(env, PORT_ENV, DEFAULT_PORT, "a port number")?;
        let pool_size = parse_or(
            env,
            DATABASE_POOL_SIZE_ENV,
            DEFAULT_POOL_SIZE,
            "a positive integer",
        )?;
        if pool_size == 0 {
            return Err(ConfigError::InvalidEnv {
                name: DATABASE_POOL_SIZE_ENV,
                value: pool_size.to_string(),
                expected: "a positive integer",
            });
        }
        let static_dir = env
            .string(STATIC_DIR_ENV)
            .filter(|dir| !dir.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR), PathBuf::from);

        Ok(Self {
            database_url,
            pool_size,
            bind_addr: SocketAddr::new(host, port),
            mode,
            static_dir,
            session: session_settings_from_env(env, mode)?,
        })
    }
}

fn parse_or<E, T>(
    env: &E,
    name: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError>
where
    E: Env,
    T: std::str::FromStr,
{
    match env.string(name) {
        None => Ok(default),
        Some(value) if value.trim().is_empty() => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidEnv {
                name,
                value,
                expected,
            }),
    }
}
