use std::{env, net::SocketAddr, path::PathBuf};

use thiserror::Error;

/// AppConfig
///
/// Holds the application's configuration state. Loaded once at startup and immutable
/// afterwards; handlers and middleware pull it out of `AppState` via `FromRef`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Selects the log format and the strictness of loading.
    pub env: Env,
    // Socket address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    // Root of the built front-end assets (icons/, images/, _next/static/, favicon.ico).
    pub assets_dir: PathBuf,
}

/// Env
///
/// Defines the runtime context: local development or a production deployment.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

/// ConfigError
///
/// Reasons the configuration could not be loaded from the environment.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set in production")]
    Missing(&'static str),
    #[error("invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_ASSETS_DIR: &str = "public";

impl Default for AppConfig {
    /// Non-failing configuration used for test state setup.
    fn default() -> Self {
        Self {
            env: Env::Local,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables and fails fast on anything
    /// the current environment cannot run without.
    ///
    /// * `APP_ENV`: `production` selects [`Env::Production`], anything else is local.
    /// * `BIND_ADDR`: listener address, defaults to `0.0.0.0:3000`.
    /// * `ASSETS_DIR`: static asset root. Optional locally, required in production.
    pub fn load() -> Result<Self, ConfigError> {
        let env = match env::var("APP_ENV").as_deref() {
            Ok("production") => Env::Production,
            _ => Env::Local,
        };

        let raw_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::Invalid {
                var: "BIND_ADDR",
                value: raw_addr.clone(),
            })?;

        let assets_dir = match env {
            // The production image must say where the built bundle lives.
            Env::Production => env::var("ASSETS_DIR").map_err(|_| ConfigError::Missing("ASSETS_DIR"))?,
            Env::Local => env::var("ASSETS_DIR").unwrap_or_else(|_| DEFAULT_ASSETS_DIR.to_string()),
        };

        Ok(Self {
            env,
            bind_addr,
            assets_dir: PathBuf::from(assets_dir),
        })
    }
}
