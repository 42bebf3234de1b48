use innosistemas_web::{
    AppConfig,
    config::{ConfigError, Env},
};
use serial_test::serial;
use std::{env, net::SocketAddr, panic, path::PathBuf};

const VARS: &[&str] = &["APP_ENV", "BIND_ADDR", "ASSETS_DIR"];

// --- Setup/Teardown Utilities ---

/// Runs `test` with the given variables set (None removes them) and restores the
/// previous environment afterwards.
fn run_with_env<T, R>(vars: &[(&'static str, Option<&str>)], test: T) -> R
where
    T: FnOnce() -> R + panic::UnwindSafe,
{
    let originals: Vec<(&str, Option<String>)> =
        VARS.iter().map(|&var| (var, env::var(var).ok())).collect();

    unsafe {
        for var in VARS {
            env::remove_var(var);
        }
        for (key, value) in vars {
            if let Some(value) = value {
                env::set_var(key, value);
            }
        }
    }

    let result = panic::catch_unwind(test);

    for (key, original_value) in originals.into_iter().rev() {
        unsafe {
            if let Some(val) = original_value {
                env::set_var(key, val);
            } else {
                env::remove_var(key);
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
fn test_app_config_local_env_defaults() {
    let config = run_with_env(&[("APP_ENV", Some("local"))], AppConfig::load).unwrap();

    assert_eq!(config.env, Env::Local);
    assert_eq!(config.bind_addr, "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
    assert_eq!(config.assets_dir, PathBuf::from("public"));
}

#[test]
#[serial]
fn test_app_config_unknown_env_is_local() {
    let config = run_with_env(&[("APP_ENV", Some("staging"))], AppConfig::load).unwrap();
    assert_eq!(config.env, Env::Local);
}

#[test]
#[serial]
fn test_app_config_production_requires_assets_dir() {
    let result = run_with_env(&[("APP_ENV", Some("production"))], AppConfig::load);
    assert_eq!(result.unwrap_err(), ConfigError::Missing("ASSETS_DIR"));
}

#[test]
#[serial]
fn test_app_config_production_values() {
    let config = run_with_env(
        &[
            ("APP_ENV", Some("production")),
            ("ASSETS_DIR", Some("/srv/innosistemas/public")),
            ("BIND_ADDR", Some("127.0.0.1:8080")),
        ],
        AppConfig::load,
    )
    .unwrap();

    assert_eq!(config.env, Env::Production);
    assert_eq!(config.bind_addr, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
    assert_eq!(config.assets_dir, PathBuf::from("/srv/innosistemas/public"));
}

#[test]
#[serial]
fn test_app_config_rejects_bad_bind_addr() {
    let result = run_with_env(&[("BIND_ADDR", Some("not-an-address"))], AppConfig::load);
    assert_eq!(
        result.unwrap_err(),
        ConfigError::Invalid {
            var: "BIND_ADDR",
            value: "not-an-address".to_string()
        }
    );
}
