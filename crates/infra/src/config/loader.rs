//! Configuration loader
//!
//! Loads the session configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `EDGE_ORG`: Organization name (required)
//! - `EDGE_ENDPOINT`: Management API base URL
//! - `EDGE_AUTH`: `basic`, `digest`, `bearer` or `password_grant` (default `basic`)
//! - `EDGE_USERNAME` / `EDGE_PASSWORD`: Account credentials
//! - `EDGE_TOKEN`: Static bearer token
//! - `EDGE_CLIENT_ID` / `EDGE_CLIENT_SECRET`: Password-grant client
//! - `EDGE_TOKEN_URL`: Password-grant token endpoint
//! - `EDGE_TIMEOUT`: Request timeout in seconds
//! - `EDGE_PROXY`: Proxy URL
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./edgemgmt.{json,toml}` then `./config.{json,toml}`
//! 2. The same names in the parent and grandparent directories
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};

use edgemgmt_domain::{AuthMode, EdgeConfig, EdgeError, HttpOptions, PasswordGrantConfig, Result};

use crate::errors::InfraError;

const CONFIG_FILE_NAMES: [&str; 4] =
    ["edgemgmt.json", "edgemgmt.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `EdgeError::Config` if configuration cannot be loaded from either
/// source, the file format is invalid, or required fields are missing.
pub fn load() -> Result<EdgeConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!(organization = %config.organization, "Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `EdgeError::Config` if required variables are missing or have
/// invalid values.
pub fn load_from_env() -> Result<EdgeConfig> {
    let organization = env_var("EDGE_ORG")?;
    let auth = auth_from_env()?;

    let mut http = HttpOptions::default();
    if let Some(timeout) = env_opt("EDGE_TIMEOUT") {
        http.timeout_secs = timeout
            .parse::<u64>()
            .map_err(|e| EdgeError::Config(format!("Invalid timeout: {e}")))?;
    }
    http.proxy = env_opt("EDGE_PROXY");

    let mut config = EdgeConfig::new(organization, auth).with_http(http);
    if let Some(endpoint) = env_opt("EDGE_ENDPOINT") {
        config = config.with_endpoint(endpoint);
    }

    config.validate()?;
    Ok(config)
}

fn auth_from_env() -> Result<AuthMode> {
    let mode = env_opt("EDGE_AUTH").unwrap_or_else(|| "basic".to_string());

    match mode.to_ascii_lowercase().as_str() {
        "basic" => Ok(AuthMode::Basic {
            username: env_var("EDGE_USERNAME")?,
            password: env_var("EDGE_PASSWORD")?,
        }),
        "digest" => Ok(AuthMode::Digest {
            username: env_var("EDGE_USERNAME")?,
            password: env_var("EDGE_PASSWORD")?,
        }),
        "bearer" => Ok(AuthMode::Bearer { token: env_var("EDGE_TOKEN")? }),
        "password_grant" | "oauth" => {
            let mut grant = PasswordGrantConfig::new(env_var("EDGE_USERNAME")?, env_var("EDGE_PASSWORD")?);
            if let Some(token_url) = env_opt("EDGE_TOKEN_URL") {
                grant = grant.with_token_url(token_url);
            }
            if let (Some(id), Some(secret)) = (env_opt("EDGE_CLIENT_ID"), env_opt("EDGE_CLIENT_SECRET")) {
                grant = grant.with_client(id, secret);
            }
            Ok(AuthMode::PasswordGrant(grant))
        }
        other => Err(EdgeError::Config(format!("Unsupported EDGE_AUTH mode: {other}"))),
    }
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `EdgeError::Config` if the file is missing, no config file is
/// found, the format is invalid, or required fields are missing.
pub fn load_from_file(path: Option<PathBuf>) -> Result<EdgeConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(EdgeError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            EdgeError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| EdgeError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

fn parse_config(contents: &str, path: &Path) -> Result<EdgeConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents).map_err(|e| InfraError::from(e).into()),
        "json" => serde_json::from_str(contents)
            .map_err(|e| EdgeError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(EdgeError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.extend([exe_dir.to_path_buf(), exe_dir.join(".."), exe_dir.join("../..")]);
        }
    }

    roots
        .iter()
        .flat_map(|root| CONFIG_FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    env_opt(key)
        .ok_or_else(|| EdgeError::Config(format!("Missing required environment variable: {key}")))
}

/// Optional environment variable; blank values count as unset.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}
