//! Server config loader (strict parsing).
//!
//! The config file is optional: without one the server runs on built-in
//! defaults (`0.0.0.0:8080`, 1 KiB socket buffers).

pub mod schema;

use std::fs;
use std::path::Path;

use echodemo_core::error::{EchoError, Result};

pub use schema::{OriginConfig, OriginMode, ServerConfig, ServerSection, WsSection};

pub const DEFAULT_CONFIG_PATH: &str = "echodemo.yaml";

pub fn load_from_file(path: impl AsRef<Path>) -> Result<ServerConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path)
        .map_err(|e| EchoError::Config(format!("read {} failed: {e}", path.display())))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServerConfig> {
    let cfg: ServerConfig = serde_yaml::from_str(s)
        .map_err(|e| EchoError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// An explicit path must exist; the default path may be absent.
pub fn load(explicit: Option<&str>) -> Result<ServerConfig> {
    match explicit {
        Some(path) => load_from_file(path),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_from_file(DEFAULT_CONFIG_PATH),
        None => {
            tracing::info!(path = DEFAULT_CONFIG_PATH, "no config file, using defaults");
            Ok(ServerConfig::default())
        }
    }
}
