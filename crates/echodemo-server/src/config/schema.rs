use std::net::SocketAddr;

use echodemo_core::error::{EchoError, Result};
use serde::Deserialize;

use crate::transport::origin::OriginPolicy;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub ws: WsSection,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            ws: WsSection::default(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(EchoError::Config(format!(
                "unsupported config version {}",
                self.version
            )));
        }
        self.server.validate()?;
        self.ws.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            EchoError::Config(format!("server.listen must be a socket address: {e}"))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}

pub const MIN_BUFFER_SIZE: usize = 128;
pub const MAX_BUFFER_SIZE: usize = 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WsSection {
    #[serde(default = "default_buffer_size")]
    pub read_buffer_size: usize,

    #[serde(default = "default_buffer_size")]
    pub write_buffer_size: usize,

    #[serde(default)]
    pub origin: OriginConfig,
}

impl Default for WsSection {
    fn default() -> Self {
        Self {
            read_buffer_size: default_buffer_size(),
            write_buffer_size: default_buffer_size(),
            origin: OriginConfig::default(),
        }
    }
}

impl WsSection {
    pub fn validate(&self) -> Result<()> {
        for (name, v) in [
            ("ws.read_buffer_size", self.read_buffer_size),
            ("ws.write_buffer_size", self.write_buffer_size),
        ] {
            if !(MIN_BUFFER_SIZE..=MAX_BUFFER_SIZE).contains(&v) {
                return Err(EchoError::Config(format!(
                    "{name} must be between {MIN_BUFFER_SIZE} and {MAX_BUFFER_SIZE}"
                )));
            }
        }
        self.origin.validate()
    }
}

fn default_buffer_size() -> usize {
    1024
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginMode {
    /// Accept every origin. Demo only.
    Any,
    SameHost,
    AllowList,
}

impl Default for OriginMode {
    fn default() -> Self {
        if cfg!(feature = "demo") {
            OriginMode::Any
        } else {
            OriginMode::SameHost
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OriginConfig {
    #[serde(default)]
    pub mode: OriginMode,

    #[serde(default)]
    pub allowed: Vec<String>,
}

impl OriginConfig {
    pub fn validate(&self) -> Result<()> {
        if self.mode == OriginMode::AllowList && self.allowed.is_empty() {
            return Err(EchoError::Config(
                "ws.origin.allowed must not be empty when mode is allow_list".into(),
            ));
        }
        Ok(())
    }

    pub fn to_policy(&self) -> OriginPolicy {
        match self.mode {
            OriginMode::Any => OriginPolicy::Any,
            OriginMode::SameHost => OriginPolicy::SameHost,
            OriginMode::AllowList => OriginPolicy::AllowList(self.allowed.clone()),
        }
    }
}
