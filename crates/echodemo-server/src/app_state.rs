//! Shared application state for the echodemo server.
//!
//! Holds only immutable configuration, the origin policy, metrics counters and
//! the session id generator. Echo sessions never read any of it back, so there
//! is no mutable state shared between connections.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use echodemo_core::error::Result;

use crate::config::ServerConfig;
use crate::obs::ServerMetrics;
use crate::transport::origin::OriginPolicy;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    metrics: Arc<ServerMetrics>,
}

struct AppStateInner {
    cfg: ServerConfig,
    origin: OriginPolicy,
    next_session_id: AtomicU64,
}

impl AppState {
    /// Build state from a validated config; the origin policy comes from `ws.origin`.
    pub fn new(cfg: ServerConfig) -> Result<Self> {
        cfg.validate()?;
        let origin = cfg.ws.origin.to_policy();
        Ok(Self::with_origin_policy(cfg, origin))
    }

    /// Same as `new` but with a caller-supplied origin policy.
    pub fn with_origin_policy(cfg: ServerConfig, origin: OriginPolicy) -> Self {
        tracing::debug!(policy = ?origin, "websocket origin policy");
        if matches!(origin, OriginPolicy::Any) {
            tracing::warn!("websocket upgrades accepted from any origin (demo mode)");
        }
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                origin,
                next_session_id: AtomicU64::new(1),
            }),
            metrics: Arc::new(ServerMetrics::default()),
        }
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn origin_policy(&self) -> &OriginPolicy {
        &self.inner.origin
    }

    pub fn next_session_id(&self) -> u64 {
        self.inner.next_session_id.fetch_add(1, Ordering::Relaxed)
    }

    pub fn metrics(&self) -> &ServerMetrics {
        &self.metrics
    }

    pub fn metrics_handle(&self) -> Arc<ServerMetrics> {
        Arc::clone(&self.metrics)
    }
}
