//! Origin check applied before the WebSocket upgrade.
//!
//! Browsers attach an `Origin` header to WebSocket handshakes; non-browser
//! clients usually do not. `Any` skips the check entirely and exists for the
//! demo. Production deployments should use `SameHost` or `AllowList`.

use std::fmt;
use std::sync::Arc;

use axum::http::{header, HeaderMap};

type OriginPredicate = dyn Fn(&HeaderMap) -> bool + Send + Sync;

#[derive(Clone)]
pub enum OriginPolicy {
    /// Permit every request. Insecure, demo only.
    Any,
    /// Permit requests without `Origin`, or whose `Origin` authority equals `Host`.
    SameHost,
    /// Permit only these exact origins (e.g. `https://app.example.com`).
    AllowList(Vec<String>),
    /// Caller-supplied predicate over the request headers.
    Custom(Arc<OriginPredicate>),
}

impl OriginPolicy {
    pub fn custom(f: impl Fn(&HeaderMap) -> bool + Send + Sync + 'static) -> Self {
        OriginPolicy::Custom(Arc::new(f))
    }

    pub fn permits(&self, headers: &HeaderMap) -> bool {
        let origin = headers
            .get(header::ORIGIN)
            .and_then(|v| v.to_str().ok());

        match self {
            OriginPolicy::Any => true,
            OriginPolicy::SameHost => {
                let Some(origin) = origin else {
                    // No header at all: not a browser cross-site request.
                    return !headers.contains_key(header::ORIGIN);
                };
                let host = headers.get(header::HOST).and_then(|v| v.to_str().ok());
                match (origin_authority(origin), host) {
                    (Some(a), Some(h)) => a.eq_ignore_ascii_case(h),
                    _ => false,
                }
            }
            OriginPolicy::AllowList(allowed) => match origin {
                Some(o) => allowed.iter().any(|a| a.eq_ignore_ascii_case(o)),
                None => false,
            },
            OriginPolicy::Custom(f) => f(headers),
        }
    }
}

impl fmt::Debug for OriginPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OriginPolicy::Any => f.write_str("Any"),
            OriginPolicy::SameHost => f.write_str("SameHost"),
            OriginPolicy::AllowList(a) => f.debug_tuple("AllowList").field(a).finish(),
            OriginPolicy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// `scheme://authority[/path]` -> `authority`.
fn origin_authority(origin: &str) -> Option<&str> {
    let (_scheme, rest) = origin.split_once("://")?;
    let authority = rest.split('/').next().unwrap_or(rest);
    if authority.is_empty() {
        None
    } else {
        Some(authority)
    }
}
