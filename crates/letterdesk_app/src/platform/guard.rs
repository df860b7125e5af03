use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{
        header::{HOST, ORIGIN},
        HeaderMap, HeaderName, Method,
    },
    middleware::Next,
    response::Response,
};
use url::Url;

use crate::errors::AppError;

/// Rejects requests addressed to a foreign host name and state-changing
/// requests sent by another origin.
///
/// Browsers attach `Origin` to every cross-site form post and fetch, so a
/// page on another site can neither submit to the webhook nor write to the
/// clipboard through this server. The host allow-list also stops DNS
/// rebinding, where a foreign name resolves to the loopback address.
#[derive(Debug, Clone)]
pub struct HostGuard {
    /// `None` when bound to an unspecified address; any host name is then
    /// accepted and only same-origin is enforced.
    allowed: Option<Vec<String>>,
}

impl HostGuard {
    pub fn for_bind(bind: SocketAddr) -> Self {
        if bind.ip().is_unspecified() {
            return Self { allowed: None };
        }
        let port = bind.port();
        let mut allowed = vec![bind.to_string()];
        if bind.ip().is_loopback() {
            allowed.extend([
                format!("localhost:{port}"),
                format!("127.0.0.1:{port}"),
                format!("[::1]:{port}"),
            ]);
        }
        allowed.sort();
        allowed.dedup();
        Self {
            allowed: Some(allowed),
        }
    }

    fn allows_host(&self, host: &str) -> bool {
        match &self.allowed {
            None => true,
            Some(allowed) => allowed.iter().any(|name| name.eq_ignore_ascii_case(host)),
        }
    }

    pub fn check(&self, method: &Method, headers: &HeaderMap) -> Result<(), AppError> {
        let host = header_text(headers, &HOST);
        if let Some(host) = host {
            if !self.allows_host(host) {
                return Err(AppError::Forbidden(format!("unexpected host '{host}'")));
            }
        }
        if method == Method::GET || method == Method::HEAD {
            return Ok(());
        }
        let Some(origin) = header_text(headers, &ORIGIN) else {
            return Ok(());
        };
        let same_origin = match (origin_authority(origin), host) {
            (Some(authority), Some(host)) => authority.eq_ignore_ascii_case(host),
            _ => false,
        };
        if same_origin {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "cross-origin request from '{origin}'"
            )))
        }
    }
}

pub async fn guard_requests(
    State(guard): State<Arc<HostGuard>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    guard.check(request.method(), request.headers())?;
    Ok(next.run(request).await)
}

fn header_text<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// `host[:port]` of a serialized origin; `None` for opaque origins.
fn origin_authority(origin: &str) -> Option<String> {
    let url = Url::parse(origin).ok()?;
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}
