//! Cross-origin admission gate.
//!
//! Runs in front of every route. A request whose `Origin` exactly matches an
//! allowlisted entry gets the credentialed CORS header set; anything else gets
//! no CORS headers at all but is still served, so same-origin and non-browser
//! callers are unaffected. `OPTIONS` never reaches a handler: it is answered
//! with `204 No Content` once the headers are decided.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS,
            ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN, VARY,
        },
        HeaderMap, HeaderValue, Method, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Request headers a browser may send cross-origin.
pub const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

/// Methods a browser may use cross-origin.
pub const ALLOWED_METHODS: &str = "GET, POST, PUT, PATCH, DELETE, OPTIONS";

/// Ordered set of origins admitted for credentialed cross-origin access.
///
/// Matching is exact string equality against trimmed entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedOrigins {
    origins: Vec<String>,
}

impl AllowedOrigins {
    /// Parse a comma-separated list, trimming each entry and dropping blanks.
    pub fn parse(raw: &str) -> Self {
        let origins = raw
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();
        Self { origins }
    }

    /// Whether `origin` is admitted. The empty origin never is.
    pub fn contains(&self, origin: &str) -> bool {
        !origin.is_empty() && self.origins.iter().any(|o| o == origin)
    }

    /// Entries in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.origins.iter().map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.origins.len()
    }

    /// True if nothing is admitted.
    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }
}

/// Origin gate middleware. Install with `from_fn_with_state` around the
/// whole router.
pub async fn origin_gate(
    State(origins): State<Arc<AllowedOrigins>>,
    req: Request,
    next: Next,
) -> Response {
    let admitted = admitted_origin(&origins, req.headers());

    if req.method() == Method::OPTIONS {
        let mut response = StatusCode::NO_CONTENT.into_response();
        if let Some(origin) = admitted {
            apply_cors_headers(response.headers_mut(), origin);
        }
        return response;
    }

    let mut response = next.run(req).await;
    if let Some(origin) = admitted {
        apply_cors_headers(response.headers_mut(), origin);
    }
    response
}

/// The request's `Origin` header value, if it is allowlisted.
fn admitted_origin(origins: &AllowedOrigins, headers: &HeaderMap) -> Option<HeaderValue> {
    let value = headers.get(ORIGIN)?;
    let origin = value.to_str().ok()?;
    origins.contains(origin).then(|| value.clone())
}

fn apply_cors_headers(headers: &mut HeaderMap, origin: HeaderValue) {
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    headers.append(VARY, HeaderValue::from_static("Origin"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
}
