use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use crate::error::ApiError;

/// Access gate layered on the blog routes only; user and category routes are
/// unauthenticated by design.
///
/// Checks for the PRESENCE of a bearer token and emits a request log line.
/// Token authenticity is not verified here - that belongs to an upstream
/// identity provider.
pub async fn require_bearer(
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    log_request(&request);

    let token = bearer_token(&headers);
    if !validate(token.as_deref()) {
        return Err(ApiError::unauthorized("Unauthorized"));
    }

    Ok(next.run(request).await)
}

/// Extract the token half of an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_str = headers.get("authorization")?.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ").or_else(|| auth_str.strip_prefix("bearer "))?;
    Some(token.to_string())
}

/// Presence-only check; a non-empty token is accepted as-is.
fn validate(token: Option<&str>) -> bool {
    matches!(token, Some(t) if !t.trim().is_empty())
}

/// Side channel only; never affects control flow.
fn log_request(request: &Request) {
    if crate::config::config().api.enable_request_logging {
        tracing::info!(
            method = %request.method(),
            path = %request.uri().path(),
            at = %Utc::now().to_rfc3339(),
            "blog api request"
        );
    }
}
