//! Access token codec and cookie lifecycle
//!
//! Issues and verifies HS256-signed, time-limited identity claims. The codec
//! is a pure function of its input, the server secret, and the current time.

use axum::http::{HeaderMap, HeaderValue};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{error, warn};

use super::models::{Claims, User};
use crate::common::ApiError;

/// Name of the cookie carrying the access token
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Fixed token lifetime; expiry is always issued_at + this TTL
pub const ACCESS_TOKEN_TTL_DAYS: i64 = 30;

/// Issue a signed access token embedding the user's identity claims
pub fn issue_access_token(secret: &str, user: &User) -> Result<String, ApiError> {
    let exp = (Utc::now() + Duration::days(ACCESS_TOKEN_TTL_DAYS)).timestamp() as usize;
    let claims = Claims {
        sub: user.google_id.clone(),
        email: user.email.clone(),
        name: user.name.clone(),
        avatar_url: user.avatar_url.clone(),
        generation: user.generation,
        exp,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| {
        error!(error = %e, user_id = %user.id, "JWT encoding error");
        ApiError::InternalServer("token issuance failed".to_string())
    })
}

/// Verify a token's signature and expiry and return its claims
///
/// Malformed structure, bad signature, and elapsed expiry all collapse to the
/// same `Unauthorized` error. Absence is checked by the caller, never here.
pub fn verify_access_token(secret: &str, token: &str) -> Result<Claims, ApiError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        warn!(error = %e, "Access token validation failed");
        ApiError::Unauthorized("invalid credentials".to_string())
    })
}

/// Read a named cookie out of the request headers
pub fn parse_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookie = headers.get("cookie").or_else(|| headers.get("Cookie"))?;
    let s = cookie.to_str().ok()?;
    for part in s.split(';') {
        let p = part.trim();
        if let Some(eq) = p.find('=') {
            let (k, v) = p.split_at(eq);
            if k == name {
                return Some(v[1..].to_string());
            }
        }
    }
    None
}

/// Build the Set-Cookie value carrying a freshly issued access token
///
/// HttpOnly, SameSite=Lax, scoped to /, max-age matching the token TTL.
pub fn access_cookie_value(token: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(&format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        ACCESS_TOKEN_COOKIE,
        token,
        ACCESS_TOKEN_TTL_DAYS * 24 * 60 * 60
    ))
    .map_err(|e| {
        error!(error = %e, "Failed to build access token cookie");
        ApiError::InternalServer("token issuance failed".to_string())
    })
}

/// Build the Set-Cookie value that expires the access token cookie
pub fn clear_cookie_value() -> HeaderValue {
    HeaderValue::from_static(
        "access_token=deleted; Expires=Thu, 01 Jan 1970 00:00:00 GMT; HttpOnly; SameSite=Lax; Path=/",
    )
}
