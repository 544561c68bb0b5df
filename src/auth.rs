use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

use crate::{
    config::AppConfig,
    session::{Role, Session, User},
};

/// Claims
///
/// Payload of the signed session token. It carries the whole user so a request
/// can be authorised without a lookup.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (sub): the user id.
    pub sub: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    /// Expiration time, seconds since the epoch. Always validated.
    pub exp: usize,
    /// Issued at, seconds since the epoch.
    pub iat: usize,
}

/// issue_token
///
/// Signs an HS256 token for `user` valid for the configured session TTL.
pub fn issue_token(user: &User, config: &AppConfig) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp().max(0) as usize;
    // An absurd TTL pins expiry at the far future instead of wrapping.
    let ttl = usize::try_from(config.session_ttl.as_secs()).unwrap_or(usize::MAX);
    let claims = Claims {
        sub: user.id.clone(),
        email: user.email.clone(),
        name: user.name.clone(),
        role: user.role,
        exp: now.saturating_add(ttl),
        iat: now,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
}

/// session_from_token
///
/// Rehydrates a session from a bearer token. A token that is malformed, badly
/// signed, expired, or names an unknown role yields the logged-out session.
pub fn session_from_token(token: &str, config: &AppConfig) -> Session {
    let mut validation = Validation::default();
    validation.validate_exp = true;

    match decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    ) {
        Ok(data) => {
            let Claims {
                sub,
                email,
                name,
                role,
                ..
            } = data.claims;
            Session::authenticated(
                User {
                    id: sub,
                    email,
                    name,
                    role,
                },
                token.to_string(),
            )
        }
        Err(e) => {
            tracing::debug!(reason = ?e.kind(), "rejecting session token");
            Session::logged_out()
        }
    }
}

/// AuthSession
///
/// Extractor resolving the caller's session from `Authorization: Bearer <token>`.
/// It never rejects: a missing or invalid token is simply the logged-out
/// session, and the route guard decides what that means.
#[derive(Debug, Clone)]
pub struct AuthSession(pub Session);

impl<S> FromRequestParts<S> for AuthSession
where
    S: Send + Sync,
    AppConfig: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = AppConfig::from_ref(state);

        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        let session = match token {
            Some(token) => session_from_token(token.trim(), &config),
            None => Session::logged_out(),
        };
        Ok(AuthSession(session))
    }
}
