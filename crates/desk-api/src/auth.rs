//! Cookie-based token authentication.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

/// Name of the cookie carrying the signed token.
pub const TOKEN_COOKIE: &str = "token";

/// Message used for every 401; the wire contract does not distinguish a missing
/// cookie from a bad one.
const UNAUTHORIZED_MSG: &str = "unauthorized access";

/// Identity claim embedded in a signed token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User identity
    pub email: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiration (unix seconds)
    pub exp: i64,
}

/// Issues and verifies HS256-signed identity tokens.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    /// Create a service signing with the given secret. Tokens expire one hour
    /// after issuance.
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(1),
        }
    }

    /// Create from the `USER_SECRET` environment variable.
    ///
    /// A missing secret is fatal: the caller aborts startup rather than serve
    /// tokens it cannot sign.
    pub fn from_env() -> Result<Self, ApiError> {
        let secret = std::env::var("USER_SECRET")
            .map_err(|_| ApiError::internal("USER_SECRET must be set to sign tokens"))?;
        if secret.is_empty() {
            return Err(ApiError::internal("USER_SECRET cannot be empty"));
        }
        Ok(Self::new(&secret))
    }

    /// Produce a signed token embedding the identity claim.
    pub fn issue(&self, email: &str) -> Result<String, ApiError> {
        let now = Utc::now();
        let claims = Claims {
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| ApiError::internal(format!("Failed to sign token: {}", e)))
    }

    /// Verify a token and return its claims.
    ///
    /// Fails on malformed tokens, bad signatures and expired tokens alike; the
    /// caller sees a single 401.
    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|_| ApiError::unauthorized(UNAUTHORIZED_MSG))
    }
}

/// Authenticated user extracted from the request's token cookie.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let token = jar
            .get(TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .ok_or_else(|| ApiError::unauthorized(UNAUTHORIZED_MSG))?;

        let claims = state.tokens.verify(&token)?;

        Ok(AuthUser {
            email: claims.email,
        })
    }
}
