//! Signed, client-held session state.
//!
//! The cookie value is an HS256 token whose claims carry the user identifier
//! and an expiry. There is no server-side session table: a cookie that fails
//! signature or expiry checks is treated exactly like a missing one.

use axum::http::{header, HeaderMap, HeaderValue};
use chrono::{Duration, Utc};
use cookie::{Cookie, SameSite};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SessionConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub user_id: String,
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    pub fn new(user_id: impl Into<String>, max_age: Duration) -> Self {
        let now = Utc::now();
        Self {
            user_id: user_id.into(),
            iat: now.timestamp(),
            exp: (now + max_age).timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session secret is not configured")]
    InvalidSecret,

    #[error("Session token generation failed: {0}")]
    TokenGeneration(String),

    #[error("Session cookie header is not valid: {0}")]
    InvalidHeader(String),

    #[error("Session max age of {0} hours is out of range")]
    InvalidMaxAge(i64),
}

/// Signing keys and cookie attributes for the `session` cookie
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    cookie_name: String,
    max_age: Duration,
    secure: bool,
}

impl std::fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionKeys")
            .field("cookie_name", &self.cookie_name)
            .field("max_age", &self.max_age)
            .field("secure", &self.secure)
            .finish_non_exhaustive()
    }
}

impl SessionKeys {
    pub fn new(
        secret: &str,
        cookie_name: impl Into<String>,
        max_age: Duration,
        secure: bool,
    ) -> Result<Self, SessionError> {
        if secret.is_empty() {
            return Err(SessionError::InvalidSecret);
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            cookie_name: cookie_name.into(),
            max_age,
            secure,
        })
    }

    pub fn from_config(config: &SessionConfig) -> Result<Self, SessionError> {
        let max_age = Duration::try_hours(config.max_age_hours)
            .filter(|age| *age > Duration::zero())
            .ok_or(SessionError::InvalidMaxAge(config.max_age_hours))?;

        Self::new(&config.secret, config.cookie_name.clone(), max_age, config.secure)
    }

    /// Resolve the user identifier from the request's session cookie, if it
    /// is present, correctly signed and unexpired.
    pub fn read(&self, headers: &HeaderMap) -> Option<String> {
        let token = find_cookie(headers, &self.cookie_name)?;
        if token.is_empty() {
            return None;
        }

        match self.verify(&token) {
            Ok(claims) => {
                tracing::debug!("Session resolved for user '{}'", claims.user_id);
                Some(claims.user_id)
            }
            Err(e) => {
                tracing::warn!("Rejected session cookie: {}", e);
                None
            }
        }
    }

    /// `Set-Cookie` value establishing a session for `user_id`
    pub fn issue(&self, user_id: &str) -> Result<HeaderValue, SessionError> {
        let token = self.sign(&SessionClaims::new(user_id, self.max_age))?;
        self.set_cookie(token, cookie::time::Duration::seconds(self.max_age.num_seconds()))
    }

    /// `Set-Cookie` value that destroys the session on the client
    pub fn clear(&self) -> Result<HeaderValue, SessionError> {
        self.set_cookie(String::new(), cookie::time::Duration::ZERO)
    }

    fn set_cookie(&self, value: String, max_age: cookie::time::Duration) -> Result<HeaderValue, SessionError> {
        let cookie = Cookie::build((self.cookie_name.clone(), value))
            .path("/")
            .max_age(max_age)
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .build();

        HeaderValue::from_str(&cookie.to_string()).map_err(|e| SessionError::InvalidHeader(e.to_string()))
    }

    pub fn sign(&self, claims: &SessionClaims) -> Result<String, SessionError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| SessionError::TokenGeneration(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        decode::<SessionClaims>(token, &self.decoding, &validation).map(|data| data.claims)
    }
}

/// Value of the first well-formed cookie called `name` across all `Cookie` headers
fn find_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| Cookie::split_parse(value))
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value().to_string())
}
