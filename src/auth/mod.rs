use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SecurityConfig;

pub mod credentials;

pub use credentials::{verifier_from_config, Argon2Credentials, CredentialVerifier, StaticCredentials};

/// Cookie carrying the signed admin session
pub const SESSION_COOKIE: &str = "catalog_session";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid Credentials. Please try again.")]
    InvalidCredentials,

    #[error("No admin session")]
    MissingSession,

    #[error("Invalid admin session: {0}")]
    InvalidSession(String),

    #[error("Session token generation failed: {0}")]
    TokenGeneration(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub logged_in: bool,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and checks the HS256 tokens that stand in for a server-side session
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry_hours: u64,
}

impl SessionKeys {
    pub fn new(secret: &str, expiry_hours: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry_hours,
        }
    }

    pub fn from_config(security: &SecurityConfig) -> Self {
        Self::new(&security.session_secret, security.session_expiry_hours)
    }

    /// Lifetime of an issued token, used as the cookie Max-Age
    pub fn max_age_secs(&self) -> i64 {
        Duration::hours(self.expiry_hours as i64).num_seconds()
    }

    pub fn issue(&self, username: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: username.to_string(),
            logged_in: true,
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.expiry_hours as i64)).timestamp(),
        };
        self.encode(&claims)
    }

    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        let token_data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|e| AuthError::InvalidSession(e.to_string()))?;

        if !token_data.claims.logged_in {
            return Err(AuthError::InvalidSession("session is not logged in".to_string()));
        }

        Ok(token_data.claims)
    }

    fn encode(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::default(), claims, &self.encoding)
            .map_err(|e| AuthError::TokenGeneration(e.to_string()))
    }
}
