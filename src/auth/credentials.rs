use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::sync::Arc;
use tracing::{debug, error, info};

use super::AuthError;
use crate::config::SecurityConfig;

/// Decides whether a username/password pair may open an admin session
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// A single configured username and plain password
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        // Evaluate both so a wrong username costs the same as a wrong password
        let user_ok = username == self.username;
        let password_ok = password == self.password;
        user_ok & password_ok
    }
}

/// A configured username and an Argon2 PHC hash of the password
pub struct Argon2Credentials {
    username: String,
    password_hash: String,
}

impl Argon2Credentials {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Result<Self, AuthError> {
        let password_hash = password_hash.into();
        PasswordHash::new(&password_hash).map_err(|e| AuthError::PasswordHash(e.to_string()))?;
        Ok(Self {
            username: username.into(),
            password_hash,
        })
    }
}

impl CredentialVerifier for Argon2Credentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        let parsed = match PasswordHash::new(&self.password_hash) {
            Ok(hash) => hash,
            Err(e) => {
                error!(error = %e, "Stored admin password hash is unreadable");
                return false;
            }
        };

        let password_ok = match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => true,
            Err(argon2::password_hash::Error::Password) => false,
            Err(e) => {
                error!(error = %e, "Argon2 verification failed");
                false
            }
        };

        let user_ok = username == self.username;
        debug!(user_ok, password_ok, "Checked admin credentials");
        user_ok & password_ok
    }
}

/// Hash a password for ADMIN_PASSWORD_HASH
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    if password.is_empty() {
        return Err(AuthError::PasswordHash("password cannot be empty".to_string()));
    }

    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswordHash(e.to_string()))
}

/// Argon2 when a hash is configured, otherwise the plain username/password pair
pub fn verifier_from_config(security: &SecurityConfig) -> Result<Arc<dyn CredentialVerifier>, AuthError> {
    match &security.admin_password_hash {
        Some(hash) => {
            info!("Admin login uses an Argon2 password hash");
            Ok(Arc::new(Argon2Credentials::new(&security.admin_username, hash)?))
        }
        None => Ok(Arc::new(StaticCredentials::new(
            &security.admin_username,
            &security.admin_password,
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn static_credentials_match_exact_pair() {
        let verifier = StaticCredentials::new("admin", "admin");
        assert!(verifier.verify("admin", "admin"));
        assert!(!verifier.verify("admin", "wrong"));
        assert!(!verifier.verify("root", "admin"));
        assert!(!verifier.verify("", ""));
        assert!(!verifier.verify("Admin", "admin"));
    }

    #[test]
    fn argon2_credentials_verify_hash() {
        let hash = hash_password("s3cret").unwrap();
        let verifier = Argon2Credentials::new("owner", hash).unwrap();

        assert!(verifier.verify("owner", "s3cret"));
        assert!(!verifier.verify("owner", "admin"));
        assert!(!verifier.verify("admin", "s3cret"));
    }

    #[test]
    fn malformed_hash_is_rejected_up_front() {
        assert!(matches!(
            Argon2Credentials::new("owner", "not-a-phc-string"),
            Err(AuthError::PasswordHash(_))
        ));
    }

    #[test]
    fn empty_password_cannot_be_hashed() {
        assert!(hash_password("").is_err());
    }

    #[test]
    fn config_selects_verifier() {
        let mut security = AppConfig::development().security;
        let plain = verifier_from_config(&security).unwrap();
        assert!(plain.verify("admin", "admin"));

        security.admin_password_hash = Some(hash_password("hunter2").unwrap());
        let hashed = verifier_from_config(&security).unwrap();
        assert!(hashed.verify("admin", "hunter2"));
        assert!(!hashed.verify("admin", "admin"));
    }
}
