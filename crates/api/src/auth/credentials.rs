//! Admin credential verification.
//!
//! The login handler is written against the [`CredentialVerifier`]
//! capability rather than any concrete credential source, so the gate's
//! redirect logic stays independent of how identities are checked.
//! Production wiring uses [`EnvCredentials`], which compares against an
//! Argon2id hash taken from the environment; no credential appears in
//! source.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// The identity established by a successful credential check.
#[derive(Debug, Clone)]
pub struct VerifiedIdentity {
    pub username: String,
}

/// Credential verification failure. Deliberately carries no detail about
/// which part of the credential pair was wrong.
#[derive(Debug, thiserror::Error)]
#[error("Invalid username or password")]
pub struct AuthFailed;

/// Capability to verify admin credentials.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> Result<VerifiedIdentity, AuthFailed>;
}

/// Environment-configured verifier: a single admin account whose password
/// is stored as an Argon2id PHC hash.
pub struct EnvCredentials {
    username: String,
    password_hash: String,
}

impl EnvCredentials {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }

    /// Load the admin account from environment variables.
    ///
    /// | Env Var               | Required | Description                       |
    /// |-----------------------|----------|-----------------------------------|
    /// | `ADMIN_USERNAME`      | **yes**  | Admin account name                |
    /// | `ADMIN_PASSWORD_HASH` | **yes**  | Argon2id PHC hash of the password |
    ///
    /// # Panics
    ///
    /// Panics if either variable is missing or the hash is not a valid PHC
    /// string; the server should fail fast on misconfiguration.
    pub fn from_env() -> Self {
        let username = std::env::var("ADMIN_USERNAME")
            .expect("ADMIN_USERNAME must be set in the environment");
        let password_hash = std::env::var("ADMIN_PASSWORD_HASH")
            .expect("ADMIN_PASSWORD_HASH must be set in the environment");
        PasswordHash::new(&password_hash)
            .expect("ADMIN_PASSWORD_HASH must be a valid PHC hash string");

        Self {
            username,
            password_hash,
        }
    }
}

impl CredentialVerifier for EnvCredentials {
    fn verify(&self, username: &str, password: &str) -> Result<VerifiedIdentity, AuthFailed> {
        if username != self.username {
            return Err(AuthFailed);
        }
        match verify_password(password, &self.password_hash) {
            Ok(true) => Ok(VerifiedIdentity {
                username: self.username.clone(),
            }),
            Ok(false) => Err(AuthFailed),
            Err(e) => {
                tracing::error!(error = %e, "Password verification error");
                Err(AuthFailed)
            }
        }
    }
}

/// Hash a plaintext password using Argon2id with a random salt.
///
/// Returns the PHC-formatted hash string (includes algorithm, params, salt,
/// and hash). Used to provision `ADMIN_PASSWORD_HASH`.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted Argon2id hash.
///
/// Returns `Ok(true)` if the password matches, `Ok(false)` if it does not.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}
