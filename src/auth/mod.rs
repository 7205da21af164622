//! Admin authentication gate.
//!
//! Verifies a username/password pair against the stored bcrypt hash and
//! issues a signed bearer token bound to the admin's id and username.
//! Tokens are checked by signature and expiry alone; nothing is kept
//! server-side, so there is no revocation.

mod password;
mod token;

pub use password::{hash_password, verify_password};
pub use token::TokenSigner;

use std::sync::Arc;

use chrono::TimeDelta;
use tracing::{info, warn};

use crate::config::AuthConfig;
use crate::model::AdminIdentity;
use crate::storage::{AdminStore, StorageError};

/// Errors from authentication.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Unknown username or wrong password. Deliberately indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No token supplied with the request.
    #[error("No token")]
    Unauthenticated,

    /// Token malformed, signed with another secret, or expired.
    #[error("Invalid token")]
    Forbidden,

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("token signing failed: {0}")]
    Signing(String),
}

/// Login and token verification over the admin credential store.
pub struct AuthGate {
    admins: Arc<dyn AdminStore>,
    signer: TokenSigner,
    bcrypt_cost: u32,
}

impl AuthGate {
    /// Create a gate with an explicit signer.
    pub fn new(admins: Arc<dyn AdminStore>, signer: TokenSigner, bcrypt_cost: u32) -> Self {
        Self {
            admins,
            signer,
            bcrypt_cost,
        }
    }

    /// Build a gate from configuration.
    ///
    /// An empty configured secret is replaced by a random one for the
    /// lifetime of the process.
    pub fn from_config(admins: Arc<dyn AdminStore>, config: &AuthConfig) -> Self {
        let secret = if config.secret.is_empty() {
            warn!("auth.secret not set; generated a random signing secret, tokens will not survive a restart");
            format!("{}{}", uuid::Uuid::new_v4().simple(), uuid::Uuid::new_v4().simple())
        } else {
            config.secret.clone()
        };

        let signer = TokenSigner::new(
            secret.as_bytes(),
            TimeDelta::seconds(config.token_ttl_secs),
        );

        Self::new(admins, signer, config.bcrypt_cost)
    }

    /// Exchange credentials for a token.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let credential = self
            .admins
            .find_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &credential.password_hash).await? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.signer.issue(&AdminIdentity::from(&credential))?;
        info!(username = %credential.username, "admin logged in");
        Ok(token)
    }

    /// Validate a bearer token taken from a request.
    ///
    /// `None` means the request carried no token at all.
    pub fn verify(&self, token: Option<&str>) -> Result<AdminIdentity, AuthError> {
        let token = token.ok_or(AuthError::Unauthenticated)?;
        self.signer.verify(token)
    }

    /// Insert the seed credential when the admin table is empty.
    ///
    /// Returns whether a credential was created.
    pub async fn ensure_seed_admin(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        if self.admins.count().await? > 0 {
            return Ok(false);
        }

        let hash = hash_password(password, self.bcrypt_cost).await?;
        self.admins.upsert(username, &hash).await?;
        info!(username = %username, "seeded admin credential");
        Ok(true)
    }
}
