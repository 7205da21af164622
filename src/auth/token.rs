//! Signed, time-limited admin tokens (HS256 JWT).

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::AuthError;
use crate::model::AdminIdentity;

/// Claims carried inside an admin token.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    id: i64,
    username: String,
    /// Issued at (unix timestamp).
    iat: i64,
    /// Expiry (unix timestamp).
    exp: i64,
}

/// Issues and verifies admin tokens with one shared secret.
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: TimeDelta,
}

impl TokenSigner {
    /// Create a signer. `ttl` is how long issued tokens stay valid.
    pub fn new(secret: &[u8], ttl: TimeDelta) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// Issue a token for the given identity, expiring `ttl` from now.
    pub fn issue(&self, identity: &AdminIdentity) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            id: identity.id,
            username: identity.username.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Check signature and expiry and return the identity inside.
    pub fn verify(&self, token: &str) -> Result<AdminIdentity, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|_| AuthError::Forbidden)?;

        Ok(AdminIdentity {
            id: data.claims.id,
            username: data.claims.username,
        })
    }
}
