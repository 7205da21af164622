//! Admin authentication configuration types.

use serde::Deserialize;

/// Admin authentication configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HMAC secret for signing admin tokens.
    /// Empty = a random secret is generated at startup.
    pub secret: String,
    /// Admin token lifetime in seconds.
    pub token_ttl_secs: i64,
    /// bcrypt work factor for stored password hashes.
    pub bcrypt_cost: u32,
    /// Username of the credential seeded into an empty admin table.
    pub seed_username: String,
    /// Password of the seeded credential.
    pub seed_password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            token_ttl_secs: 24 * 60 * 60,
            bcrypt_cost: 10,
            seed_username: "zahra00".to_string(),
            seed_password: "sol.pk".to_string(),
        }
    }
}
