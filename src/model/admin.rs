use serde::{Deserialize, Serialize};

/// Stored admin login. The hash is a salted bcrypt string.
#[derive(Debug, Clone)]
pub struct AdminCredential {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

/// Authenticated administrator, as carried inside an admin token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminIdentity {
    pub id: i64,
    pub username: String,
}

impl From<&AdminCredential> for AdminIdentity {
    fn from(credential: &AdminCredential) -> Self {
        Self {
            id: credential.id,
            username: credential.username.clone(),
        }
    }
}
