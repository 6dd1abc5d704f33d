use serde::{Deserialize, Serialize};

/// Login session issued by an authenticator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: String,
    pub token: String,
    pub created_at: String, // ISO8601
}
