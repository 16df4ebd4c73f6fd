use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Claims carried by a session token.
///
/// A session token binds a user identifier to an authorization role.
/// Both are stored as strings so that services can keep their own id and
/// role types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Subject (user identifier)
    pub sub: String,

    /// Authorization role of the subject
    pub role: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Build claims for a freshly authenticated user.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `role` - Role name
    /// * `expiration_hours` - Hours until the token expires
    pub fn for_user(user_id: impl ToString, role: impl ToString, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::hours(expiration_hours);

        Self {
            sub: user_id.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }
}

/// Claims of the `state` value round-tripped through an OAuth provider.
///
/// The provider name is part of the signed payload so a state minted for
/// one provider is rejected by the callback of another.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StateClaims {
    pub nonce: String,
    pub provider: String,
    pub iat: i64,
    pub exp: i64,
}

impl StateClaims {
    pub fn new(provider: impl ToString, ttl_minutes: i64) -> Self {
        let now = Utc::now();

        Self {
            nonce: Uuid::new_v4().simple().to_string(),
            provider: provider.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(ttl_minutes)).timestamp(),
        }
    }
}
