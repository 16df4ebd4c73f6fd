use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::SessionClaims;
use crate::jwt::StateClaims;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

const STATE_TTL_MINUTES: i64 = 10;

/// Coordinates password verification with session and state token issuance.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    session_ttl_hours: i64,
}

/// A freshly signed OAuth `state` and the nonce it carries.
///
/// The nonce is handed to the browser separately (a cookie) so the callback
/// can prove the state came back to the client that started the flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedState {
    pub token: String,
    pub nonce: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    /// * `session_ttl_hours` - Lifetime of issued session tokens
    pub fn new(jwt_secret: &[u8], session_ttl_hours: i64) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            session_ttl_hours,
        }
    }

    /// Verify a password against the stored hash and issue a session token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash unreadable or verifier failure
    /// * `JwtError` - Token signing failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: impl ToString,
        role: impl ToString,
    ) -> Result<String, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_session(user_id, role)?)
    }

    /// Issue a session token for an identity verified by other means.
    pub fn issue_session(
        &self,
        user_id: impl ToString,
        role: impl ToString,
    ) -> Result<String, JwtError> {
        let claims = SessionClaims::for_user(user_id, role, self.session_ttl_hours);
        self.jwt_handler.encode(&claims)
    }

    pub fn validate_session(&self, token: &str) -> Result<SessionClaims, JwtError> {
        self.jwt_handler.decode(token)
    }

    /// Mint a signed, short-lived OAuth `state` for the given provider.
    pub fn issue_state(&self, provider: &str) -> Result<IssuedState, JwtError> {
        let claims = StateClaims::new(provider, STATE_TTL_MINUTES);
        let token = self.jwt_handler.encode(&claims)?;

        Ok(IssuedState {
            token,
            nonce: claims.nonce,
        })
    }

    /// Check a `state` returned by a provider callback against the nonce
    /// held by the client.
    ///
    /// # Errors
    /// * `InvalidToken` - Signed for a different provider, or nonce mismatch
    /// * Any decoding error from the underlying handler
    pub fn validate_state(
        &self,
        state: &str,
        provider: &str,
        nonce: &str,
    ) -> Result<StateClaims, JwtError> {
        let claims: StateClaims = self.jwt_handler.decode(state)?;

        if claims.provider != provider {
            return Err(JwtError::InvalidToken(format!(
                "state issued for {}, not {}",
                claims.provider, provider
            )));
        }

        if claims.nonce != nonce {
            return Err(JwtError::InvalidToken(
                "state was issued to another client".to_string(),
            ));
        }

        Ok(claims)
    }
}
