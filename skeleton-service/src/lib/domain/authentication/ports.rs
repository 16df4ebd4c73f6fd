use async_trait::async_trait;

use crate::domain::authentication::errors::AuthenticationError;
use crate::domain::authentication::errors::IdentityProviderError;
use crate::domain::authentication::models::AuthorizationRequest;
use crate::domain::authentication::models::GoogleUserCandidate;
use crate::domain::authentication::models::LoginCommand;
use crate::domain::authentication::models::LoginIdentifier;
use crate::domain::authentication::models::ProviderLogin;
use crate::domain::authentication::models::ProviderTokens;
use crate::domain::authentication::models::Session;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;

/// Port for the authentication flows.
#[async_trait]
pub trait AuthenticationServicePort: Send + Sync + 'static {
    /// Native login by email or username.
    ///
    /// # Errors
    /// * `NotFound` - No account matches the identifier
    /// * `InvalidCredentials` - Password does not match, or the account has none
    /// * `Unexpected` - Store or hash library failure
    async fn authenticate(&self, command: LoginCommand) -> Result<Session, AuthenticationError>;

    /// Return the local user for a Google identity, creating it on first sight.
    ///
    /// An existing record is returned unchanged.
    async fn reconcile_google_user(
        &self,
        candidate: GoogleUserCandidate,
    ) -> Result<User, AuthenticationError>;

    /// Consent page URL carrying a freshly signed `state`, and the nonce
    /// that state is bound to.
    fn google_authorization_url(&self) -> Result<AuthorizationRequest, AuthenticationError>;

    /// # Errors
    /// * `InvalidState` - `state` was not issued by this service for Google,
    ///   or not to the client holding `nonce`
    /// * `Provider` - Code exchange or profile fetch failed
    /// * `InvalidProfile` - Provider returned no usable, verified email
    async fn complete_google_login(
        &self,
        code: &str,
        state: &str,
        nonce: &str,
    ) -> Result<Session, AuthenticationError>;

    async fn refresh_google_token(
        &self,
        refresh_token: &str,
    ) -> Result<ProviderTokens, AuthenticationError>;

    fn auth0_authorization_url(&self) -> Result<AuthorizationRequest, AuthenticationError>;

    /// Exchange an Auth0 code for tokens and profile. Nothing is persisted.
    async fn complete_auth0_login(
        &self,
        code: &str,
        state: &str,
        nonce: &str,
    ) -> Result<ProviderLogin, AuthenticationError>;
}

/// User lookups and provisioning needed by the authentication flows.
#[async_trait]
pub trait AuthenticationRepository: Send + Sync + 'static {
    /// Find a user whose email or username equals the identifier, email first.
    async fn find_by_login(
        &self,
        identifier: &LoginIdentifier,
    ) -> Result<Option<User>, AuthenticationError>;

    async fn find_by_email(&self, email: &EmailAddress)
        -> Result<Option<User>, AuthenticationError>;

    /// # Errors
    /// * `AlreadyExists` - Email or username already taken
    /// * `Unexpected` - Store write failed
    async fn create_user(&self, user: NewUser) -> Result<User, AuthenticationError>;
}

/// OAuth2 authorization-code provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync + 'static {
    fn authorization_url(&self, state: &str) -> String;

    /// Exchange an authorization code and fetch the user's profile.
    async fn exchange_code(&self, code: &str) -> Result<ProviderLogin, IdentityProviderError>;

    async fn refresh(&self, refresh_token: &str) -> Result<ProviderTokens, IdentityProviderError>;
}
