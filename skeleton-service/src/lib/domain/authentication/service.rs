use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;

use crate::domain::authentication::errors::AuthenticationError;
use crate::domain::authentication::models::AuthorizationRequest;
use crate::domain::authentication::models::GoogleUserCandidate;
use crate::domain::authentication::models::LoginCommand;
use crate::domain::authentication::models::ProviderLogin;
use crate::domain::authentication::models::ProviderTokens;
use crate::domain::authentication::models::Session;
use crate::domain::authentication::ports::AuthenticationRepository;
use crate::domain::authentication::ports::AuthenticationServicePort;
use crate::domain::authentication::ports::IdentityProvider;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::Origin;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;

const GOOGLE: &str = "google";
const AUTH0: &str = "auth0";

/// Authentication flows over native credentials, Google and Auth0.
///
/// Provider clients are injected already configured; the service holds no
/// global OAuth settings.
pub struct AuthenticationService<AR, IP>
where
    AR: AuthenticationRepository,
    IP: IdentityProvider,
{
    repository: Arc<AR>,
    authenticator: Arc<Authenticator>,
    google: Arc<IP>,
    auth0: Arc<IP>,
}

impl<AR, IP> AuthenticationService<AR, IP>
where
    AR: AuthenticationRepository,
    IP: IdentityProvider,
{
    pub fn new(
        repository: Arc<AR>,
        authenticator: Arc<Authenticator>,
        google: Arc<IP>,
        auth0: Arc<IP>,
    ) -> Self {
        Self {
            repository,
            authenticator,
            google,
            auth0,
        }
    }

    fn issue_session(&self, user: User) -> Result<Session, AuthenticationError> {
        let token = self
            .authenticator
            .issue_session(user.id, user.role)
            .map_err(|e| AuthenticationError::Token(e.to_string()))?;

        Ok(Session { user, token })
    }

    fn check_state(
        &self,
        state: &str,
        provider: &str,
        nonce: &str,
    ) -> Result<(), AuthenticationError> {
        self.authenticator
            .validate_state(state, provider, nonce)
            .map(|_| ())
            .map_err(|e| {
                tracing::warn!(provider, error = %e, "Rejected OAuth state");
                AuthenticationError::InvalidState(e.to_string())
            })
    }

    fn authorization_url(
        &self,
        provider: &str,
        client: &IP,
    ) -> Result<AuthorizationRequest, AuthenticationError> {
        let state = self
            .authenticator
            .issue_state(provider)
            .map_err(|e| AuthenticationError::Token(e.to_string()))?;

        Ok(AuthorizationRequest {
            url: client.authorization_url(&state.token),
            nonce: state.nonce,
        })
    }
}

#[async_trait]
impl<AR, IP> AuthenticationServicePort for AuthenticationService<AR, IP>
where
    AR: AuthenticationRepository,
    IP: IdentityProvider,
{
    async fn authenticate(&self, command: LoginCommand) -> Result<Session, AuthenticationError> {
        let user = self
            .repository
            .find_by_login(&command.identifier)
            .await?
            .ok_or(AuthenticationError::NotFound)?;

        let stored_hash = user
            .password_hash
            .as_deref()
            .filter(|hash| !hash.is_empty())
            .ok_or(AuthenticationError::InvalidCredentials)?;

        let token = self
            .authenticator
            .authenticate(&command.password, stored_hash, user.id, user.role)
            .map_err(|e| match e {
                auth::AuthenticationError::InvalidCredentials => {
                    AuthenticationError::InvalidCredentials
                }
                other => AuthenticationError::Unexpected(other.to_string()),
            })?;

        tracing::debug!(user_id = %user.id, "Native login succeeded");

        Ok(Session { user, token })
    }

    async fn reconcile_google_user(
        &self,
        candidate: GoogleUserCandidate,
    ) -> Result<User, AuthenticationError> {
        if let Some(existing) = self.repository.find_by_email(&candidate.email).await? {
            return Ok(existing);
        }

        let new_user = NewUser {
            email: candidate.email.clone(),
            username: None,
            password_hash: None,
            role: Role::User,
            origin: Origin::Google,
            profile: candidate.profile,
        };

        match self.repository.create_user(new_user).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "Provisioned Google user");
                Ok(user)
            }
            // Lost a race against a concurrent first login for the same email.
            Err(AuthenticationError::AlreadyExists(_)) => self
                .repository
                .find_by_email(&candidate.email)
                .await?
                .ok_or_else(|| {
                    AuthenticationError::Unexpected(format!(
                        "{} reported as existing but not found",
                        candidate.email
                    ))
                }),
            Err(e) => Err(e),
        }
    }

    fn google_authorization_url(&self) -> Result<AuthorizationRequest, AuthenticationError> {
        self.authorization_url(GOOGLE, &self.google)
    }

    async fn complete_google_login(
        &self,
        code: &str,
        state: &str,
        nonce: &str,
    ) -> Result<Session, AuthenticationError> {
        self.check_state(state, GOOGLE, nonce)?;

        let login = self.google.exchange_code(code).await.map_err(|e| {
            tracing::error!(error = %e, "Google code exchange failed");
            AuthenticationError::from(e)
        })?;

        let candidate =
            GoogleUserCandidate::from_login(login).map_err(AuthenticationError::InvalidProfile)?;
        let user = self.reconcile_google_user(candidate).await?;

        self.issue_session(user)
    }

    async fn refresh_google_token(
        &self,
        refresh_token: &str,
    ) -> Result<ProviderTokens, AuthenticationError> {
        self.google.refresh(refresh_token).await.map_err(|e| {
            tracing::error!(error = %e, "Google token refresh failed");
            AuthenticationError::from(e)
        })
    }

    fn auth0_authorization_url(&self) -> Result<AuthorizationRequest, AuthenticationError> {
        self.authorization_url(AUTH0, &self.auth0)
    }

    async fn complete_auth0_login(
        &self,
        code: &str,
        state: &str,
        nonce: &str,
    ) -> Result<ProviderLogin, AuthenticationError> {
        self.check_state(state, AUTH0, nonce)?;

        self.auth0.exchange_code(code).await.map_err(|e| {
            tracing::error!(error = %e, "Auth0 code exchange failed");
            AuthenticationError::from(e)
        })
    }
}
