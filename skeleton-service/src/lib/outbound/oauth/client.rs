use async_trait::async_trait;
use serde::Deserialize;

use crate::config::OAuthProviderConfig;
use crate::domain::authentication::errors::IdentityProviderError;
use crate::domain::authentication::models::ExternalIdentity;
use crate::domain::authentication::models::ProviderLogin;
use crate::domain::authentication::models::ProviderTokens;
use crate::domain::authentication::ports::IdentityProvider;

/// Token endpoint response (RFC 6749 §5.1).
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_token_type")]
    token_type: String,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
    id_token: Option<String>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl From<TokenResponse> for ProviderTokens {
    fn from(response: TokenResponse) -> Self {
        Self {
            access_token: response.access_token,
            token_type: response.token_type,
            refresh_token: response.refresh_token,
            expires_in: response.expires_in,
            id_token: response.id_token,
        }
    }
}

/// Userinfo response. Google reports the subject as `id`, OIDC providers as `sub`.
#[derive(Debug, Deserialize)]
struct UserInfoResponse {
    #[serde(alias = "id")]
    sub: Option<String>,
    email: Option<String>,
    #[serde(alias = "verified_email")]
    email_verified: Option<bool>,
    given_name: Option<String>,
    family_name: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

impl From<UserInfoResponse> for ExternalIdentity {
    fn from(response: UserInfoResponse) -> Self {
        Self {
            subject: response.sub,
            email: response.email,
            email_verified: response.email_verified.unwrap_or(false),
            given_name: response.given_name,
            family_name: response.family_name,
            name: response.name,
            picture: response.picture,
        }
    }
}

/// OAuth2 authorization-code client for a single provider.
pub struct OAuthClient {
    http: reqwest::Client,
    config: OAuthProviderConfig,
}

impl OAuthClient {
    pub fn new(config: OAuthProviderConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    async fn request_tokens(
        &self,
        params: &[(&str, &str)],
    ) -> Result<ProviderTokens, IdentityProviderError> {
        let response = self
            .http
            .post(&self.config.token_url)
            .form(params)
            .send()
            .await
            .map_err(|e| IdentityProviderError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IdentityProviderError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<TokenResponse>()
            .await
            .map(ProviderTokens::from)
            .map_err(|e| IdentityProviderError::InvalidResponse(e.to_string()))
    }

    async fn fetch_identity(
        &self,
        access_token: &str,
    ) -> Result<ExternalIdentity, IdentityProviderError> {
        let response = self
            .http
            .get(&self.config.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| IdentityProviderError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IdentityProviderError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<UserInfoResponse>()
            .await
            .map(ExternalIdentity::from)
            .map_err(|e| IdentityProviderError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl IdentityProvider for OAuthClient {
    fn authorization_url(&self, state: &str) -> String {
        let scope = self.config.scopes.join(" ");
        let mut params = vec![
            ("client_id", self.config.client_id.as_str()),
            ("redirect_uri", self.config.redirect_url.as_str()),
            ("response_type", "code"),
            ("scope", scope.as_str()),
            ("state", state),
        ];
        if self.config.offline_access {
            params.push(("access_type", "offline"));
            params.push(("prompt", "consent"));
        }

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.config.auth_url, query_string)
    }

    async fn exchange_code(&self, code: &str) -> Result<ProviderLogin, IdentityProviderError> {
        let tokens = self
            .request_tokens(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("redirect_uri", self.config.redirect_url.as_str()),
            ])
            .await?;

        let identity = self.fetch_identity(&tokens.access_token).await?;

        tracing::debug!(
            subject = ?identity.subject,
            "Fetched identity from provider"
        );

        Ok(ProviderLogin { tokens, identity })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<ProviderTokens, IdentityProviderError> {
        self.request_tokens(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ])
        .await
    }
}
