use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Redirect;
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use super::finish_flow;
use super::google::CallbackQuery;
use super::google::TokensResponseData;
use super::pending_nonce;
use super::start_flow;
use crate::domain::authentication::models::ExternalIdentity;
use crate::domain::authentication::models::ProviderLogin;
use crate::domain::authentication::ports::AuthenticationServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn auth0_redirect(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), ApiError> {
    let request = state.authentication_service.auth0_authorization_url()?;
    Ok(start_flow(jar, request))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileData {
    pub subject: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub picture: Option<String>,
}

impl From<ExternalIdentity> for ProfileData {
    fn from(identity: ExternalIdentity) -> Self {
        Self {
            subject: identity.subject,
            email: identity.email,
            name: identity.name,
            given_name: identity.given_name,
            family_name: identity.family_name,
            picture: identity.picture,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Auth0LoginResponseData {
    pub token: TokensResponseData,
    pub profile: ProfileData,
}

impl From<ProviderLogin> for Auth0LoginResponseData {
    fn from(login: ProviderLogin) -> Self {
        Self {
            token: login.tokens.into(),
            profile: login.identity.into(),
        }
    }
}

pub async fn auth0_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<CallbackQuery>,
) -> Result<(CookieJar, ApiSuccess<Auth0LoginResponseData>), ApiError> {
    let nonce = pending_nonce(&jar);

    state
        .authentication_service
        .complete_auth0_login(&query.code, &query.state, &nonce)
        .await
        .map_err(ApiError::from)
        .map(|login| (finish_flow(jar), ApiSuccess::new(StatusCode::OK, login.into())))
}
