use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Redirect;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde::Serialize;

use super::finish_flow;
use super::pending_nonce;
use super::start_flow;
use super::SessionResponseData;
use crate::domain::authentication::models::ProviderTokens;
use crate::domain::authentication::ports::AuthenticationServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Send the browser to the Google consent page.
pub async fn google_redirect(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), ApiError> {
    let request = state.authentication_service.google_authorization_url()?;
    Ok(start_flow(jar, request))
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: String,
    pub state: String,
}

pub async fn google_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<CallbackQuery>,
) -> Result<(CookieJar, ApiSuccess<SessionResponseData>), ApiError> {
    let nonce = pending_nonce(&jar);

    state
        .authentication_service
        .complete_google_login(&query.code, &query.state, &nonce)
        .await
        .map_err(ApiError::from)
        .map(|ref session| {
            (
                finish_flow(jar),
                ApiSuccess::new(StatusCode::CREATED, session.into()),
            )
        })
}

#[derive(Debug, Deserialize)]
pub struct RefreshQuery {
    pub refresh: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokensResponseData {
    pub access_token: String,
    pub token_type: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
}

impl From<ProviderTokens> for TokensResponseData {
    fn from(tokens: ProviderTokens) -> Self {
        Self {
            access_token: tokens.access_token,
            token_type: tokens.token_type,
            refresh_token: tokens.refresh_token,
            expires_in: tokens.expires_in,
        }
    }
}

pub async fn refresh_google_token(
    State(state): State<AppState>,
    Query(query): Query<RefreshQuery>,
) -> Result<ApiSuccess<TokensResponseData>, ApiError> {
    if query.refresh.trim().is_empty() {
        return Err(ApiError::UnprocessableEntity(
            "refresh token must not be empty".to_string(),
        ));
    }

    state
        .authentication_service
        .refresh_google_token(&query.refresh)
        .await
        .map_err(ApiError::from)
        .map(|tokens| ApiSuccess::new(StatusCode::OK, tokens.into()))
}
