pub mod auth0;
pub mod google;
pub mod login;

pub use auth0::auth0_callback;
pub use auth0::auth0_redirect;
pub use google::google_callback;
pub use google::google_redirect;
pub use google::refresh_google_token;
pub use login::login;

use axum::response::Redirect;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::extract::cookie::SameSite;
use serde::Serialize;

use crate::domain::authentication::models::AuthorizationRequest;
use crate::domain::authentication::models::Session;
use crate::inbound::http::handlers::UserData;

/// Session issued by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionResponseData {
    pub user: UserData,
    pub token: String,
}

impl From<&Session> for SessionResponseData {
    fn from(session: &Session) -> Self {
        Self {
            user: (&session.user).into(),
            token: session.token.clone(),
        }
    }
}

/// Cookie holding the nonce of the OAuth flow started by this browser.
pub const STATE_COOKIE: &str = "oauth_state";
const STATE_COOKIE_PATH: &str = "/api/v1";

/// Redirect to the provider and pin the flow's nonce to the browser.
fn start_flow(jar: CookieJar, request: AuthorizationRequest) -> (CookieJar, Redirect) {
    let cookie = Cookie::build((STATE_COOKIE, request.nonce))
        .path(STATE_COOKIE_PATH)
        .http_only(true)
        .same_site(SameSite::Lax);

    (jar.add(cookie), Redirect::temporary(&request.url))
}

/// Nonce presented by the browser, empty when the cookie is absent.
fn pending_nonce(jar: &CookieJar) -> String {
    jar.get(STATE_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .unwrap_or_default()
}

fn finish_flow(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(STATE_COOKIE).path(STATE_COOKIE_PATH))
}
