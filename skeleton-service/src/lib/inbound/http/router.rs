use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::auth::auth0_callback;
use super::handlers::auth::auth0_redirect;
use super::handlers::auth::google_callback;
use super::handlers::auth::google_redirect;
use super::handlers::auth::login;
use super::handlers::auth::refresh_google_token;
use super::handlers::posts::create_post;
use super::handlers::posts::get_posts_by_user;
use super::handlers::posts::search_posts;
use super::handlers::users::delete_user;
use super::handlers::users::get_user;
use super::handlers::users::get_users_by_role;
use super::handlers::users::search_users;
use super::handlers::users::signup;
use super::handlers::users::signup_admin;
use super::handlers::users::update_user;
use super::middleware::authenticate;
use super::middleware::require_admin;
use crate::domain::authentication::ports::AuthenticationServicePort;
use crate::domain::post::ports::PostServicePort;
use crate::domain::user::ports::UserServicePort;

/// Services are held behind their ports so any adapter set can be mounted.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub authentication_service: Arc<dyn AuthenticationServicePort>,
    pub post_service: Arc<dyn PostServicePort>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    authentication_service: Arc<dyn AuthenticationServicePort>,
    post_service: Arc<dyn PostServicePort>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        user_service,
        authentication_service,
        post_service,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/login", post(login))
        .route("/google", get(google_redirect))
        .route("/callback", get(google_callback))
        .route("/refresh", get(refresh_google_token))
        .route("/auth0", get(auth0_redirect))
        .route("/callback/auth0", get(auth0_callback))
        .route("/signup", post(signup))
        .route("/users/:user_id/posts", get(get_posts_by_user))
        .route("/posts", get(search_posts));

    let protected_routes = Router::new()
        .route("/users/:user_id", get(get_user).patch(update_user))
        .route("/posts", post(create_post))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    // `authenticate` is added last so it runs before `require_admin`.
    let admin_routes = Router::new()
        .route("/signup-admin", post(signup_admin))
        .route("/users", get(search_users))
        .route("/users/roles/:role", get(get_users_by_role))
        .route("/users/:user_id", delete(delete_user))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    let api = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(admin_routes);

    Router::new()
        .nest("/api/v1", api)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
