use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::PageQuery;
use crate::inbound::http::handlers::UserData;
use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchUsersQuery {
    pub username: String,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub async fn search_users(
    State(state): State<AppState>,
    Query(query): Query<SearchUsersQuery>,
) -> Result<ApiSuccess<Vec<UserData>>, ApiError> {
    let pagination = PageQuery {
        limit: query.limit,
        offset: query.offset,
    }
    .try_into_pagination()?;

    state
        .user_service
        .get_users_like_username(&query.username, pagination)
        .await
        .map_err(ApiError::from)
        .map(|users| {
            ApiSuccess::new(
                StatusCode::OK,
                users.iter().map(UserData::from).collect::<Vec<_>>(),
            )
        })
}
