use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::user::models::Role;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::PageQuery;
use crate::inbound::http::handlers::UserData;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn get_users_by_role(
    State(state): State<AppState>,
    Path(role): Path<String>,
    Query(page): Query<PageQuery>,
) -> Result<ApiSuccess<Vec<UserData>>, ApiError> {
    let role = role.parse::<Role>().map_err(UserError::from)?;
    let pagination = page.try_into_pagination()?;

    state
        .user_service
        .get_users_by_role(role, pagination)
        .await
        .map_err(ApiError::from)
        .map(|users| {
            ApiSuccess::new(
                StatusCode::OK,
                users.iter().map(UserData::from).collect::<Vec<_>>(),
            )
        })
}
