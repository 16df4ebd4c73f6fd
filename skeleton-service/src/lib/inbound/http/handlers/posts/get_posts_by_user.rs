use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::post::ports::PostServicePort;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::PostData;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn get_posts_by_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<Vec<PostData>>, ApiError> {
    let user_id = UserId::from_string(&id).map_err(UserError::from)?;

    state
        .post_service
        .get_posts_by_user(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|posts| {
            ApiSuccess::new(
                StatusCode::OK,
                posts.iter().map(PostData::from).collect::<Vec<_>>(),
            )
        })
}
