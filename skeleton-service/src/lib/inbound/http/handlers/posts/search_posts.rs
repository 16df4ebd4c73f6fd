use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::PageQuery;
use crate::inbound::http::handlers::PostData;
use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchPostsQuery {
    pub keyword: String,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub async fn search_posts(
    State(state): State<AppState>,
    Query(query): Query<SearchPostsQuery>,
) -> Result<ApiSuccess<Vec<PostData>>, ApiError> {
    let pagination = PageQuery {
        limit: query.limit,
        offset: query.offset,
    }
    .try_into_pagination()?;

    state
        .post_service
        .get_posts_full_text(&query.keyword, pagination)
        .await
        .map_err(ApiError::from)
        .map(|posts| {
            ApiSuccess::new(
                StatusCode::OK,
                posts.iter().map(PostData::from).collect::<Vec<_>>(),
            )
        })
}
