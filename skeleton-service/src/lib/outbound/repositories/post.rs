use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::pagination::Pagination;
use crate::domain::post::errors::PostError;
use crate::domain::post::models::NewPost;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::ports::PostRepository;
use crate::domain::user::models::UserId;

#[derive(Debug, FromRow)]
struct PostRow {
    id: i64,
    user_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
    title: String,
    content: String,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: PostId(row.id),
            user_id: UserId(row.user_id),
            title: row.title,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, PostError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (user_id, title, content)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, created_at, updated_at, deleted_at, title, content
            "#,
        )
        .bind(post.user_id.as_i64())
        .bind(&post.title)
        .bind(&post.content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let owner_missing = e
                .as_database_error()
                .is_some_and(|db_err| db_err.is_foreign_key_violation());

            if owner_missing {
                PostError::OwnerNotFound(post.user_id.to_string())
            } else {
                PostError::Persist(e.to_string())
            }
        })?;

        Ok(row.into())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Post>, PostError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, user_id, created_at, updated_at, deleted_at, title, content
            FROM posts
            WHERE user_id = $1 AND deleted_at IS NULL
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PostError::Unexpected(e.to_string()))?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn search_full_text(
        &self,
        keyword: &str,
        pagination: Pagination,
    ) -> Result<Vec<Post>, PostError> {
        // Must match the expression of the GIN index in the migration.
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, user_id, created_at, updated_at, deleted_at, title, content
            FROM posts
            WHERE deleted_at IS NULL
              AND to_tsvector('english', title || ' ' || content)
                  @@ websearch_to_tsquery('english', $1)
            ORDER BY ts_rank(to_tsvector('english', title || ' ' || content),
                             websearch_to_tsquery('english', $1)) DESC,
                     id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(keyword)
        .bind(pagination.limit)
        .bind(pagination.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PostError::Unexpected(e.to_string()))?;

        Ok(rows.into_iter().map(Post::from).collect())
    }
}
