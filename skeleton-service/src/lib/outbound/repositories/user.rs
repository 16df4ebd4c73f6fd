use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::authentication::errors::AuthenticationError;
use crate::domain::authentication::models::LoginIdentifier;
use crate::domain::authentication::ports::AuthenticationRepository;
use crate::domain::pagination::Pagination;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::OAuthProfile;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const USER_COLUMNS: &str = "id, created_at, updated_at, deleted_at, email, username, \
     password_hash, role, origin, first_name, last_name, picture_url, refresh_token";

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
    email: String,
    username: Option<String>,
    password_hash: Option<String>,
    role: String,
    origin: String,
    first_name: Option<String>,
    last_name: Option<String>,
    picture_url: Option<String>,
    refresh_token: Option<String>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            email: EmailAddress::new(row.email)?,
            username: row.username.map(Username::new).transpose()?,
            password_hash: row.password_hash,
            role: row.role.parse()?,
            origin: row.origin.parse()?,
            profile: OAuthProfile {
                first_name: row.first_name,
                last_name: row.last_name,
                picture_url: row.picture_url,
                refresh_token: row.refresh_token,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }
}

/// Escape LIKE metacharacters so a fragment is matched literally.
fn like_pattern(fragment: &str) -> String {
    let escaped = fragment
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Map unique violations on insert/update to the matching domain conflict.
fn write_error(e: sqlx::Error, email: &EmailAddress, username: Option<&Username>) -> UserError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            match db_err.constraint() {
                Some("users_email_key") => {
                    return UserError::EmailAlreadyExists(email.to_string());
                }
                Some("users_username_key") => {
                    return UserError::UsernameAlreadyExists(
                        username.map(|u| u.to_string()).unwrap_or_default(),
                    );
                }
                _ => {}
            }
        }
    }
    UserError::Persist(e.to_string())
}

fn read_error(e: sqlx::Error) -> UserError {
    UserError::Unexpected(e.to_string())
}

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_where(
        &self,
        predicate: &str,
        value: &str,
    ) -> Result<Option<User>, UserError> {
        let query = format!(
            "SELECT {} FROM users WHERE {} AND deleted_at IS NULL",
            USER_COLUMNS, predicate
        );

        sqlx::query_as::<_, UserRow>(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(read_error)?
            .map(User::try_from)
            .transpose()
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let query = format!(
            r#"
            INSERT INTO users (email, username, password_hash, role, origin,
                               first_name, last_name, picture_url, refresh_token)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(user.email.as_str())
            .bind(user.username.as_ref().map(|u| u.as_str()))
            .bind(user.password_hash.as_deref())
            .bind(user.role.as_str())
            .bind(user.origin.as_str())
            .bind(user.profile.first_name.as_deref())
            .bind(user.profile.last_name.as_deref())
            .bind(user.profile.picture_url.as_deref())
            .bind(user.profile.refresh_token.as_deref())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| write_error(e, &user.email, user.username.as_ref()))?;

        User::try_from(row)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let query = format!(
            "SELECT {} FROM users WHERE id = $1 AND deleted_at IS NULL",
            USER_COLUMNS
        );

        sqlx::query_as::<_, UserRow>(&query)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(read_error)?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_role(
        &self,
        role: Role,
        pagination: Pagination,
    ) -> Result<Vec<User>, UserError> {
        // A NULL limit is no limit in Postgres.
        let query = format!(
            r#"
            SELECT {} FROM users
            WHERE role = $1 AND deleted_at IS NULL
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
            USER_COLUMNS
        );

        sqlx::query_as::<_, UserRow>(&query)
            .bind(role.as_str())
            .bind(pagination.limit)
            .bind(pagination.offset)
            .fetch_all(&self.pool)
            .await
            .map_err(read_error)?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    async fn search_by_username(
        &self,
        fragment: &str,
        pagination: Pagination,
    ) -> Result<Vec<User>, UserError> {
        let query = format!(
            r#"
            SELECT {} FROM users
            WHERE username LIKE $1 AND deleted_at IS NULL
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
            USER_COLUMNS
        );

        sqlx::query_as::<_, UserRow>(&query)
            .bind(like_pattern(fragment))
            .bind(pagination.limit)
            .bind(pagination.offset)
            .fetch_all(&self.pool)
            .await
            .map_err(read_error)?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let query = format!(
            r#"
            UPDATE users
            SET email = $2, username = $3, password_hash = $4, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(user.id.as_i64())
            .bind(user.email.as_str())
            .bind(user.username.as_ref().map(|u| u.as_str()))
            .bind(user.password_hash.as_deref())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| write_error(e, &user.email, user.username.as_ref()))?
            .ok_or_else(|| UserError::NotFound(user.id.to_string()))?;

        User::try_from(row)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| UserError::Persist(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

#[async_trait]
impl AuthenticationRepository for PostgresUserRepository {
    async fn find_by_login(
        &self,
        identifier: &LoginIdentifier,
    ) -> Result<Option<User>, AuthenticationError> {
        let query = format!(
            r#"
            SELECT {} FROM users
            WHERE deleted_at IS NULL
              AND (email = $1 OR username = $2)
            ORDER BY (email = $1) IS TRUE DESC
            LIMIT 1
            "#,
            USER_COLUMNS
        );

        sqlx::query_as::<_, UserRow>(&query)
            .bind(identifier.email())
            .bind(identifier.username())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AuthenticationError::Unexpected(e.to_string()))?
            .map(User::try_from)
            .transpose()
            .map_err(|e| AuthenticationError::Unexpected(e.to_string()))
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, AuthenticationError> {
        self.fetch_one_where("email = $1", email.as_str())
            .await
            .map_err(|e| AuthenticationError::Unexpected(e.to_string()))
    }

    async fn create_user(&self, user: NewUser) -> Result<User, AuthenticationError> {
        UserRepository::create(self, user).await.map_err(|e| match e {
            UserError::EmailAlreadyExists(email) => AuthenticationError::AlreadyExists(email),
            UserError::UsernameAlreadyExists(name) => AuthenticationError::AlreadyExists(name),
            other => AuthenticationError::Unexpected(other.to_string()),
        })
    }
}
