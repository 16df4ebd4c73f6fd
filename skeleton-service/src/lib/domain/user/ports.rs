use async_trait::async_trait;

use crate::domain::pagination::Pagination;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::Role;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a native account with role `user`.
    ///
    /// # Errors
    /// * `Hashing` - Password could not be hashed
    /// * `EmailAlreadyExists` / `UsernameAlreadyExists` - Unique key taken
    /// * `Persist` - Store write failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Register a native account with role `admin`. Same errors as `create_user`.
    async fn create_admin(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// # Errors
    /// * `NotFound` - User does not exist
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Users holding `role`, ordered by id. An empty page is not an error.
    async fn get_users_by_role(
        &self,
        role: Role,
        pagination: Pagination,
    ) -> Result<Vec<User>, UserError>;

    /// Users whose username contains `fragment`, ordered by id.
    async fn get_users_like_username(
        &self,
        fragment: &str,
        pagination: Pagination,
    ) -> Result<Vec<User>, UserError>;

    /// Read-modify-write of the optional fields in `command`.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Hashing` - New password could not be hashed
    /// * `EmailAlreadyExists` / `UsernameAlreadyExists` - Unique key taken
    async fn update_user(&self, id: &UserId, command: UpdateUserCommand)
        -> Result<User, UserError>;

    /// # Errors
    /// * `NotFound` - User does not exist
    async fn delete_user(&self, id: &UserId) -> Result<(), UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Insert a new user and return it with its assigned id and timestamps.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` / `EmailAlreadyExists` - Unique key taken
    /// * `Persist` - Store write failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    async fn find_by_role(&self, role: Role, pagination: Pagination)
        -> Result<Vec<User>, UserError>;

    /// Substring match on username. `fragment` is matched literally.
    async fn search_by_username(
        &self,
        fragment: &str,
        pagination: Pagination,
    ) -> Result<Vec<User>, UserError>;

    /// Overwrite the mutable columns of an existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `UsernameAlreadyExists` / `EmailAlreadyExists` - Unique key taken
    async fn update(&self, user: User) -> Result<User, UserError>;

    /// # Errors
    /// * `NotFound` - User does not exist
    async fn delete(&self, id: &UserId) -> Result<(), UserError>;
}
