use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::pagination::Pagination;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::OAuthProfile;
use crate::domain::user::models::Origin;
use crate::domain::user::models::Role;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }

    fn hash_password(&self, password: &str) -> Result<String, UserError> {
        self.password_hasher
            .hash(password)
            .map_err(|e| UserError::Hashing(e.to_string()))
    }

    async fn register_native(
        &self,
        command: CreateUserCommand,
        role: Role,
    ) -> Result<User, UserError> {
        let password_hash = self.hash_password(&command.password)?;

        let user = self
            .repository
            .create(NewUser {
                email: command.email,
                username: Some(command.username),
                password_hash: Some(password_hash),
                role,
                origin: Origin::Native,
                profile: OAuthProfile::default(),
            })
            .await?;

        tracing::info!(user_id = %user.id, role = %user.role, "Native user registered");

        Ok(user)
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        self.register_native(command, Role::User).await
    }

    async fn create_admin(&self, command: CreateUserCommand) -> Result<User, UserError> {
        self.register_native(command, Role::Admin).await
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn get_users_by_role(
        &self,
        role: Role,
        pagination: Pagination,
    ) -> Result<Vec<User>, UserError> {
        self.repository.find_by_role(role, pagination).await
    }

    async fn get_users_like_username(
        &self,
        fragment: &str,
        pagination: Pagination,
    ) -> Result<Vec<User>, UserError> {
        self.repository
            .search_by_username(fragment, pagination)
            .await
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        if let Some(new_email) = command.email {
            user.email = new_email;
        }

        if let Some(new_username) = command.username {
            user.username = Some(new_username);
        }

        if let Some(new_password) = command.password {
            user.password_hash = Some(self.hash_password(&new_password)?);
        }

        self.repository.update(user).await
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}
