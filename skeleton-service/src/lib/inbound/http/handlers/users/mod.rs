pub mod delete_user;
pub mod get_user;
pub mod get_users_by_role;
pub mod search_users;
pub mod signup;
pub mod update_user;

pub use delete_user::delete_user;
pub use get_user::get_user;
pub use get_users_by_role::get_users_by_role;
pub use search_users::search_users;
pub use signup::signup;
pub use signup::signup_admin;
pub use update_user::update_user;
