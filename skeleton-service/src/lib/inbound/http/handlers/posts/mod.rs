pub mod create_post;
pub mod get_posts_by_user;
pub mod search_posts;

pub use create_post::create_post;
pub use get_posts_by_user::get_posts_by_user;
pub use search_posts::search_posts;
