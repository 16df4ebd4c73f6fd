pub mod events;
pub mod oauth;
pub mod repositories;
