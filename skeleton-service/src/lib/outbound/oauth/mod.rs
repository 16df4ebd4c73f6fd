pub mod client;

pub use client::OAuthClient;
