//! Authentication primitives shared by the services of this workspace.
//!
//! - Password hashing (Argon2id, PHC strings)
//! - HS256 session tokens binding a user id to a role
//! - Signed, short-lived OAuth `state` values bound to a client nonce
//!
//! Services keep their own domain errors and adapt these types at their
//! boundaries.
//!
//! # Example
//! ```
//! use auth::Authenticator;
//! use auth::PasswordHasher;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", 24);
//!
//! let hash = PasswordHasher::new().hash("pw123").unwrap();
//! let token = auth.authenticate("pw123", &hash, 1, "user").unwrap();
//!
//! let claims = auth.validate_session(&token).unwrap();
//! assert_eq!(claims.sub, "1");
//! assert_eq!(claims.role, "user");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::IssuedState;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::SessionClaims;
pub use jwt::StateClaims;
pub use password::PasswordError;
pub use password::PasswordHasher;
