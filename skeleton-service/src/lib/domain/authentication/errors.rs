use thiserror::Error;

/// Failure talking to an upstream OAuth identity provider.
#[derive(Debug, Clone, Error)]
pub enum IdentityProviderError {
    #[error("Request to identity provider failed: {0}")]
    Request(String),

    #[error("Identity provider rejected the request ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Unreadable identity provider response: {0}")]
    InvalidResponse(String),
}

/// Errors of the authentication flows.
#[derive(Debug, Clone, Error)]
pub enum AuthenticationError {
    #[error("No account matches the supplied email or username")]
    NotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email or username is required")]
    MissingIdentifier,

    #[error("Invalid OAuth state: {0}")]
    InvalidState(String),

    #[error("Identity provider error: {0}")]
    Provider(#[from] IdentityProviderError),

    #[error("Identity provider returned an unusable profile: {0}")]
    InvalidProfile(String),

    #[error("Account already exists: {0}")]
    AlreadyExists(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}
