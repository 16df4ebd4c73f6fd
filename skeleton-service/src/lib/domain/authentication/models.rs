use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::OAuthProfile;
use crate::domain::user::models::User;

/// Email and/or username a native login is looked up by.
///
/// When both are present the store prefers the email match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginIdentifier {
    email: Option<String>,
    username: Option<String>,
}

impl LoginIdentifier {
    /// Returns `None` when neither value is present after trimming.
    pub fn new(email: Option<String>, username: Option<String>) -> Option<Self> {
        let email = non_blank(email);
        let username = non_blank(username);

        if email.is_none() && username.is_none() {
            return None;
        }

        Some(Self { email, username })
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug)]
pub struct LoginCommand {
    pub identifier: LoginIdentifier,
    pub password: String,
}

/// Authenticated identity and the session token issued for it.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub token: String,
}

/// Provider consent URL plus the nonce the client must present on callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRequest {
    pub url: String,
    pub nonce: String,
}

/// Tokens returned by an OAuth provider's token endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderTokens {
    pub access_token: String,
    pub token_type: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
    pub id_token: Option<String>,
}

/// Profile reported by an OAuth provider's userinfo endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalIdentity {
    pub subject: Option<String>,
    pub email: Option<String>,
    /// Whether the provider has verified ownership of `email`.
    pub email_verified: bool,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub name: Option<String>,
    pub picture: Option<String>,
}

/// Outcome of an authorization-code exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderLogin {
    pub tokens: ProviderTokens,
    pub identity: ExternalIdentity,
}

/// Google identity to be matched to, or provisioned as, a local user.
#[derive(Debug, Clone, PartialEq)]
pub struct GoogleUserCandidate {
    pub email: EmailAddress,
    pub profile: OAuthProfile,
}

impl GoogleUserCandidate {
    /// Map a provider login onto a candidate.
    ///
    /// The email must be verified by the provider, since it is matched
    /// against existing local accounts. The last name falls back to the
    /// display name when the provider omits `family_name`.
    pub fn from_login(login: ProviderLogin) -> Result<Self, String> {
        let identity = login.identity;
        let email = identity
            .email
            .ok_or_else(|| "missing email".to_string())
            .and_then(|e| EmailAddress::new(e).map_err(|err| err.to_string()))?;

        if !identity.email_verified {
            return Err(format!("email {} is not verified", email));
        }

        Ok(Self {
            email,
            profile: OAuthProfile {
                first_name: identity.given_name,
                last_name: identity.family_name.or(identity.name),
                picture_url: identity.picture,
                refresh_token: login.tokens.refresh_token,
            },
        })
    }
}
