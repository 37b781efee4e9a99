use serde::{Deserialize, Serialize};

use crate::subscription::Subscription;

/// Identifier wrapper for provider-issued identities. Stable for the life of
/// the account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentityId(pub String);

/// The authenticated principal as reported by the auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: IdentityId,
    pub email: String,
    pub email_verified: bool,
}

/// Error enumeration for the auth collaborator. Display strings double as
/// the user-facing alert messages.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("email or password is incorrect")]
    InvalidCredential,
    #[error("this email address is already in use")]
    EmailAlreadyInUse,
    #[error("the email address is not valid")]
    InvalidEmail,
    #[error("too many attempts, please try again later")]
    TooManyRequests,
    #[error("authentication service unavailable: {0}")]
    Unavailable(String),
}

/// Contract for the hosted authentication provider.
///
/// `create_account` and `sign_in` both leave the provider signed in as the
/// returned identity; callers observing the verification gate are expected to
/// `sign_out` themselves. Identity changes fan out through [`subscribe`],
/// which delivers the current identity immediately on registration.
///
/// [`subscribe`]: AuthProvider::subscribe
#[async_trait::async_trait]
pub trait AuthProvider: Send + Sync {
    async fn create_account(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Ask the provider to deliver a verification email. Callers treat
    /// failures as non-fatal.
    async fn send_verification_email(&self, identity: &IdentityId) -> Result<(), AuthError>;

    async fn send_password_reset(&self, email: &str) -> Result<(), AuthError>;

    fn subscribe(&self) -> Subscription<Option<Identity>>;
}
