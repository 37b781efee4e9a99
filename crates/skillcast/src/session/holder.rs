use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::auth::{
    AuthError, AuthProvider, CredentialPolicy, CredentialViolation, Identity, IdentityId,
};
use crate::marketplace::profiles::{Profile, ProfileStore, Role};
use crate::marketplace::StoreError;
use crate::subscription::Subscription;

use super::flow::Flow;
use super::snapshot::SessionSnapshot;

/// Error raised by the session operations. Display strings double as the
/// user-facing alert messages.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("please verify your email before signing in")]
    UnverifiedEmail,
    #[error(transparent)]
    Policy(#[from] CredentialViolation),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The session state holder.
///
/// Owns the subscription to the auth collaborator's identity stream and, for
/// the signed-in identity, exactly one live subscription to the matching
/// profile record. The combined [`SessionSnapshot`] fans out through a watch
/// channel; [`Flow::for_snapshot`] re-evaluates on every change.
pub struct Session {
    provider: Arc<dyn AuthProvider>,
    profiles: Arc<dyn ProfileStore>,
    policy: CredentialPolicy,
    state: Arc<watch::Sender<SessionSnapshot>>,
    worker: JoinHandle<()>,
}

impl Session {
    /// Start the holder. Must be called from within a runtime; the identity
    /// stream is consumed on a background task for the life of the session.
    pub fn start(
        provider: Arc<dyn AuthProvider>,
        profiles: Arc<dyn ProfileStore>,
        policy: CredentialPolicy,
    ) -> Self {
        let (sender, _) = watch::channel(SessionSnapshot::default());
        let state = Arc::new(sender);
        let worker = tokio::spawn(drive(provider.clone(), profiles.clone(), state.clone()));

        Self {
            provider,
            profiles,
            policy,
            state,
            worker,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    pub fn flow(&self) -> Flow {
        Flow::for_snapshot(&self.state.borrow())
    }

    /// Register a new account.
    ///
    /// Pre-flight policy first, so a rejected signup never reaches the
    /// provider. On success the initial profile record is written, a
    /// verification email is requested best-effort, and the fresh session is
    /// signed out again: nothing proceeds past the login flow until the
    /// address is verified.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<(), SessionError> {
        self.policy.validate_signup(email, password, role)?;

        let identity = self.provider.create_account(email, password).await?;
        let profile = Profile::initial(&identity, role, chrono::Utc::now());
        self.profiles.create(profile).await?;

        if let Err(error) = self.provider.send_verification_email(&identity.id).await {
            warn!(%error, email, "verification email could not be sent");
        }

        self.provider.sign_out().await?;
        info!(email, role = %role, "account registered, awaiting verification");
        Ok(())
    }

    /// Sign in, enforcing the verification gate: an unverified identity is
    /// signed out again immediately so the session cannot linger.
    pub async fn log_in(&self, email: &str, password: &str) -> Result<Identity, SessionError> {
        self.policy.validate_login(email, password)?;

        let identity = self.provider.sign_in(email, password).await?;
        if !identity.email_verified {
            self.provider.sign_out().await?;
            return Err(SessionError::UnverifiedEmail);
        }

        Ok(identity)
    }

    /// Sign out. The held profile is cleared eagerly, before the provider
    /// round-trip, so no stale screen renders while the sign-out is in
    /// flight. Safe to call repeatedly.
    pub async fn log_out(&self) -> Result<(), SessionError> {
        self.state.send_modify(SessionSnapshot::clear_profile);
        self.provider.sign_out().await?;
        Ok(())
    }

    pub async fn request_password_reset(&self, email: &str) -> Result<(), SessionError> {
        self.provider.send_password_reset(email).await?;
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        // Dropping the worker's subscriptions runs their retained
        // unsubscribe callbacks.
        self.worker.abort();
    }
}

async fn drive(
    provider: Arc<dyn AuthProvider>,
    profiles: Arc<dyn ProfileStore>,
    state: Arc<watch::Sender<SessionSnapshot>>,
) {
    let mut identities = provider.subscribe();
    let mut profile_feed: Option<Subscription<Option<Profile>>> = None;
    let mut current_user: Option<IdentityId> = None;

    loop {
        tokio::select! {
            event = identities.next() => {
                let Some(event) = event else { break };
                match event {
                    Some(identity) => {
                        if current_user.as_ref() != Some(&identity.id) {
                            // Replacing the handle tears the previous
                            // listener down before the new one is live.
                            profile_feed = Some(profiles.watch(&identity.id));
                            current_user = Some(identity.id.clone());
                        }
                        state.send_modify(|snapshot| snapshot.apply_identity(Some(identity)));
                    }
                    None => {
                        profile_feed = None;
                        current_user = None;
                        state.send_modify(|snapshot| snapshot.apply_identity(None));
                    }
                }
            }
            update = next_profile(&mut profile_feed), if profile_feed.is_some() => {
                match update {
                    Some(profile) => {
                        state.send_modify(|snapshot| snapshot.apply_profile(profile));
                    }
                    None => profile_feed = None,
                }
            }
        }
    }
}

async fn next_profile(
    feed: &mut Option<Subscription<Option<Profile>>>,
) -> Option<Option<Profile>> {
    match feed {
        Some(subscription) => subscription.next().await,
        None => std::future::pending().await,
    }
}
