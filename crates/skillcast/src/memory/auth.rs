use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use crate::auth::{AuthError, AuthProvider, Identity, IdentityId};
use crate::subscription::{Listeners, Subscription};

#[derive(Debug, Clone)]
struct AccountRecord {
    id: IdentityId,
    email: String,
    password: String,
    verified: bool,
}

impl AccountRecord {
    fn identity(&self) -> Identity {
        Identity {
            id: self.id.clone(),
            email: self.email.clone(),
            email_verified: self.verified,
        }
    }
}

/// In-memory stand-in for the hosted auth collaborator.
///
/// Mirrors the provider's observable behavior: `create_account` and
/// `sign_in` leave the session signed in as the returned identity, and every
/// session change fans out to identity subscribers.
#[derive(Default)]
pub struct MemoryAuthProvider {
    accounts: Mutex<HashMap<String, AccountRecord>>,
    current: Mutex<Option<Identity>>,
    listeners: Listeners<(), Option<Identity>>,
    sequence: AtomicU64,
    verification_outbox: Mutex<Vec<String>>,
    reset_outbox: Mutex<Vec<String>>,
    fail_verification_sends: AtomicBool,
}

impl MemoryAuthProvider {
    /// Mark the account's email address as verified, as if the owner clicked
    /// the link in the verification email.
    pub fn verify_email(&self, email: &str) -> Result<(), AuthError> {
        let mut accounts = self.accounts.lock().expect("account mutex poisoned");
        let record = accounts
            .get_mut(&normalize(email))
            .ok_or(AuthError::InvalidCredential)?;
        record.verified = true;
        Ok(())
    }

    pub fn account_count(&self) -> usize {
        self.accounts.lock().expect("account mutex poisoned").len()
    }

    /// Addresses a verification email was sent to, in order.
    pub fn sent_verifications(&self) -> Vec<String> {
        self.verification_outbox
            .lock()
            .expect("outbox mutex poisoned")
            .clone()
    }

    pub fn sent_password_resets(&self) -> Vec<String> {
        self.reset_outbox
            .lock()
            .expect("outbox mutex poisoned")
            .clone()
    }

    /// Make every later `send_verification_email` fail, for exercising the
    /// best-effort path.
    pub fn break_verification_delivery(&self) {
        self.fail_verification_sends.store(true, Ordering::Relaxed);
    }

    pub fn identity_listener_count(&self) -> usize {
        self.listeners.active()
    }

    fn set_current(&self, identity: Option<Identity>) {
        *self.current.lock().expect("session mutex poisoned") = identity.clone();
        self.listeners.notify(&(), identity);
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

#[async_trait::async_trait]
impl AuthProvider for MemoryAuthProvider {
    async fn create_account(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let key = normalize(email);
        if !key.contains('@') {
            return Err(AuthError::InvalidEmail);
        }

        let identity = {
            let mut accounts = self.accounts.lock().expect("account mutex poisoned");
            if accounts.contains_key(&key) {
                return Err(AuthError::EmailAlreadyInUse);
            }

            let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
            let record = AccountRecord {
                id: IdentityId(format!("uid-{id:04}")),
                email: email.trim().to_string(),
                password: password.to_string(),
                verified: false,
            };
            let identity = record.identity();
            accounts.insert(key, record);
            identity
        };

        self.set_current(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let identity = {
            let accounts = self.accounts.lock().expect("account mutex poisoned");
            let record = accounts
                .get(&normalize(email))
                .ok_or(AuthError::InvalidCredential)?;
            if record.password != password {
                return Err(AuthError::InvalidCredential);
            }
            record.identity()
        };

        self.set_current(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.set_current(None);
        Ok(())
    }

    async fn send_verification_email(&self, identity: &IdentityId) -> Result<(), AuthError> {
        if self.fail_verification_sends.load(Ordering::Relaxed) {
            return Err(AuthError::Unavailable("mail transport offline".to_string()));
        }

        let accounts = self.accounts.lock().expect("account mutex poisoned");
        let record = accounts
            .values()
            .find(|record| record.id == *identity)
            .ok_or(AuthError::InvalidCredential)?;
        self.verification_outbox
            .lock()
            .expect("outbox mutex poisoned")
            .push(record.email.clone());
        Ok(())
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), AuthError> {
        let accounts = self.accounts.lock().expect("account mutex poisoned");
        if !accounts.contains_key(&normalize(email)) {
            return Err(AuthError::InvalidCredential);
        }
        self.reset_outbox
            .lock()
            .expect("outbox mutex poisoned")
            .push(email.trim().to_string());
        Ok(())
    }

    fn subscribe(&self) -> Subscription<Option<Identity>> {
        let current = self.current.lock().expect("session mutex poisoned").clone();
        self.listeners.subscribe((), current)
    }
}
