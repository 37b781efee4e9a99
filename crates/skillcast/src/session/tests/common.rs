use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::auth::CredentialPolicy;
use crate::marketplace::profiles::Role;
use crate::memory::{MemoryAuthProvider, MemoryProfileStore};
use crate::session::{Session, SessionSnapshot};

pub(super) struct Fixture {
    pub(super) session: Arc<Session>,
    pub(super) provider: Arc<MemoryAuthProvider>,
    pub(super) profiles: Arc<MemoryProfileStore>,
}

pub(super) fn fixture() -> Fixture {
    let provider = Arc::new(MemoryAuthProvider::default());
    let profiles = Arc::new(MemoryProfileStore::default());
    let session = Arc::new(Session::start(
        provider.clone(),
        profiles.clone(),
        CredentialPolicy::default(),
    ));
    Fixture {
        session,
        provider,
        profiles,
    }
}

/// Register a verified account, leaving the device signed out.
pub(super) async fn register_verified(fixture: &Fixture, email: &str, role: Role) {
    fixture
        .session
        .sign_up(email, "Abc123", role)
        .await
        .expect("signup succeeds");
    fixture
        .provider
        .verify_email(email)
        .expect("account is verifiable");
}

/// Block until the holder publishes a snapshot matching the predicate. The
/// worker task applies identity and profile events asynchronously, so tests
/// observe state through the watch channel rather than immediately after an
/// operation returns.
pub(super) async fn wait_until<F>(
    receiver: &mut watch::Receiver<SessionSnapshot>,
    predicate: F,
) -> SessionSnapshot
where
    F: Fn(&SessionSnapshot) -> bool,
{
    tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            {
                let current = receiver.borrow();
                if predicate(&current) {
                    return current.clone();
                }
            }
            receiver
                .changed()
                .await
                .expect("session stream stays open");
        }
    })
    .await
    .expect("snapshot settles before the deadline")
}
