//! End-to-end session scenarios: registration, the verification gate, and
//! profile completion driving the screen-flow decisions through the public
//! crate surface.

mod common {
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::sync::watch;

    use skillcast::auth::CredentialPolicy;
    use skillcast::marketplace::profiles::ProfileService;
    use skillcast::memory::{MemoryAuthProvider, MemoryProfileStore};
    use skillcast::session::{Flow, Session, SessionSnapshot};

    pub(super) struct Harness {
        pub(super) session: Arc<Session>,
        pub(super) provider: Arc<MemoryAuthProvider>,
        pub(super) profiles: ProfileService<MemoryProfileStore>,
    }

    pub(super) fn boot() -> Harness {
        let provider = Arc::new(MemoryAuthProvider::default());
        let store = Arc::new(MemoryProfileStore::default());
        let session = Arc::new(Session::start(
            provider.clone(),
            store.clone(),
            CredentialPolicy::default(),
        ));
        Harness {
            session,
            provider,
            profiles: ProfileService::new(store),
        }
    }

    pub(super) async fn wait_for_flow(
        receiver: &mut watch::Receiver<SessionSnapshot>,
        want: Flow,
    ) -> SessionSnapshot {
        tokio::time::timeout(Duration::from_secs(2), async {
            loop {
                {
                    let current = receiver.borrow();
                    if Flow::for_snapshot(&current) == want {
                        return current.clone();
                    }
                }
                receiver.changed().await.expect("session stream open");
            }
        })
        .await
        .unwrap_or_else(|_| panic!("session never reached {}", want.label()))
    }
}

use common::{boot, wait_for_flow};
use skillcast::marketplace::profiles::{EmployerProfileForm, Role, StudentProfileForm};
use skillcast::session::{Flow, SessionError};

#[tokio::test]
async fn student_journey_from_registration_to_home() {
    let harness = boot();

    harness
        .session
        .sign_up("agnesa@umib.net", "Abc123", Role::Student)
        .await
        .expect("registration succeeds");

    // The verification gate blocks the first login attempt.
    match harness.session.log_in("agnesa@umib.net", "Abc123").await {
        Err(SessionError::UnverifiedEmail) => {}
        other => panic!("expected the verification gate, got {other:?}"),
    }

    harness
        .provider
        .verify_email("agnesa@umib.net")
        .expect("verification link works");
    let identity = harness
        .session
        .log_in("agnesa@umib.net", "Abc123")
        .await
        .expect("verified login succeeds");

    let mut receiver = harness.session.subscribe();
    wait_for_flow(&mut receiver, Flow::CompleteStudentProfile).await;

    // Completing the profile flips the live subscription straight to home;
    // no further session call is needed.
    harness
        .profiles
        .complete_student_profile(
            &identity.id,
            StudentProfileForm {
                first_name: "Agnesa".to_string(),
                last_name: "Berisha".to_string(),
                headline: "Computer science student".to_string(),
                about: String::new(),
                portfolio_url: String::new(),
                skills: vec!["JavaScript".to_string()],
            },
        )
        .await
        .expect("profile completes");
    let snapshot = wait_for_flow(&mut receiver, Flow::StudentHome).await;
    assert_eq!(
        snapshot.profile.expect("profile present").display_name,
        "Agnesa Berisha",
    );

    harness.session.log_out().await.expect("logout succeeds");
    wait_for_flow(&mut receiver, Flow::Login).await;
}

#[tokio::test]
async fn employer_journey_reaches_the_employer_dashboard() {
    let harness = boot();

    harness
        .session
        .sign_up("hr@nexuslabs.example", "Abc123", Role::Employer)
        .await
        .expect("registration succeeds");
    harness
        .provider
        .verify_email("hr@nexuslabs.example")
        .expect("verification link works");
    let identity = harness
        .session
        .log_in("hr@nexuslabs.example", "Abc123")
        .await
        .expect("verified login succeeds");

    let mut receiver = harness.session.subscribe();
    wait_for_flow(&mut receiver, Flow::CompleteEmployerProfile).await;

    harness
        .profiles
        .complete_employer_profile(
            &identity.id,
            EmployerProfileForm {
                company_name: "Nexus Labs".to_string(),
                industry: "Software Development".to_string(),
                location: "Mitrovica, Kosovo".to_string(),
                website: String::new(),
                description: "Product studio hiring junior engineers.".to_string(),
            },
        )
        .await
        .expect("profile completes");

    let snapshot = wait_for_flow(&mut receiver, Flow::EmployerHome).await;
    assert_eq!(
        snapshot.profile.expect("profile present").display_name,
        "Nexus Labs",
    );
}
