use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use skillcast::auth::CredentialPolicy;
use skillcast::config::AppConfig;
use skillcast::marketplace::applications::ApplicationService;
use skillcast::marketplace::jobs::JobService;
use skillcast::marketplace::profiles::ProfileService;
use skillcast::memory::{
    MemoryApplicationStore, MemoryAuthProvider, MemoryJobStore, MemoryProfileStore,
};
use skillcast::session::Session;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type Profiles = ProfileService<MemoryProfileStore>;
pub(crate) type Jobs = JobService<MemoryJobStore, MemoryProfileStore>;
pub(crate) type Applications =
    ApplicationService<MemoryApplicationStore, MemoryJobStore, MemoryProfileStore>;

/// In-memory stand-ins for the hosted collaborators, wired into the session
/// holder and the marketplace services.
pub(crate) struct Backend {
    pub(crate) provider: Arc<MemoryAuthProvider>,
    pub(crate) session: Arc<Session>,
    pub(crate) profiles: Arc<Profiles>,
    pub(crate) jobs: Arc<Jobs>,
    pub(crate) applications: Arc<Applications>,
}

impl Backend {
    /// Must run inside a runtime: the session holder spawns its worker task.
    pub(crate) fn bootstrap(config: &AppConfig) -> Self {
        let provider = Arc::new(MemoryAuthProvider::default());
        let profile_store = Arc::new(MemoryProfileStore::default());
        let job_store = Arc::new(MemoryJobStore::default());
        let application_store = Arc::new(MemoryApplicationStore::default());

        let session = Arc::new(Session::start(
            provider.clone(),
            profile_store.clone(),
            CredentialPolicy::from(&config.signup),
        ));

        Backend {
            provider,
            session,
            profiles: Arc::new(ProfileService::new(profile_store.clone())),
            jobs: Arc::new(JobService::new(job_store.clone(), profile_store.clone())),
            applications: Arc::new(ApplicationService::new(
                application_store,
                job_store,
                profile_store,
            )),
        }
    }
}
