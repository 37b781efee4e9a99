use std::sync::Arc;

use chrono::Utc;

use crate::auth::{Identity, IdentityId};
use crate::marketplace::applications::service::ApplicationService;
use crate::marketplace::jobs::{JobDraft, JobPosting, JobService};
use crate::marketplace::profiles::{Profile, Role};
pub(super) use crate::memory::{MemoryApplicationStore, MemoryJobStore, MemoryProfileStore};

pub(super) type Service =
    ApplicationService<MemoryApplicationStore, MemoryJobStore, MemoryProfileStore>;

pub(super) struct Fixture {
    pub(super) service: Arc<Service>,
    pub(super) applications: Arc<MemoryApplicationStore>,
    pub(super) jobs: Arc<MemoryJobStore>,
    pub(super) profiles: Arc<MemoryProfileStore>,
    pub(super) student: IdentityId,
    pub(super) employer: IdentityId,
    pub(super) job: JobPosting,
}

pub(super) fn profile(id: &str, email: &str, role: Role) -> Profile {
    let identity = Identity {
        id: IdentityId(id.to_string()),
        email: email.to_string(),
        email_verified: true,
    };
    let mut profile = Profile::initial(&identity, role, Utc::now());
    profile.is_profile_complete = true;
    profile
}

pub(super) fn student_profile(id: &str) -> Profile {
    let mut record = profile(id, &format!("{id}@umib.net"), Role::Student);
    record.display_name = "Agnesa Berisha".to_string();
    record.headline = "Computer science student".to_string();
    record.skills = vec!["JavaScript".to_string()];
    record
}

pub(super) fn employer_profile(id: &str) -> Profile {
    let mut record = profile(id, &format!("{id}@nexuslabs.example"), Role::Employer);
    record.display_name = "Nexus Labs".to_string();
    record.company_name = "Nexus Labs".to_string();
    record
}

pub(super) fn draft() -> JobDraft {
    JobDraft {
        title: "React Native Intern".to_string(),
        company: "Nexus Labs".to_string(),
        description: "Build and ship mobile features.".to_string(),
        salary: "350 EUR/month".to_string(),
        skills: vec!["React Native".to_string()],
    }
}

/// A student, an employer, and one active posting, ready for intake.
pub(super) async fn fixture() -> Fixture {
    let applications = Arc::new(MemoryApplicationStore::default());
    let jobs = Arc::new(MemoryJobStore::default());
    let profiles = Arc::new(MemoryProfileStore::default());

    let student = IdentityId("uid-student".to_string());
    let employer = IdentityId("uid-employer".to_string());
    profiles.seed(student_profile("uid-student"));
    profiles.seed(employer_profile("uid-employer"));

    let job_service = JobService::new(jobs.clone(), profiles.clone());
    let job = job_service
        .post(&employer, draft())
        .await
        .expect("fixture job posts");

    let service = Arc::new(ApplicationService::new(
        applications.clone(),
        jobs.clone(),
        profiles.clone(),
    ));

    Fixture {
        service,
        applications,
        jobs,
        profiles,
        student,
        employer,
        job,
    }
}
