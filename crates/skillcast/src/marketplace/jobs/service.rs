use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use crate::auth::IdentityId;
use crate::marketplace::profiles::{ProfileStore, Role};
use crate::marketplace::StoreError;

use super::domain::{JobDraft, JobId, JobPosting, JobViolation};
use super::repository::JobStore;

/// Service composing the posting rules, the jobs store, and the owning
/// employer's profile record.
pub struct JobService<S, P> {
    jobs: Arc<S>,
    profiles: Arc<P>,
}

static JOB_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_job_id() -> JobId {
    let id = JOB_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    JobId(format!("job-{id:06}"))
}

impl<S, P> JobService<S, P>
where
    S: JobStore + 'static,
    P: ProfileStore + 'static,
{
    pub fn new(jobs: Arc<S>, profiles: Arc<P>) -> Self {
        Self { jobs, profiles }
    }

    /// Publish a new posting on behalf of the employer.
    pub async fn post(
        &self,
        employer: &IdentityId,
        draft: JobDraft,
    ) -> Result<JobPosting, JobServiceError> {
        draft.validate()?;

        let profile = self
            .profiles
            .fetch(employer)
            .await?
            .ok_or(StoreError::NotFound)?;
        if profile.role != Role::Employer {
            return Err(JobViolation::NotAnEmployer.into());
        }

        let job = JobPosting {
            id: next_job_id(),
            employer_id: profile.id.clone(),
            employer_email: profile.email.clone(),
            company: draft.company.trim().to_string(),
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            salary: draft.salary.trim().to_string(),
            skills: draft.skills,
            is_active: true,
            created_at: Utc::now(),
        };

        let stored = self.jobs.insert(job).await?;
        Ok(stored)
    }

    /// The student-facing board: active postings, newest first.
    pub async fn board(&self) -> Result<Vec<JobPosting>, JobServiceError> {
        let jobs = self.jobs.active().await?;
        Ok(jobs)
    }

    pub async fn fetch(&self, id: &JobId) -> Result<JobPosting, JobServiceError> {
        let job = self.jobs.fetch(id).await?.ok_or(StoreError::NotFound)?;
        Ok(job)
    }

    pub async fn listings(&self, employer: &IdentityId) -> Result<Vec<JobPosting>, JobServiceError> {
        let jobs = self.jobs.by_employer(employer).await?;
        Ok(jobs)
    }

    /// Take a posting off the board. Records are never deleted; the flag is
    /// the whole lifecycle.
    pub async fn close(
        &self,
        id: &JobId,
        employer: &IdentityId,
    ) -> Result<JobPosting, JobServiceError> {
        let mut job = self.jobs.fetch(id).await?.ok_or(StoreError::NotFound)?;
        if job.employer_id != *employer {
            return Err(StoreError::PermissionDenied.into());
        }

        job.is_active = false;
        self.jobs.save(job.clone()).await?;
        Ok(job)
    }
}

/// Error raised by the job service.
#[derive(Debug, thiserror::Error)]
pub enum JobServiceError {
    #[error(transparent)]
    Validation(#[from] JobViolation),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Identity;
    use crate::marketplace::profiles::Profile;
    use crate::memory::{MemoryJobStore, MemoryProfileStore};

    fn profile(id: &str, email: &str, role: Role) -> Profile {
        let identity = Identity {
            id: IdentityId(id.to_string()),
            email: email.to_string(),
            email_verified: true,
        };
        let mut profile = Profile::initial(&identity, role, Utc::now());
        profile.is_profile_complete = true;
        profile
    }

    fn draft() -> JobDraft {
        JobDraft {
            title: "React Native Intern".to_string(),
            company: "Nexus Labs".to_string(),
            description: "Build and ship mobile features.".to_string(),
            salary: "350 EUR/month".to_string(),
            skills: vec!["React Native".to_string(), "JavaScript".to_string()],
        }
    }

    fn build_service() -> (
        JobService<MemoryJobStore, MemoryProfileStore>,
        Arc<MemoryJobStore>,
        Arc<MemoryProfileStore>,
    ) {
        let jobs = Arc::new(MemoryJobStore::default());
        let profiles = Arc::new(MemoryProfileStore::default());
        (JobService::new(jobs.clone(), profiles.clone()), jobs, profiles)
    }

    #[tokio::test]
    async fn posting_stores_an_active_job_with_employer_contact() {
        let (service, _, profiles) = build_service();
        profiles.seed(profile("uid-2", "hr@nexuslabs.example", Role::Employer));

        let job = service
            .post(&IdentityId("uid-2".to_string()), draft())
            .await
            .expect("posting succeeds");

        assert!(job.is_active);
        assert_eq!(job.employer_email, "hr@nexuslabs.example");
        assert_eq!(service.board().await.expect("board loads").len(), 1);
    }

    #[tokio::test]
    async fn posting_requires_an_employer_account() {
        let (service, _, profiles) = build_service();
        profiles.seed(profile("uid-1", "agnesa@umib.net", Role::Student));

        match service.post(&IdentityId("uid-1".to_string()), draft()).await {
            Err(JobServiceError::Validation(JobViolation::NotAnEmployer)) => {}
            other => panic!("expected employer-only violation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn posting_validates_required_fields_before_any_write() {
        let (service, jobs, profiles) = build_service();
        profiles.seed(profile("uid-2", "hr@nexuslabs.example", Role::Employer));

        let mut incomplete = draft();
        incomplete.salary = "  ".to_string();

        match service
            .post(&IdentityId("uid-2".to_string()), incomplete)
            .await
        {
            Err(JobServiceError::Validation(JobViolation::IncompleteForm)) => {}
            other => panic!("expected incomplete form violation, got {other:?}"),
        }
        assert!(jobs.active().await.expect("board loads").is_empty());
    }

    #[tokio::test]
    async fn closed_jobs_leave_the_board_but_stay_fetchable() {
        let (service, _, profiles) = build_service();
        profiles.seed(profile("uid-2", "hr@nexuslabs.example", Role::Employer));
        let employer = IdentityId("uid-2".to_string());

        let job = service.post(&employer, draft()).await.expect("posted");
        let closed = service.close(&job.id, &employer).await.expect("closed");

        assert!(!closed.is_active);
        assert!(service.board().await.expect("board loads").is_empty());
        let fetched = service.fetch(&job.id).await.expect("still fetchable");
        assert!(!fetched.is_active);
    }

    #[tokio::test]
    async fn only_the_owner_can_close_a_posting() {
        let (service, _, profiles) = build_service();
        profiles.seed(profile("uid-2", "hr@nexuslabs.example", Role::Employer));
        profiles.seed(profile("uid-3", "talent@rival.example", Role::Employer));
        let owner = IdentityId("uid-2".to_string());

        let job = service.post(&owner, draft()).await.expect("posted");

        match service.close(&job.id, &IdentityId("uid-3".to_string())).await {
            Err(JobServiceError::Store(StoreError::PermissionDenied)) => {}
            other => panic!("expected permission denial, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn listings_include_closed_postings() {
        let (service, _, profiles) = build_service();
        profiles.seed(profile("uid-2", "hr@nexuslabs.example", Role::Employer));
        let employer = IdentityId("uid-2".to_string());

        let job = service.post(&employer, draft()).await.expect("posted");
        service.close(&job.id, &employer).await.expect("closed");

        // The board hides retired postings; the owner's listing view keeps
        // the full history.
        assert!(service.board().await.expect("board loads").is_empty());
        let listings = service.listings(&employer).await.expect("listings load");
        assert_eq!(listings.len(), 1);
        assert!(!listings[0].is_active);
    }

    #[tokio::test]
    async fn board_orders_newest_first() {
        let (service, _, profiles) = build_service();
        profiles.seed(profile("uid-2", "hr@nexuslabs.example", Role::Employer));
        let employer = IdentityId("uid-2".to_string());

        let first = service.post(&employer, draft()).await.expect("posted");
        let mut second_draft = draft();
        second_draft.title = "QA Intern".to_string();
        let second = service.post(&employer, second_draft).await.expect("posted");

        let board = service.board().await.expect("board loads");
        let ids: Vec<_> = board.iter().map(|job| job.id.clone()).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }
}
