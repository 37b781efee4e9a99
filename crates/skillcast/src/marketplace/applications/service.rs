use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use crate::auth::IdentityId;
use crate::marketplace::jobs::{JobId, JobStore};
use crate::marketplace::profiles::{ProfileStore, Role};
use crate::marketplace::StoreError;
use crate::subscription::Subscription;

use super::domain::{
    ApplicantView, Application, ApplicationId, ApplicationStatus, ApplicationViolation,
};
use super::repository::ApplicationStore;

/// Service composing the submission gate, the stores, and the employer
/// review operations.
pub struct ApplicationService<A, J, P> {
    applications: Arc<A>,
    jobs: Arc<J>,
    profiles: Arc<P>,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

impl<A, J, P> ApplicationService<A, J, P>
where
    A: ApplicationStore + 'static,
    J: JobStore + 'static,
    P: ProfileStore + 'static,
{
    pub fn new(applications: Arc<A>, jobs: Arc<J>, profiles: Arc<P>) -> Self {
        Self {
            applications,
            jobs,
            profiles,
        }
    }

    /// The advisory existence check shown before the apply form opens.
    pub async fn has_applied(
        &self,
        job: &JobId,
        student: &IdentityId,
    ) -> Result<bool, ApplicationServiceError> {
        let matches = self.applications.for_job_and_student(job, student).await?;
        Ok(!matches.is_empty())
    }

    /// Submit an application on behalf of the student.
    ///
    /// The duplicate check is check-then-write, not transactional: two
    /// concurrent submissions that each observed `has_applied == false` can
    /// both land. The store carries no uniqueness constraint, so the gate
    /// stays advisory.
    pub async fn apply(
        &self,
        student: &IdentityId,
        job_id: &JobId,
        cover_letter: &str,
    ) -> Result<Application, ApplicationServiceError> {
        let profile = self
            .profiles
            .fetch(student)
            .await?
            .ok_or(StoreError::NotFound)?;
        if profile.role != Role::Student {
            return Err(ApplicationViolation::NotAStudent.into());
        }

        if cover_letter.trim().is_empty() {
            return Err(ApplicationViolation::MissingCoverLetter.into());
        }

        let job = self.jobs.fetch(job_id).await?.ok_or(StoreError::NotFound)?;
        if !job.is_active {
            return Err(ApplicationViolation::JobClosed.into());
        }

        if self.has_applied(job_id, student).await? {
            return Err(ApplicationViolation::AlreadyApplied.into());
        }

        let student_name = if profile.display_name.trim().is_empty() {
            "Student".to_string()
        } else {
            profile.display_name.clone()
        };

        let application = Application {
            id: next_application_id(),
            job_id: job.id.clone(),
            job_title: job.title.clone(),
            company_name: job.company.clone(),
            employer_id: job.employer_id.clone(),
            student_id: profile.id.clone(),
            student_name,
            student_email: profile.email.clone(),
            cover_letter: cover_letter.trim().to_string(),
            status: ApplicationStatus::Pending,
            applied_at: Utc::now(),
        };

        let stored = self.applications.insert(application).await?;
        Ok(stored)
    }

    /// The student's application list, newest first.
    pub async fn submissions(
        &self,
        student: &IdentityId,
    ) -> Result<Vec<Application>, ApplicationServiceError> {
        let applications = self.applications.for_student(student).await?;
        Ok(applications)
    }

    /// Live view of the student's application list.
    pub fn watch_submissions(&self, student: &IdentityId) -> Subscription<Vec<Application>> {
        self.applications.watch_for_student(student)
    }

    /// Applicant list for one of the employer's postings, with each
    /// student's current profile joined in for display.
    pub async fn applicants(
        &self,
        job_id: &JobId,
        employer: &IdentityId,
    ) -> Result<Vec<ApplicantView>, ApplicationServiceError> {
        let job = self.jobs.fetch(job_id).await?.ok_or(StoreError::NotFound)?;
        if job.employer_id != *employer {
            return Err(StoreError::PermissionDenied.into());
        }

        let applications = self.applications.for_job(job_id).await?;
        let mut views = Vec::with_capacity(applications.len());
        for application in applications {
            let joined = self.profiles.fetch(&application.student_id).await?;
            let (student_name, student_email) = match joined {
                Some(profile) => {
                    let name = if profile.display_name.trim().is_empty() {
                        profile.email.clone()
                    } else {
                        profile.display_name.clone()
                    };
                    (name, profile.email)
                }
                None => (
                    application.student_name.clone(),
                    application.student_email.clone(),
                ),
            };
            views.push(ApplicantView {
                application,
                student_name,
                student_email,
            });
        }
        Ok(views)
    }

    /// Withdraw a pending application. Withdrawn records are deleted, the
    /// one hard delete in the system.
    pub async fn withdraw(
        &self,
        id: &ApplicationId,
        student: &IdentityId,
    ) -> Result<(), ApplicationServiceError> {
        let application = self
            .applications
            .fetch(id)
            .await?
            .ok_or(StoreError::NotFound)?;
        if application.student_id != *student {
            return Err(StoreError::PermissionDenied.into());
        }
        if application.status != ApplicationStatus::Pending {
            return Err(ApplicationViolation::NotPending.into());
        }

        self.applications.delete(id).await?;
        Ok(())
    }

    /// Record the employer's decision. Any status may replace any other;
    /// employers are allowed to reconsider.
    pub async fn decide(
        &self,
        id: &ApplicationId,
        employer: &IdentityId,
        status: ApplicationStatus,
    ) -> Result<Application, ApplicationServiceError> {
        let mut application = self
            .applications
            .fetch(id)
            .await?
            .ok_or(StoreError::NotFound)?;
        if application.employer_id != *employer {
            return Err(StoreError::PermissionDenied.into());
        }

        application.status = status;
        self.applications.save(application.clone()).await?;
        Ok(application)
    }
}

/// Error raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error(transparent)]
    Validation(#[from] ApplicationViolation),
    #[error(transparent)]
    Store(#[from] StoreError),
}
