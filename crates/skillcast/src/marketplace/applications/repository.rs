use crate::auth::IdentityId;
use crate::marketplace::jobs::JobId;
use crate::marketplace::StoreError;
use crate::subscription::Subscription;

use super::domain::{Application, ApplicationId};

/// Storage abstraction over the `applications` collection.
///
/// `watch_for_student` registers a live listener over the student's
/// application list (newest first), delivering the current list immediately
/// and a fresh copy after every matching change.
#[async_trait::async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn insert(&self, application: Application) -> Result<Application, StoreError>;

    async fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, StoreError>;

    /// The student's applications, newest first.
    async fn for_student(&self, student: &IdentityId) -> Result<Vec<Application>, StoreError>;

    /// Every application submitted against the posting, newest first.
    async fn for_job(&self, job: &JobId) -> Result<Vec<Application>, StoreError>;

    /// The (job, student) filter backing the advisory duplicate check.
    async fn for_job_and_student(
        &self,
        job: &JobId,
        student: &IdentityId,
    ) -> Result<Vec<Application>, StoreError>;

    async fn save(&self, application: Application) -> Result<(), StoreError>;

    async fn delete(&self, id: &ApplicationId) -> Result<(), StoreError>;

    fn watch_for_student(&self, student: &IdentityId) -> Subscription<Vec<Application>>;
}
