use crate::auth::IdentityId;
use crate::marketplace::StoreError;

use super::domain::{JobId, JobPosting};

/// Storage abstraction over the `jobs` collection.
#[async_trait::async_trait]
pub trait JobStore: Send + Sync {
    async fn insert(&self, job: JobPosting) -> Result<JobPosting, StoreError>;

    async fn fetch(&self, id: &JobId) -> Result<Option<JobPosting>, StoreError>;

    /// Active postings, newest first.
    async fn active(&self) -> Result<Vec<JobPosting>, StoreError>;

    /// Every posting owned by the employer, newest first, regardless of
    /// lifecycle state.
    async fn by_employer(&self, employer: &IdentityId) -> Result<Vec<JobPosting>, StoreError>;

    async fn save(&self, job: JobPosting) -> Result<(), StoreError>;
}
