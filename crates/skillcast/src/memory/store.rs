use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::auth::IdentityId;
use crate::marketplace::applications::{Application, ApplicationId, ApplicationStore};
use crate::marketplace::jobs::{JobId, JobPosting, JobStore};
use crate::marketplace::profiles::{Profile, ProfileStore};
use crate::marketplace::StoreError;
use crate::subscription::{Listeners, Subscription};

/// In-memory `users` collection with per-document live listeners.
#[derive(Default, Clone)]
pub struct MemoryProfileStore {
    records: Arc<Mutex<HashMap<IdentityId, Profile>>>,
    listeners: Listeners<IdentityId, Option<Profile>>,
}

impl MemoryProfileStore {
    pub fn seed(&self, profile: Profile) {
        let mut guard = self.records.lock().expect("profile mutex poisoned");
        guard.insert(profile.id.clone(), profile);
    }

    pub fn watcher_count(&self) -> usize {
        self.listeners.active()
    }
}

#[async_trait::async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn create(&self, profile: Profile) -> Result<Profile, StoreError> {
        {
            let mut guard = self.records.lock().expect("profile mutex poisoned");
            if guard.contains_key(&profile.id) {
                return Err(StoreError::Conflict);
            }
            guard.insert(profile.id.clone(), profile.clone());
        }
        self.listeners.notify(&profile.id, Some(profile.clone()));
        Ok(profile)
    }

    async fn fetch(&self, id: &IdentityId) -> Result<Option<Profile>, StoreError> {
        let guard = self.records.lock().expect("profile mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    async fn save(&self, profile: Profile) -> Result<(), StoreError> {
        {
            let mut guard = self.records.lock().expect("profile mutex poisoned");
            if !guard.contains_key(&profile.id) {
                return Err(StoreError::NotFound);
            }
            guard.insert(profile.id.clone(), profile.clone());
        }
        self.listeners.notify(&profile.id, Some(profile));
        Ok(())
    }

    fn watch(&self, id: &IdentityId) -> Subscription<Option<Profile>> {
        let current = self
            .records
            .lock()
            .expect("profile mutex poisoned")
            .get(id)
            .cloned();
        self.listeners.subscribe(id.clone(), current)
    }
}

/// In-memory `jobs` collection.
#[derive(Default, Clone)]
pub struct MemoryJobStore {
    records: Arc<Mutex<HashMap<JobId, JobPosting>>>,
}

fn newest_first(jobs: &mut [JobPosting]) {
    jobs.sort_by(|a, b| (&b.created_at, &b.id.0).cmp(&(&a.created_at, &a.id.0)));
}

#[async_trait::async_trait]
impl JobStore for MemoryJobStore {
    async fn insert(&self, job: JobPosting) -> Result<JobPosting, StoreError> {
        let mut guard = self.records.lock().expect("job mutex poisoned");
        if guard.contains_key(&job.id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(job.id.clone(), job.clone());
        Ok(job)
    }

    async fn fetch(&self, id: &JobId) -> Result<Option<JobPosting>, StoreError> {
        let guard = self.records.lock().expect("job mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    async fn active(&self) -> Result<Vec<JobPosting>, StoreError> {
        let guard = self.records.lock().expect("job mutex poisoned");
        let mut jobs: Vec<_> = guard.values().filter(|job| job.is_active).cloned().collect();
        newest_first(&mut jobs);
        Ok(jobs)
    }

    async fn by_employer(&self, employer: &IdentityId) -> Result<Vec<JobPosting>, StoreError> {
        let guard = self.records.lock().expect("job mutex poisoned");
        let mut jobs: Vec<_> = guard
            .values()
            .filter(|job| job.employer_id == *employer)
            .cloned()
            .collect();
        newest_first(&mut jobs);
        Ok(jobs)
    }

    async fn save(&self, job: JobPosting) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("job mutex poisoned");
        if !guard.contains_key(&job.id) {
            return Err(StoreError::NotFound);
        }
        guard.insert(job.id.clone(), job);
        Ok(())
    }
}

/// In-memory `applications` collection with a live per-student list
/// listener.
#[derive(Default, Clone)]
pub struct MemoryApplicationStore {
    records: Arc<Mutex<HashMap<ApplicationId, Application>>>,
    listeners: Listeners<IdentityId, Vec<Application>>,
}

impl MemoryApplicationStore {
    fn student_view(&self, student: &IdentityId) -> Vec<Application> {
        let guard = self.records.lock().expect("application mutex poisoned");
        let mut applications: Vec<_> = guard
            .values()
            .filter(|application| application.student_id == *student)
            .cloned()
            .collect();
        applications
            .sort_by(|a, b| (&b.applied_at, &b.id.0).cmp(&(&a.applied_at, &a.id.0)));
        applications
    }

    fn publish_student_view(&self, student: &IdentityId) {
        self.listeners.notify(student, self.student_view(student));
    }

    pub fn watcher_count(&self) -> usize {
        self.listeners.active()
    }
}

#[async_trait::async_trait]
impl ApplicationStore for MemoryApplicationStore {
    async fn insert(&self, application: Application) -> Result<Application, StoreError> {
        {
            let mut guard = self.records.lock().expect("application mutex poisoned");
            if guard.contains_key(&application.id) {
                return Err(StoreError::Conflict);
            }
            guard.insert(application.id.clone(), application.clone());
        }
        self.publish_student_view(&application.student_id);
        Ok(application)
    }

    async fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, StoreError> {
        let guard = self.records.lock().expect("application mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    async fn for_student(&self, student: &IdentityId) -> Result<Vec<Application>, StoreError> {
        Ok(self.student_view(student))
    }

    async fn for_job(&self, job: &JobId) -> Result<Vec<Application>, StoreError> {
        let guard = self.records.lock().expect("application mutex poisoned");
        let mut applications: Vec<_> = guard
            .values()
            .filter(|application| application.job_id == *job)
            .cloned()
            .collect();
        applications
            .sort_by(|a, b| (&b.applied_at, &b.id.0).cmp(&(&a.applied_at, &a.id.0)));
        Ok(applications)
    }

    async fn for_job_and_student(
        &self,
        job: &JobId,
        student: &IdentityId,
    ) -> Result<Vec<Application>, StoreError> {
        let guard = self.records.lock().expect("application mutex poisoned");
        Ok(guard
            .values()
            .filter(|application| {
                application.job_id == *job && application.student_id == *student
            })
            .cloned()
            .collect())
    }

    async fn save(&self, application: Application) -> Result<(), StoreError> {
        {
            let mut guard = self.records.lock().expect("application mutex poisoned");
            if !guard.contains_key(&application.id) {
                return Err(StoreError::NotFound);
            }
            guard.insert(application.id.clone(), application.clone());
        }
        self.publish_student_view(&application.student_id);
        Ok(())
    }

    async fn delete(&self, id: &ApplicationId) -> Result<(), StoreError> {
        let student = {
            let mut guard = self.records.lock().expect("application mutex poisoned");
            let removed = guard.remove(id).ok_or(StoreError::NotFound)?;
            removed.student_id
        };
        self.publish_student_view(&student);
        Ok(())
    }

    fn watch_for_student(&self, student: &IdentityId) -> Subscription<Vec<Application>> {
        self.listeners
            .subscribe(student.clone(), self.student_view(student))
    }
}
