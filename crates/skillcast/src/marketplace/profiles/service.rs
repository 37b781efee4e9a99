use std::sync::Arc;

use crate::auth::IdentityId;
use crate::marketplace::StoreError;

use super::domain::{EmployerProfileForm, Profile, ProfileViolation, Role, StudentProfileForm};
use super::repository::ProfileStore;

/// Service applying the profile-completion rules on top of the store.
pub struct ProfileService<S> {
    store: Arc<S>,
}

impl<S> ProfileService<S>
where
    S: ProfileStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn fetch(&self, id: &IdentityId) -> Result<Profile, ProfileServiceError> {
        let profile = self.store.fetch(id).await?.ok_or(StoreError::NotFound)?;
        Ok(profile)
    }

    /// Fill in the student fields and open the student home flow.
    pub async fn complete_student_profile(
        &self,
        id: &IdentityId,
        form: StudentProfileForm,
    ) -> Result<Profile, ProfileServiceError> {
        form.validate()?;

        let mut profile = self.fetch(id).await?;
        if profile.role != Role::Student {
            return Err(ProfileViolation::WrongRole {
                expected: Role::Student,
            }
            .into());
        }

        profile.display_name = form.display_name();
        profile.headline = form.headline.trim().to_string();
        profile.about = form.about.trim().to_string();
        profile.portfolio_url = form.portfolio_url.trim().to_string();
        profile.skills = form.skills;
        profile.is_profile_complete = true;

        self.store.save(profile.clone()).await?;
        Ok(profile)
    }

    /// Fill in the company fields and open the employer dashboard flow.
    pub async fn complete_employer_profile(
        &self,
        id: &IdentityId,
        form: EmployerProfileForm,
    ) -> Result<Profile, ProfileServiceError> {
        form.validate()?;

        let mut profile = self.fetch(id).await?;
        if profile.role != Role::Employer {
            return Err(ProfileViolation::WrongRole {
                expected: Role::Employer,
            }
            .into());
        }

        profile.company_name = form.company_name.trim().to_string();
        // The account's display name becomes the company name.
        profile.display_name = profile.company_name.clone();
        profile.industry = form.industry.trim().to_string();
        profile.location = form.location.trim().to_string();
        profile.website = form.website.trim().to_string();
        profile.about = form.description.trim().to_string();
        profile.is_profile_complete = true;

        self.store.save(profile.clone()).await?;
        Ok(profile)
    }
}

/// Error raised by the profile service.
#[derive(Debug, thiserror::Error)]
pub enum ProfileServiceError {
    #[error(transparent)]
    Validation(#[from] ProfileViolation),
    #[error(transparent)]
    Store(#[from] StoreError),
}
