use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::{Identity, IdentityId};

/// Account role, fixed at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Employer,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Employer => "employer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Profile record stored in the `users` collection, keyed by identity id.
///
/// One record holds both role's fields; the unused side stays zero-filled,
/// matching the initial document written at registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: IdentityId,
    pub email: String,
    pub role: Role,
    pub is_profile_complete: bool,
    pub display_name: String,
    pub headline: String,
    pub about: String,
    pub skills: Vec<String>,
    pub portfolio_url: String,
    pub company_name: String,
    pub industry: String,
    pub location: String,
    pub website: String,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// The zero-filled record written right after account creation, before
    /// the owner has completed their profile.
    pub fn initial(identity: &Identity, role: Role, created_at: DateTime<Utc>) -> Self {
        Self {
            id: identity.id.clone(),
            email: identity.email.clone(),
            role,
            is_profile_complete: false,
            display_name: String::new(),
            headline: String::new(),
            about: String::new(),
            skills: Vec::new(),
            portfolio_url: String::new(),
            company_name: String::new(),
            industry: String::new(),
            location: String::new(),
            website: String::new(),
            created_at,
        }
    }
}

pub const MAX_SKILLS: usize = 10;

/// Form submitted from the student profile-completion screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub headline: String,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub portfolio_url: String,
    pub skills: Vec<String>,
}

/// Form submitted from the employer profile-completion screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerProfileForm {
    pub company_name: String,
    pub industry: String,
    pub location: String,
    #[serde(default)]
    pub website: String,
    pub description: String,
}

/// Validation errors raised before a profile write is attempted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileViolation {
    #[error("please fill in name, headline, and at least one skill")]
    IncompleteStudentForm,
    #[error("you can select up to {max} skills")]
    TooManySkills { max: usize },
    #[error("please fill in company name, industry, location, and description")]
    IncompleteEmployerForm,
    #[error("this form is for {expected} accounts")]
    WrongRole { expected: Role },
}

impl StudentProfileForm {
    pub fn validate(&self) -> Result<(), ProfileViolation> {
        if self.first_name.trim().is_empty()
            || self.last_name.trim().is_empty()
            || self.headline.trim().is_empty()
            || self.skills.is_empty()
        {
            return Err(ProfileViolation::IncompleteStudentForm);
        }
        if self.skills.len() > MAX_SKILLS {
            return Err(ProfileViolation::TooManySkills { max: MAX_SKILLS });
        }
        Ok(())
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

impl EmployerProfileForm {
    pub fn validate(&self) -> Result<(), ProfileViolation> {
        if self.company_name.trim().is_empty()
            || self.industry.trim().is_empty()
            || self.location.trim().is_empty()
            || self.description.trim().is_empty()
        {
            return Err(ProfileViolation::IncompleteEmployerForm);
        }
        Ok(())
    }
}
