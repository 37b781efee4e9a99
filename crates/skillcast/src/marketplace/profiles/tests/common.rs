use std::sync::Arc;

use chrono::{TimeZone, Utc};

use crate::auth::{Identity, IdentityId};
use crate::marketplace::profiles::domain::{
    EmployerProfileForm, Profile, Role, StudentProfileForm,
};
use crate::marketplace::profiles::service::ProfileService;
pub(super) use crate::memory::MemoryProfileStore;

pub(super) fn identity(id: &str, email: &str) -> Identity {
    Identity {
        id: IdentityId(id.to_string()),
        email: email.to_string(),
        email_verified: true,
    }
}

pub(super) fn initial_profile(id: &str, email: &str, role: Role) -> Profile {
    let created_at = Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap();
    Profile::initial(&identity(id, email), role, created_at)
}

pub(super) fn student_form() -> StudentProfileForm {
    StudentProfileForm {
        first_name: "Agnesa".to_string(),
        last_name: "Berisha".to_string(),
        headline: "Computer science student".to_string(),
        about: "Final year, interested in mobile development.".to_string(),
        portfolio_url: "https://agnesa.dev".to_string(),
        skills: vec!["JavaScript".to_string(), "React Native".to_string()],
    }
}

pub(super) fn employer_form() -> EmployerProfileForm {
    EmployerProfileForm {
        company_name: "Nexus Labs".to_string(),
        industry: "Software Development".to_string(),
        location: "Mitrovica, Kosovo".to_string(),
        website: "https://nexuslabs.example".to_string(),
        description: "Product studio hiring junior engineers.".to_string(),
    }
}

pub(super) fn build_service() -> (ProfileService<MemoryProfileStore>, Arc<MemoryProfileStore>) {
    let store = Arc::new(MemoryProfileStore::default());
    (ProfileService::new(store.clone()), store)
}
