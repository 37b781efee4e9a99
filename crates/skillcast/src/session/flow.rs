use serde::Serialize;

use crate::marketplace::profiles::Role;

use super::snapshot::SessionSnapshot;

/// The five mutually exclusive screen flows, plus the splash screen shown
/// while the session is still resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Flow {
    Splash,
    Login,
    CompleteStudentProfile,
    CompleteEmployerProfile,
    StudentHome,
    EmployerHome,
}

impl Flow {
    pub const fn label(self) -> &'static str {
        match self {
            Flow::Splash => "splash",
            Flow::Login => "login",
            Flow::CompleteStudentProfile => "complete_student_profile",
            Flow::CompleteEmployerProfile => "complete_employer_profile",
            Flow::StudentHome => "student_home",
            Flow::EmployerHome => "employer_home",
        }
    }

    /// Map a session snapshot to its flow.
    ///
    /// The conditions are evaluated strictly top to bottom: readiness gates
    /// verification, verification gates profile completion, completion gates
    /// role routing. Total over every reachable snapshot; a verified
    /// identity with no profile record falls through to the student home,
    /// the default branch of the role routing.
    pub fn for_snapshot(snapshot: &SessionSnapshot) -> Flow {
        if snapshot.loading {
            return Flow::Splash;
        }

        let verified = snapshot
            .identity
            .as_ref()
            .map(|identity| identity.email_verified)
            .unwrap_or(false);
        if !verified {
            return Flow::Login;
        }

        match &snapshot.profile {
            Some(profile) if !profile.is_profile_complete && profile.role == Role::Student => {
                Flow::CompleteStudentProfile
            }
            Some(profile) if !profile.is_profile_complete && profile.role == Role::Employer => {
                Flow::CompleteEmployerProfile
            }
            Some(profile) if profile.role == Role::Employer => Flow::EmployerHome,
            _ => Flow::StudentHome,
        }
    }
}
