use crate::config::SignupConfig;
use crate::marketplace::profiles::Role;

const MIN_PASSWORD_LENGTH: usize = 6;

/// Violations raised by the pre-flight credential checks. These fire before
/// any collaborator call, so a rejected signup creates no account.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialViolation {
    #[error("email and password are required")]
    MissingFields,
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("password must contain an uppercase letter")]
    PasswordMissingUppercase,
    #[error("password must contain a digit")]
    PasswordMissingDigit,
    #[error("students must register with an official @{domain} address")]
    StudentEmailDomain { domain: String },
}

/// Policy dial backing registration validation (institutional email domain,
/// password strength).
#[derive(Debug, Clone)]
pub struct CredentialPolicy {
    student_email_domain: String,
}

impl CredentialPolicy {
    pub fn new(student_email_domain: impl Into<String>) -> Self {
        Self {
            student_email_domain: student_email_domain.into(),
        }
    }

    pub fn student_email_domain(&self) -> &str {
        &self.student_email_domain
    }

    pub fn validate_signup(
        &self,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<(), CredentialViolation> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(CredentialViolation::MissingFields);
        }

        if role == Role::Student {
            let suffix = format!("@{}", self.student_email_domain.to_ascii_lowercase());
            if !email.to_ascii_lowercase().ends_with(&suffix) {
                return Err(CredentialViolation::StudentEmailDomain {
                    domain: self.student_email_domain.clone(),
                });
            }
        }

        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(CredentialViolation::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        if !password.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(CredentialViolation::PasswordMissingUppercase);
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(CredentialViolation::PasswordMissingDigit);
        }

        Ok(())
    }

    pub fn validate_login(&self, email: &str, password: &str) -> Result<(), CredentialViolation> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(CredentialViolation::MissingFields);
        }
        Ok(())
    }
}

impl Default for CredentialPolicy {
    fn default() -> Self {
        Self::new(SignupConfig::DEFAULT_STUDENT_DOMAIN)
    }
}

impl From<&SignupConfig> for CredentialPolicy {
    fn from(config: &SignupConfig) -> Self {
        Self::new(config.student_email_domain.clone())
    }
}
