use serde::Serialize;

use crate::auth::Identity;
use crate::marketplace::profiles::Profile;

/// Combined view of identity, profile, and readiness.
///
/// `loading` stays true from the moment an identity appears until the first
/// profile snapshot for that identity arrives, so a flow decision is never
/// made against a stale or missing profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub identity: Option<Identity>,
    pub profile: Option<Profile>,
    pub loading: bool,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            identity: None,
            profile: None,
            loading: true,
        }
    }
}

impl SessionSnapshot {
    pub(crate) fn apply_identity(&mut self, identity: Option<Identity>) {
        match identity {
            Some(identity) => {
                let user_changed = self
                    .identity
                    .as_ref()
                    .map(|current| current.id != identity.id)
                    .unwrap_or(true);
                if user_changed {
                    self.profile = None;
                    self.loading = true;
                }
                self.identity = Some(identity);
            }
            None => {
                self.identity = None;
                self.profile = None;
                self.loading = false;
            }
        }
    }

    pub(crate) fn apply_profile(&mut self, profile: Option<Profile>) {
        self.profile = profile;
        self.loading = false;
    }

    pub(crate) fn clear_profile(&mut self) {
        self.profile = None;
    }
}
