use crate::auth::IdentityId;
use crate::marketplace::StoreError;
use crate::subscription::Subscription;

use super::domain::Profile;

/// Storage abstraction over the `users` collection.
///
/// `watch` registers a live listener that delivers the current record (or its
/// absence) immediately, then every later change in server order. The
/// returned handle must be cancelled or dropped to release the listener.
#[async_trait::async_trait]
pub trait ProfileStore: Send + Sync {
    async fn create(&self, profile: Profile) -> Result<Profile, StoreError>;

    async fn fetch(&self, id: &IdentityId) -> Result<Option<Profile>, StoreError>;

    async fn save(&self, profile: Profile) -> Result<(), StoreError>;

    fn watch(&self, id: &IdentityId) -> Subscription<Option<Profile>>;
}
