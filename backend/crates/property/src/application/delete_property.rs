//! Delete Property Use Case
//!
//! Files go first, then the record. The two steps are not transactional: a
//! crash in between leaves a record whose images are already gone, and a
//! later delete of it still succeeds.

use std::sync::Arc;

use kernel::id::{PropertyId, UserId};

use crate::application::cleanup::discard_images;
use crate::domain::repository::{ImageStore, PropertyRepository};
use crate::error::{PropertyError, PropertyResult};

pub struct DeletePropertyUseCase<R, S>
where
    R: PropertyRepository,
    S: ImageStore,
{
    repo: Arc<R>,
    images: Arc<S>,
}

impl<R, S> DeletePropertyUseCase<R, S>
where
    R: PropertyRepository,
    S: ImageStore,
{
    pub fn new(repo: Arc<R>, images: Arc<S>) -> Self {
        Self { repo, images }
    }

    /// Only the creator may delete. A second delete of the same id is
    /// `NotFound`.
    pub async fn execute(&self, caller: &UserId, property_id: &PropertyId) -> PropertyResult<()> {
        let property = self
            .repo
            .find_property(property_id)
            .await?
            .ok_or(PropertyError::NotFound)?;

        if !property.is_owned_by(caller) {
            return Err(PropertyError::NotOwner);
        }

        discard_images(self.images.as_ref(), &property.images).await;

        // A concurrent delete may have won the race.
        if !self.repo.delete_property(property_id).await? {
            return Err(PropertyError::NotFound);
        }

        tracing::info!(
            property_id = %property_id,
            deleted_by = %caller,
            images = property.images.len(),
            "Property deleted"
        );

        Ok(())
    }
}
