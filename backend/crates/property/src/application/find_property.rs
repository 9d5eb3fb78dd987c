//! Find Property Use Case

use std::sync::Arc;

use kernel::id::PropertyId;

use crate::domain::entity::Property;
use crate::domain::repository::PropertyRepository;
use crate::error::{PropertyError, PropertyResult};

pub struct FindPropertyUseCase<R>
where
    R: PropertyRepository,
{
    repo: Arc<R>,
}

impl<R> FindPropertyUseCase<R>
where
    R: PropertyRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, property_id: &PropertyId) -> PropertyResult<Property> {
        self.repo
            .find_property(property_id)
            .await?
            .ok_or(PropertyError::NotFound)
    }
}
