//! List Properties Use Case
//!
//! No match is an empty list, never an error.

use std::sync::Arc;

use crate::domain::entity::Property;
use crate::domain::repository::PropertyRepository;
use crate::domain::value_object::PropertyFilter;
use crate::error::PropertyResult;

pub struct ListPropertiesUseCase<R>
where
    R: PropertyRepository,
{
    repo: Arc<R>,
}

impl<R> ListPropertiesUseCase<R>
where
    R: PropertyRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, filter: &PropertyFilter) -> PropertyResult<Vec<Property>> {
        let properties = self.repo.list_properties(filter).await?;
        tracing::debug!(
            location = ?filter.location(),
            kind = ?filter.kind(),
            count = properties.len(),
            "Properties listed"
        );
        Ok(properties)
    }
}
