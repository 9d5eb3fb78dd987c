//! In-memory property repository
//!
//! Same contract as [`PgPropertyRepository`](super::postgres::PgPropertyRepository).
//! Keeps insertion order, which is creation order.

use kernel::id::PropertyId;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::entity::Property;
use crate::domain::repository::PropertyRepository;
use crate::domain::value_object::PropertyFilter;
use crate::error::{PropertyError, PropertyResult};

#[derive(Clone, Default)]
pub struct InMemoryPropertyRepository {
    rows: Arc<Mutex<Vec<Property>>>,
}

impl InMemoryPropertyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> PropertyResult<MutexGuard<'_, Vec<Property>>> {
        self.rows
            .lock()
            .map_err(|_| PropertyError::Internal("property store lock poisoned".to_string()))
    }
}

impl PropertyRepository for InMemoryPropertyRepository {
    async fn create_property(&self, property: &Property) -> PropertyResult<()> {
        let mut rows = self.lock()?;
        if rows.iter().any(|p| p.property_id == property.property_id) {
            return Err(PropertyError::Internal("duplicate property id".to_string()));
        }
        rows.push(property.clone());
        Ok(())
    }

    async fn find_property(&self, property_id: &PropertyId) -> PropertyResult<Option<Property>> {
        Ok(self
            .lock()?
            .iter()
            .find(|p| p.property_id == *property_id)
            .cloned())
    }

    async fn delete_property(&self, property_id: &PropertyId) -> PropertyResult<bool> {
        let mut rows = self.lock()?;
        let before = rows.len();
        rows.retain(|p| p.property_id != *property_id);
        Ok(rows.len() != before)
    }

    async fn list_properties(&self, filter: &PropertyFilter) -> PropertyResult<Vec<Property>> {
        Ok(self
            .lock()?
            .iter()
            .filter(|p| filter.matches(&p.location, p.kind()))
            .cloned()
            .collect())
    }
}
