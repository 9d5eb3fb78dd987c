//! Repository Traits
//!
//! Interfaces for listing persistence and image storage. Implementations are
//! in the infra layer.

use kernel::id::PropertyId;

use crate::domain::entity::Property;
use crate::domain::value_object::{ImageRef, PropertyFilter};
use crate::error::PropertyResult;

/// Property repository trait
#[trait_variant::make(PropertyRepository: Send)]
pub trait LocalPropertyRepository {
    async fn create_property(&self, property: &Property) -> PropertyResult<()>;

    async fn find_property(&self, property_id: &PropertyId) -> PropertyResult<Option<Property>>;

    /// Returns false when nothing was deleted
    async fn delete_property(&self, property_id: &PropertyId) -> PropertyResult<bool>;

    /// Oldest first, unpaginated
    async fn list_properties(&self, filter: &PropertyFilter) -> PropertyResult<Vec<Property>>;
}

/// Image storage trait
#[trait_variant::make(ImageStore: Send)]
pub trait LocalImageStore {
    /// Persist bytes under a fresh unique name
    async fn store_image(&self, bytes: &[u8], original_name: &str) -> PropertyResult<ImageRef>;

    /// Remove the file behind `image`; an already missing file is not an error
    async fn delete_image(&self, image: &ImageRef) -> PropertyResult<()>;
}
