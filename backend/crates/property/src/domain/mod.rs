//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    Facilities, HomeDetails, HostelDetails, Owner, Parking, Property, PropertyDetails,
};
pub use repository::{ImageStore, PropertyRepository};
pub use value_object::{ImageRef, Price, PropertyFilter, PropertyKind, SharedBy};
