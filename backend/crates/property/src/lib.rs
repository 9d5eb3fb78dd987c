//! Property (Listing) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Listing entity, value objects, repository and image store traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL, in-memory and disk implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Home and hostel listings with up to 5 images each
//! - Location substring / type query, public
//! - Owner-only deletion that also removes the image files

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::PropertyConfig;
pub use error::{PropertyError, PropertyResult};
pub use infra::{DiskImageStore, InMemoryPropertyRepository, PgPropertyRepository};
pub use presentation::router::property_router;
