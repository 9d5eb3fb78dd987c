//! Application Layer
//!
//! Use cases and application services.

mod cleanup;
pub mod config;
pub mod create_property;
pub mod delete_property;
pub mod find_property;
pub mod list_properties;

// Re-exports
pub use config::PropertyConfig;
pub use create_property::{CreatePropertyInput, CreatePropertyUseCase, ImageUpload};
pub use delete_property::DeletePropertyUseCase;
pub use find_property::FindPropertyUseCase;
pub use list_properties::ListPropertiesUseCase;
