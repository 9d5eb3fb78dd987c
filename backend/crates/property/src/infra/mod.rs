//! Infrastructure Layer
//!
//! Database and filesystem implementations.

pub mod disk;
pub mod memory;
pub mod postgres;

pub use disk::DiskImageStore;
pub use memory::InMemoryPropertyRepository;
pub use postgres::PgPropertyRepository;
