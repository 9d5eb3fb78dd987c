//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Registration with unique username and email
//! - Username/password sign-in issuing 1 hour bearer tokens
//! - Password change for signed-in users
//! - Password reset through a mailed, single-use, 15 minute token
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (optional pepper)
//! - Session and reset tokens signed with separate derived keys
//! - Only a SHA-256 digest of the outstanding reset token is stored

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token::{Claims, TokenPurpose, TokenService};
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryAuthRepository, PgAuthRepository};
pub use presentation::middleware::{AuthenticatedUser, require_bearer};
pub use presentation::router::auth_router;
