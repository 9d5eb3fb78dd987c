//! Application Layer
//!
//! Use cases and application services.

pub mod change_password;
pub mod check_user_name;
pub mod config;
pub mod profile;
pub mod register;
pub mod request_password_reset;
pub mod reset_password;
pub mod sign_in;
pub mod token;

// Re-exports
pub use change_password::ChangePasswordUseCase;
pub use check_user_name::CheckUserNameUseCase;
pub use config::AuthConfig;
pub use profile::ProfileUseCase;
pub use register::{RegisterInput, RegisterUseCase};
pub use request_password_reset::RequestPasswordResetUseCase;
pub use reset_password::{ResetPasswordInput, ResetPasswordUseCase};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use token::{Claims, TokenError, TokenPurpose, TokenService};
