//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use platform::mail::Mailer;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::application::{
    ChangePasswordUseCase, CheckUserNameUseCase, ProfileUseCase, RegisterInput, RegisterUseCase,
    RequestPasswordResetUseCase, ResetPasswordInput, ResetPasswordUseCase, SignInInput,
    SignInUseCase,
};
use crate::domain::repository::{CredentialRepository, UserRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    ChangePasswordRequest, CheckUserNameRequest, CheckUserNameResponse, ForgotPasswordRequest,
    LoginRequest, LoginResponse, MessageResponse, RegisterRequest, RegisterResponse,
    ResetPasswordRequest, UserResponse,
};
use crate::presentation::middleware::AuthenticatedUser;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R, M>
where
    R: UserRepository + CredentialRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    pub tokens: Arc<TokenService>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Register / Login
// ============================================================================

/// POST /api/register
pub async fn register<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<RegisterResponse>)>
where
    R: UserRepository + CredentialRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let user = use_case
        .execute(RegisterInput {
            first_name: req.first_name,
            last_name: req.last_name,
            user_name: req.user_name,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "User registered successfully!".to_string(),
            user: UserResponse::from(&user),
        }),
    ))
}

/// POST /api/login
pub async fn login<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository + CredentialRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(SignInInput {
            user_name: req.user_name,
            password: req.password,
        })
        .await
        // Do not reveal which usernames exist.
        .map_err(|e| match e {
            AuthError::UserNotFound => AuthError::InvalidCredentials,
            other => other,
        })?;

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful!".to_string(),
        token: output.token,
        user: UserResponse::from(&output.user),
    }))
}

/// POST /api/users/check-username
pub async fn check_user_name<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<CheckUserNameRequest>,
) -> AuthResult<Json<CheckUserNameResponse>>
where
    R: UserRepository + CredentialRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let exists = CheckUserNameUseCase::new(state.repo.clone())
        .execute(&req.user_name)
        .await?;
    Ok(Json(CheckUserNameResponse { exists }))
}

// ============================================================================
// Authenticated
// ============================================================================

/// GET /api/user/profile
pub async fn profile<R, M>(
    State(state): State<AuthAppState<R, M>>,
    caller: AuthenticatedUser,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + CredentialRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let user = ProfileUseCase::new(state.repo.clone())
        .execute(&caller.user_id)
        .await?;
    Ok(Json(UserResponse::from(&user)))
}

/// POST /api/auth/change-password
pub async fn change_password<R, M>(
    State(state): State<AuthAppState<R, M>>,
    caller: AuthenticatedUser,
    Json(req): Json<ChangePasswordRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + CredentialRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    ChangePasswordUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone())
        .execute(&caller.user_id, req.new_password)
        .await?;
    Ok(Json(MessageResponse::new("Password updated successfully")))
}

// ============================================================================
// Password reset
// ============================================================================

/// POST /api/auth/forgot-password
pub async fn forgot_password<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<ForgotPasswordRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + CredentialRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    RequestPasswordResetUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.mailer.clone(),
        state.tokens.clone(),
        state.config.clone(),
    )
    .execute(&req.email)
    .await?;
    Ok(Json(MessageResponse::new(
        "Password reset link sent to your email",
    )))
}

/// POST /api/auth/reset-password
pub async fn reset_password<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<ResetPasswordRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + CredentialRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    ResetPasswordUseCase::new(state.repo.clone(), state.tokens.clone(), state.config.clone())
        .execute(ResetPasswordInput {
            token: req.token,
            new_password: req.new_password,
        })
        .await?;
    Ok(Json(MessageResponse::new("Password reset successful")))
}
