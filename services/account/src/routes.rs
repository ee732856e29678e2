//! Account service routes

use axum::{
    Extension, Json, Router,
    extract::{FromRequest, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde_json::json;
use tracing::info;

use crate::{
    error::AppError,
    middleware::auth_middleware,
    schema::{
        AccountResponse, AuthorizationResponse, CreateAccountRequest, DeleteAccountRequest,
        LoginRequest, SessionResponse, UpdateAccountNameRequest, UpdateAccountPasswordRequest,
    },
    state::AppState,
    usecases::AccountDto,
};

/// JSON body whose rejections are reported as bad requests
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Create the router for the account service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/accounts", delete(delete_account))
        .route("/accounts/name", put(update_account_name))
        .route("/accounts/password", put(update_account_password))
        .route("/logout", delete(logout))
        .route("/authorization", get(authorization))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/accounts", post(create_account))
        .route("/login", post(login))
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = state.store.health_check().await.unwrap_or(false);
    Json(json!({
        "status": "ok",
        "service": "account-service",
        "database": database,
    }))
}

/// Account registration endpoint
pub async fn create_account(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateAccountRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!("Account registration for name: {}", payload.name);

    let account = state
        .account_usecase
        .create(&payload.name, &payload.password, &payload.confirm_password)
        .await?;

    Ok((StatusCode::CREATED, Json(AccountResponse::from(account))))
}

/// Rename the authenticated account
pub async fn update_account_name(
    State(state): State<AppState>,
    Extension(account): Extension<AccountDto>,
    AppJson(payload): AppJson<UpdateAccountNameRequest>,
) -> Result<impl IntoResponse, AppError> {
    let account = state
        .account_usecase
        .update_name(account.id, &payload.password, &payload.name)
        .await?;

    Ok(Json(AccountResponse::from(account)))
}

/// Change the password of the authenticated account
pub async fn update_account_password(
    State(state): State<AppState>,
    Extension(account): Extension<AccountDto>,
    AppJson(payload): AppJson<UpdateAccountPasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    let account = state
        .account_usecase
        .update_password(
            account.id,
            &payload.current_password,
            &payload.new_password,
            &payload.confirm_new_password,
        )
        .await?;

    Ok(Json(AccountResponse::from(account)))
}

/// Delete the authenticated account
pub async fn delete_account(
    State(state): State<AppState>,
    Extension(account): Extension<AccountDto>,
    AppJson(payload): AppJson<DeleteAccountRequest>,
) -> Result<impl IntoResponse, AppError> {
    state
        .account_usecase
        .delete(account.id, &payload.password)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Login endpoint
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!("Login attempt for account: {}", payload.account_name);

    let session = state
        .session_usecase
        .login(&payload.account_name, &payload.password)
        .await?;

    Ok(Json(SessionResponse::from(session)))
}

/// Logout endpoint
pub async fn logout(
    State(state): State<AppState>,
    Extension(account): Extension<AccountDto>,
) -> Result<impl IntoResponse, AppError> {
    state.session_usecase.logout(account.id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Identity of the bearer of a session token, for other services
pub async fn authorization(
    State(state): State<AppState>,
    Extension(account): Extension<AccountDto>,
) -> Result<impl IntoResponse, AppError> {
    let account = state.session_usecase.authorize(account.id).await?;

    Ok(Json(AuthorizationResponse::from(account)))
}
