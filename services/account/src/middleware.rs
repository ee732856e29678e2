//! Session token authentication middleware

use axum::{
    body::Body,
    extract::State,
    http::{Request, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

use crate::{error::AppError, state::AppState};

/// Authorization scheme carrying the session token
pub const SESSION_SCHEME: &str = "Session";

/// Extract the token of an `Authorization: Session <token>` header
pub fn session_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case(SESSION_SCHEME) {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Authenticate the request and expose the account to handlers
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(session_token)
        .map(str::to_owned)
        .ok_or(AppError::Unauthorized)?;

    let account = state.session_usecase.authenticate(&token).await?;

    // Handlers pick the account up with `Extension<AccountDto>`
    req.extensions_mut().insert(account);

    Ok(next.run(req).await)
}
