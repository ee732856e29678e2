//! Session token generation

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Duration, Utc};
use rand::{RngCore, rngs::OsRng};

use crate::error::{AppError, AppResult};

/// Random bytes drawn per token
pub const TOKEN_BYTES: usize = 24;
/// Upper bound of the encoded token, mirrored by the `sessions.token` column
pub const TOKEN_MAX_LENGTH: usize = 32;
/// Lifetime of a session
pub const SESSION_TTL_DAYS: i64 = 7;

/// Generate a fresh bearer token and its expiry
pub fn generate_token() -> AppResult<(String, DateTime<Utc>)> {
    let mut buf = [0u8; TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut buf)
        .map_err(|e| AppError::internal(format!("Failed to read random bytes: {}", e)))?;

    let token = URL_SAFE_NO_PAD.encode(buf);
    check_token_length(&token)?;

    Ok((token, Utc::now() + Duration::days(SESSION_TTL_DAYS)))
}

fn check_token_length(token: &str) -> AppResult<()> {
    if token.len() > TOKEN_MAX_LENGTH {
        return Err(AppError::internal(format!(
            "Generated token is {} characters long",
            token.len()
        )));
    }
    Ok(())
}
