//! Request and response payloads of the HTTP API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::usecases::{AccountDto, SessionDto};

/// Request for account registration
#[derive(Deserialize)]
pub struct CreateAccountRequest {
    pub name: String,
    pub password: String,
    pub confirm_password: String,
}

/// Request for renaming the authenticated account
#[derive(Deserialize)]
pub struct UpdateAccountNameRequest {
    pub name: String,
    pub password: String,
}

/// Request for changing the password of the authenticated account
#[derive(Deserialize)]
pub struct UpdateAccountPasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

/// Request for deleting the authenticated account
#[derive(Deserialize)]
pub struct DeleteAccountRequest {
    pub password: String,
}

/// Response for account operations
#[derive(Debug, Serialize, Deserialize)]
pub struct AccountResponse {
    pub name: String,
}

impl From<AccountDto> for AccountResponse {
    fn from(account: AccountDto) -> Self {
        Self { name: account.name }
    }
}

/// Request for login
#[derive(Deserialize)]
pub struct LoginRequest {
    pub account_name: String,
    pub password: String,
}

/// Response for login
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl From<SessionDto> for SessionResponse {
    fn from(session: SessionDto) -> Self {
        Self {
            token: session.token,
            expires_at: session.expires_at,
        }
    }
}

/// Response for the authorization check used by other services
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthorizationResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<AccountDto> for AuthorizationResponse {
    fn from(account: AccountDto) -> Self {
        Self {
            id: account.id,
            name: account.name,
        }
    }
}
