//! Values handed out by the usecases

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Account, Session};

/// Public view of an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountDto {
    pub id: Uuid,
    pub name: String,
}

impl From<&Account> for AccountDto {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id(),
            name: account.name().to_string(),
        }
    }
}

/// Bearer token grant returned on login
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionDto {
    pub account_id: Uuid,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl From<&Session> for SessionDto {
    fn from(session: &Session) -> Self {
        Self {
            account_id: session.account_id(),
            token: session.token().to_string(),
            expires_at: session.expires_at(),
        }
    }
}
