//! Session entity

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{error::AppResult, models::Account, token};

/// A time-bounded bearer token grant, at most one per account
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    account_id: Uuid,
    token: String,
    expires_at: DateTime<Utc>,
}

impl Session {
    /// Open a session for `account` with a fresh token
    pub fn new(account: &Account) -> AppResult<Self> {
        let mut session = Session {
            account_id: account.id(),
            token: String::new(),
            expires_at: Utc::now(),
        };
        session.generate_token()?;
        Ok(session)
    }

    /// Rebuild a session from persisted state
    pub fn restore(account_id: Uuid, token: String, expires_at: DateTime<Utc>) -> Self {
        Session {
            account_id,
            token,
            expires_at,
        }
    }

    pub fn account_id(&self) -> Uuid {
        self.account_id
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Replace the token and restart the expiry clock.
    /// The new token always differs from the current one.
    pub fn generate_token(&mut self) -> AppResult<()> {
        loop {
            let (token, expires_at) = token::generate_token()?;
            if token != self.token {
                self.token = token;
                self.expires_at = expires_at;
                return Ok(());
            }
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("account_id", &self.account_id)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn account() -> Account {
        Account::restore(Uuid::new_v4(), "alice".to_string(), "hash".to_string())
    }

    #[test]
    fn test_new_session_binds_account() {
        let account = account();
        let session = Session::new(&account).unwrap();

        assert_eq!(session.account_id(), account.id());
        assert!(!session.token().is_empty());
        assert!(session.token().len() <= token::TOKEN_MAX_LENGTH);
        assert!(!session.is_expired(Utc::now()));
    }

    #[test]
    fn test_generate_token_changes_token() {
        let mut session = Session::new(&account()).unwrap();
        let previous = session.token().to_string();

        session.generate_token().unwrap();
        assert_ne!(session.token(), previous);
    }

    #[test]
    fn test_restored_session_can_be_expired() {
        let expired = Session::restore(
            Uuid::new_v4(),
            "token".to_string(),
            Utc::now() - Duration::seconds(1),
        );
        assert!(expired.is_expired(Utc::now()));
    }

    #[test]
    fn test_debug_hides_token() {
        let session = Session::new(&account()).unwrap();
        assert!(!format!("{:?}", session).contains(session.token()));
    }
}
