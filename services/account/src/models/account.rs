//! Account entity

use std::fmt;

use uuid::Uuid;

use crate::{
    error::AppResult,
    password,
    validation::{validate_name, validate_password},
};

/// A named identity holding a password credential.
///
/// Every mutator either succeeds, leaving a valid account, or fails without
/// touching the account. The raw password is never kept.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    id: Uuid,
    name: String,
    password_hash: String,
}

impl Account {
    /// Create a new account with a freshly generated id.
    ///
    /// The name is checked before the password, so a bad name is reported
    /// even when the password is bad too.
    pub fn new(name: &str, password: &str, confirm_password: &str) -> AppResult<Self> {
        let mut account = Account {
            id: Uuid::new_v4(),
            name: String::new(),
            password_hash: String::new(),
        };
        account.set_name(name)?;
        account.set_password(password, confirm_password)?;
        Ok(account)
    }

    /// Rebuild an account from persisted state
    pub fn restore(id: Uuid, name: String, password_hash: String) -> Self {
        Account {
            id,
            name,
            password_hash,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// Replace the name. Uniqueness is checked by `AccountService`.
    pub fn set_name(&mut self, name: &str) -> AppResult<()> {
        validate_name(name)?;
        self.name = name.to_string();
        Ok(())
    }

    /// Replace the password with the hash of `password`
    pub fn set_password(&mut self, password: &str, confirm_password: &str) -> AppResult<()> {
        validate_password(password, confirm_password)?;
        self.password_hash = password::hash_password(password)?;
        Ok(())
    }

    /// Verify `candidate` against the stored hash
    pub fn compare_password(&self, candidate: &str) -> AppResult<()> {
        password::compare_password(&self.password_hash, candidate)
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_new_account() {
        let account = Account::new("alice", "password1", "password1").unwrap();
        assert_eq!(account.name(), "alice");
        assert_ne!(account.password_hash(), "password1");
        assert!(account.compare_password("password1").is_ok());
    }

    #[test]
    fn test_new_accounts_get_distinct_ids() {
        let first = Account::new("alice", "password1", "password1").unwrap();
        let second = Account::new("alice", "password1", "password1").unwrap();
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn test_name_error_wins_over_password_error() {
        let err = Account::new("al", "short", "mismatch").unwrap_err();
        match err {
            crate::error::AppError::BadRequest(message) => assert!(message.contains("Name")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_new_account_rejects_bad_password() {
        let err = Account::new("alice", "password1", "password2").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn test_restore_trusts_storage() {
        let id = Uuid::new_v4();
        let account = Account::restore(id, "x".to_string(), "hash".to_string());
        assert_eq!(account.id(), id);
        assert_eq!(account.name(), "x");
        assert_eq!(account.password_hash(), "hash");
    }

    #[test]
    fn test_failed_set_name_leaves_account_unchanged() {
        let mut account = Account::new("alice", "password1", "password1").unwrap();
        let before = account.clone();

        assert_eq!(
            account.set_name("bad name").unwrap_err().kind(),
            ErrorKind::BadRequest
        );
        assert_eq!(account, before);

        account.set_name("alice_2").unwrap();
        assert_eq!(account.name(), "alice_2");
    }

    #[test]
    fn test_set_password_rehashes() {
        let mut account = Account::new("alice", "password1", "password1").unwrap();
        let before = account.clone();

        assert!(account.set_password("password2", "password3").is_err());
        assert_eq!(account, before);

        account.set_password("password2", "password2").unwrap();
        assert_eq!(
            account.compare_password("password1").unwrap_err().kind(),
            ErrorKind::Unauthorized
        );
        assert!(account.compare_password("password2").is_ok());
    }

    #[test]
    fn test_debug_hides_password_hash() {
        let account = Account::new("alice", "password1", "password1").unwrap();
        let rendered = format!("{:?}", account);
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains(account.password_hash()));
    }
}
