//! Account policies spanning more than one account

use tracing::info;

use crate::{
    error::{AppError, AppResult},
    models::Account,
    repositories::AccountRepository,
};

/// Enforces global account name uniqueness
#[derive(Debug, Clone, Copy, Default)]
pub struct AccountService;

impl AccountService {
    pub fn new() -> Self {
        Self
    }

    /// Fail with `Conflict` when any account, deleted or not, already uses
    /// the name of `account`.
    ///
    /// This is advisory under concurrent writers: the unique index on the
    /// accounts table settles races.
    pub async fn exists(
        &self,
        accounts: &mut dyn AccountRepository,
        account: &Account,
    ) -> AppResult<()> {
        match accounts
            .find_by_name_including_deleted(account.name())
            .await?
        {
            Some(_) => {
                info!("Account name already taken: {}", account.name());
                Err(AppError::Conflict)
            }
            None => Ok(()),
        }
    }
}
