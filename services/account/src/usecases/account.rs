//! Account lifecycle usecase

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::Account,
    repositories::{self, TransactionRunner, UnitOfWork},
    service::AccountService,
    usecases::AccountDto,
};

/// Account registration, update and deletion
#[async_trait]
pub trait AccountUsecase: Send + Sync {
    async fn create(
        &self,
        name: &str,
        password: &str,
        confirm_password: &str,
    ) -> AppResult<AccountDto>;

    async fn update_name(
        &self,
        id: Uuid,
        current_password: &str,
        new_name: &str,
    ) -> AppResult<AccountDto>;

    async fn update_password(
        &self,
        id: Uuid,
        current_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> AppResult<AccountDto>;

    async fn delete(&self, id: Uuid, password: &str) -> AppResult<()>;
}

/// [`AccountUsecase`] backed by a [`TransactionRunner`]
#[derive(Clone)]
pub struct AccountInteractor {
    transactions: Arc<dyn TransactionRunner>,
    account_service: AccountService,
}

impl AccountInteractor {
    pub fn new(transactions: Arc<dyn TransactionRunner>, account_service: AccountService) -> Self {
        Self {
            transactions,
            account_service,
        }
    }

    /// Load a live account and check its password. A missing account is an
    /// authentication failure like a wrong password.
    async fn authenticated_account(
        tx: &mut dyn UnitOfWork,
        id: Uuid,
        password: &str,
    ) -> AppResult<Account> {
        let account = tx
            .accounts()
            .find_by_id(id)
            .await?
            .ok_or(AppError::Unauthorized)?;
        account.compare_password(password)?;
        Ok(account)
    }

    async fn insert(&self, tx: &mut dyn UnitOfWork, account: &Account) -> AppResult<()> {
        self.account_service.exists(tx.accounts(), account).await?;
        tx.accounts().create(account).await
    }

    async fn rename(
        &self,
        tx: &mut dyn UnitOfWork,
        id: Uuid,
        current_password: &str,
        new_name: &str,
    ) -> AppResult<Account> {
        let mut account = Self::authenticated_account(tx, id, current_password).await?;
        if account.name() == new_name {
            return Ok(account);
        }

        account.set_name(new_name)?;
        self.account_service.exists(tx.accounts(), &account).await?;
        tx.accounts().update(&account).await?;
        Ok(account)
    }

    async fn change_password(
        tx: &mut dyn UnitOfWork,
        id: Uuid,
        current_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> AppResult<Account> {
        let mut account = Self::authenticated_account(tx, id, current_password).await?;
        account.set_password(new_password, confirm_password)?;
        tx.accounts().update(&account).await?;
        Ok(account)
    }

    async fn remove(tx: &mut dyn UnitOfWork, id: Uuid, password: &str) -> AppResult<()> {
        let account = Self::authenticated_account(tx, id, password).await?;
        if let Some(session) = tx.sessions().find_by_account_id(id).await? {
            tx.sessions().delete(&session).await?;
        }
        tx.accounts().delete(&account).await
    }
}

#[async_trait]
impl AccountUsecase for AccountInteractor {
    async fn create(
        &self,
        name: &str,
        password: &str,
        confirm_password: &str,
    ) -> AppResult<AccountDto> {
        let account = Account::new(name, password, confirm_password)?;

        let mut tx = self.transactions.begin().await?;
        let result = self.insert(tx.as_mut(), &account).await;
        repositories::finish(tx, result).await?;

        info!("Account created: {}", account.id());
        Ok(AccountDto::from(&account))
    }

    async fn update_name(
        &self,
        id: Uuid,
        current_password: &str,
        new_name: &str,
    ) -> AppResult<AccountDto> {
        let mut tx = self.transactions.begin().await?;
        let result = self.rename(tx.as_mut(), id, current_password, new_name).await;
        let account = repositories::finish(tx, result).await?;

        info!("Account name updated: {}", id);
        Ok(AccountDto::from(&account))
    }

    async fn update_password(
        &self,
        id: Uuid,
        current_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> AppResult<AccountDto> {
        let mut tx = self.transactions.begin().await?;
        let result = Self::change_password(
            tx.as_mut(),
            id,
            current_password,
            new_password,
            confirm_password,
        )
        .await;
        let account = repositories::finish(tx, result).await?;

        info!("Account password updated: {}", id);
        Ok(AccountDto::from(&account))
    }

    async fn delete(&self, id: Uuid, password: &str) -> AppResult<()> {
        let mut tx = self.transactions.begin().await?;
        let result = Self::remove(tx.as_mut(), id, password).await;
        repositories::finish(tx, result).await?;

        info!("Account deleted: {}", id);
        Ok(())
    }
}
