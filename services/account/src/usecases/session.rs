//! Session lifecycle usecase: login, logout, authenticate, authorize

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Account, Session},
    repositories::{self, TransactionRunner, UnitOfWork},
    usecases::{AccountDto, SessionDto},
};

/// Session issuance, revocation and request authentication.
///
/// Every lookup that fails to find an account, a session or a token reports
/// `Unauthorized`, so callers cannot tell unknown identities from bad
/// credentials.
#[async_trait]
pub trait SessionUsecase: Send + Sync {
    async fn login(&self, account_name: &str, password: &str) -> AppResult<SessionDto>;

    async fn logout(&self, account_id: Uuid) -> AppResult<()>;

    /// Resolve a bearer token to its account. Runs on every protected request.
    async fn authenticate(&self, token: &str) -> AppResult<AccountDto>;

    /// Reload an account that was already authenticated
    async fn authorize(&self, account_id: Uuid) -> AppResult<AccountDto>;
}

/// [`SessionUsecase`] backed by a [`TransactionRunner`]
#[derive(Clone)]
pub struct SessionInteractor {
    transactions: Arc<dyn TransactionRunner>,
}

impl SessionInteractor {
    pub fn new(transactions: Arc<dyn TransactionRunner>) -> Self {
        Self { transactions }
    }

    async fn open_session(
        tx: &mut dyn UnitOfWork,
        account_name: &str,
        password: &str,
    ) -> AppResult<Session> {
        let account = tx
            .accounts()
            .find_by_name(account_name)
            .await?
            .ok_or(AppError::Unauthorized)?;
        account.compare_password(password)?;

        let session = Session::new(&account)?;
        tx.sessions().save(&session).await?;
        Ok(session)
    }

    async fn close_session(tx: &mut dyn UnitOfWork, account_id: Uuid) -> AppResult<()> {
        let session = tx
            .sessions()
            .find_by_account_id(account_id)
            .await?
            .ok_or(AppError::Unauthorized)?;
        tx.sessions().delete(&session).await
    }

    async fn session_owner(tx: &mut dyn UnitOfWork, token: &str) -> AppResult<Account> {
        let session = tx
            .sessions()
            .find_by_token_not_expired(token)
            .await?
            .ok_or(AppError::Unauthorized)?;
        tx.accounts()
            .find_by_id(session.account_id())
            .await?
            .ok_or(AppError::Unauthorized)
    }

    async fn live_account(tx: &mut dyn UnitOfWork, account_id: Uuid) -> AppResult<Account> {
        tx.accounts()
            .find_by_id(account_id)
            .await?
            .ok_or(AppError::Unauthorized)
    }
}

#[async_trait]
impl SessionUsecase for SessionInteractor {
    async fn login(&self, account_name: &str, password: &str) -> AppResult<SessionDto> {
        let mut tx = self.transactions.begin().await?;
        let result = Self::open_session(tx.as_mut(), account_name, password).await;
        let session = repositories::finish(tx, result).await?;

        info!("Session opened for account: {}", session.account_id());
        Ok(SessionDto::from(&session))
    }

    async fn logout(&self, account_id: Uuid) -> AppResult<()> {
        let mut tx = self.transactions.begin().await?;
        let result = Self::close_session(tx.as_mut(), account_id).await;
        repositories::finish(tx, result).await?;

        info!("Session closed for account: {}", account_id);
        Ok(())
    }

    async fn authenticate(&self, token: &str) -> AppResult<AccountDto> {
        let mut tx = self.transactions.begin().await?;
        let result = Self::session_owner(tx.as_mut(), token).await;
        let account = repositories::finish(tx, result).await?;

        debug!("Authenticated account: {}", account.id());
        Ok(AccountDto::from(&account))
    }

    async fn authorize(&self, account_id: Uuid) -> AppResult<AccountDto> {
        let mut tx = self.transactions.begin().await?;
        let result = Self::live_account(tx.as_mut(), account_id).await;
        let account = repositories::finish(tx, result).await?;

        Ok(AccountDto::from(&account))
    }
}
