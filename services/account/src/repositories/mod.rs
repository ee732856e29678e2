//! Persistence ports for accounts and sessions
//!
//! Every repository call happens inside a [`UnitOfWork`], the explicit
//! transaction handle opened by a [`TransactionRunner`]. A unit of work that
//! is dropped without being committed rolls back.

use async_trait::async_trait;
use tracing::warn;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Account, Session},
};

pub mod postgres;

pub use postgres::PgTransactionRunner;

/// Account persistence
#[async_trait]
pub trait AccountRepository: Send {
    async fn create(&mut self, account: &Account) -> AppResult<()>;

    async fn update(&mut self, account: &Account) -> AppResult<()>;

    /// Soft delete: the row is kept and its name stays reserved
    async fn delete(&mut self, account: &Account) -> AppResult<()>;

    async fn find_by_id(&mut self, id: Uuid) -> AppResult<Option<Account>>;

    /// Excludes deleted accounts
    async fn find_by_name(&mut self, name: &str) -> AppResult<Option<Account>>;

    async fn find_by_name_including_deleted(&mut self, name: &str) -> AppResult<Option<Account>>;
}

/// Session persistence, keyed by account id
#[async_trait]
pub trait SessionRepository: Send {
    /// Insert, or overwrite the account's existing session
    async fn save(&mut self, session: &Session) -> AppResult<()>;

    async fn delete(&mut self, session: &Session) -> AppResult<()>;

    async fn find_by_account_id(&mut self, account_id: Uuid) -> AppResult<Option<Session>>;

    /// Only matches sessions whose expiry lies in the future
    async fn find_by_token_not_expired(&mut self, token: &str) -> AppResult<Option<Session>>;
}

/// Transaction-scoped access to the repositories
#[async_trait]
pub trait UnitOfWork: Send {
    fn accounts(&mut self) -> &mut dyn AccountRepository;

    fn sessions(&mut self) -> &mut dyn SessionRepository;

    async fn commit(self: Box<Self>) -> AppResult<()>;

    async fn rollback(self: Box<Self>) -> AppResult<()>;
}

/// Opens units of work against the backing store
#[async_trait]
pub trait TransactionRunner: Send + Sync {
    async fn begin(&self) -> AppResult<Box<dyn UnitOfWork>>;

    async fn health_check(&self) -> AppResult<bool>;
}

/// Commit `tx` if `result` is a success, roll it back otherwise.
///
/// The original error always wins over a failed rollback.
pub async fn finish<T>(tx: Box<dyn UnitOfWork>, result: AppResult<T>) -> AppResult<T> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!("Failed to roll back transaction: {}", rollback_err);
            }
            Err(err)
        }
    }
}
