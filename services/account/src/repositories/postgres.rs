//! PostgreSQL implementation of the persistence ports

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Account, Session},
    repositories::{AccountRepository, SessionRepository, TransactionRunner, UnitOfWork},
};

#[derive(Debug, FromRow)]
struct AccountRow {
    id: Uuid,
    name: String,
    password_hash: String,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Account::restore(row.id, row.name, row.password_hash)
    }
}

#[derive(Debug, FromRow)]
struct SessionRow {
    account_id: Uuid,
    token: String,
    expires_at: DateTime<Utc>,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Session::restore(row.account_id, row.token, row.expires_at)
    }
}

/// The unique index on `accounts.name` has the final word on name reuse
fn map_write_error(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return AppError::Conflict;
        }
    }
    AppError::from(err)
}

/// Opens PostgreSQL transactions
#[derive(Clone)]
pub struct PgTransactionRunner {
    pool: PgPool,
}

impl PgTransactionRunner {
    /// Create a new transaction runner
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionRunner for PgTransactionRunner {
    async fn begin(&self) -> AppResult<Box<dyn UnitOfWork>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgUnitOfWork { tx }))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(common::database::health_check(&self.pool).await?)
    }
}

/// Repositories bound to one PostgreSQL transaction
pub struct PgUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    fn accounts(&mut self) -> &mut dyn AccountRepository {
        self
    }

    fn sessions(&mut self) -> &mut dyn SessionRepository {
        self
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        debug!("Rolling back transaction");
        self.tx.rollback().await?;
        Ok(())
    }
}

#[async_trait]
impl AccountRepository for PgUnitOfWork {
    async fn create(&mut self, account: &Account) -> AppResult<()> {
        info!("Creating account: {}", account.id());

        sqlx::query(
            r#"
            INSERT INTO accounts (id, name, password_hash)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(account.id())
        .bind(account.name())
        .bind(account.password_hash())
        .execute(&mut *self.tx)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }

    async fn update(&mut self, account: &Account) -> AppResult<()> {
        info!("Updating account: {}", account.id());

        sqlx::query(
            r#"
            UPDATE accounts
            SET name = $1, password_hash = $2, updated_at = NOW()
            WHERE id = $3 AND deleted_at IS NULL
            "#,
        )
        .bind(account.name())
        .bind(account.password_hash())
        .bind(account.id())
        .execute(&mut *self.tx)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }

    async fn delete(&mut self, account: &Account) -> AppResult<()> {
        info!("Deleting account: {}", account.id());

        sqlx::query(
            r#"
            UPDATE accounts
            SET deleted_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(account.id())
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    async fn find_by_id(&mut self, id: Uuid) -> AppResult<Option<Account>> {
        debug!("Finding account by ID: {}", id);

        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, name, password_hash
            FROM accounts
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(row.map(Account::from))
    }

    async fn find_by_name(&mut self, name: &str) -> AppResult<Option<Account>> {
        debug!("Finding account by name: {}", name);

        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, name, password_hash
            FROM accounts
            WHERE name = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(name)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(row.map(Account::from))
    }

    async fn find_by_name_including_deleted(&mut self, name: &str) -> AppResult<Option<Account>> {
        debug!("Finding account by name, deleted included: {}", name);

        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, name, password_hash
            FROM accounts
            WHERE name = $1
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(row.map(Account::from))
    }
}

#[async_trait]
impl SessionRepository for PgUnitOfWork {
    async fn save(&mut self, session: &Session) -> AppResult<()> {
        info!("Saving session for account: {}", session.account_id());

        sqlx::query(
            r#"
            INSERT INTO sessions (account_id, token, expires_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (account_id)
            DO UPDATE SET token = EXCLUDED.token,
                          expires_at = EXCLUDED.expires_at,
                          updated_at = NOW()
            "#,
        )
        .bind(session.account_id())
        .bind(session.token())
        .bind(session.expires_at())
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    async fn delete(&mut self, session: &Session) -> AppResult<()> {
        info!("Deleting session for account: {}", session.account_id());

        sqlx::query("DELETE FROM sessions WHERE account_id = $1")
            .bind(session.account_id())
            .execute(&mut *self.tx)
            .await?;

        Ok(())
    }

    async fn find_by_account_id(&mut self, account_id: Uuid) -> AppResult<Option<Session>> {
        debug!("Finding session by account ID: {}", account_id);

        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT account_id, token, expires_at
            FROM sessions
            WHERE account_id = $1
            "#,
        )
        .bind(account_id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(row.map(Session::from))
    }

    async fn find_by_token_not_expired(&mut self, token: &str) -> AppResult<Option<Session>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT account_id, token, expires_at
            FROM sessions
            WHERE token = $1 AND expires_at > NOW()
            "#,
        )
        .bind(token)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(row.map(Session::from))
    }
}
