//! In-memory store implementing the persistence ports for unit tests.
//!
//! A unit of work holds the store lock for its whole lifetime and works on a
//! copy of the state, which only replaces the shared state on commit.

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Account, Session},
    repositories::{AccountRepository, SessionRepository, TransactionRunner, UnitOfWork},
};

#[derive(Debug, Clone)]
struct StoredAccount {
    account: Account,
    deleted: bool,
}

#[derive(Debug, Clone, Default)]
struct StoreState {
    accounts: Vec<StoredAccount>,
    sessions: HashMap<Uuid, Session>,
}

/// Write operation that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    AccountCreate,
    AccountUpdate,
    AccountDelete,
    SessionSave,
    SessionDelete,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<StoreState>>,
    writes: Arc<AtomicUsize>,
    fail_point: Arc<std::sync::Mutex<Option<FailPoint>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later `point` write fail with an internal error
    pub fn fail_on(&self, point: FailPoint) {
        *self.fail_point.lock().unwrap() = Some(point);
    }

    /// Number of attempted writes, rolled back ones included
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub async fn insert_account(&self, account: Account, deleted: bool) {
        self.state
            .lock()
            .await
            .accounts
            .push(StoredAccount { account, deleted });
    }

    pub async fn insert_session(&self, session: Session) {
        self.state
            .lock()
            .await
            .sessions
            .insert(session.account_id(), session);
    }

    /// Account with the given id and whether it is deleted
    pub async fn account(&self, id: Uuid) -> Option<(Account, bool)> {
        self.state
            .lock()
            .await
            .accounts
            .iter()
            .find(|stored| stored.account.id() == id)
            .map(|stored| (stored.account.clone(), stored.deleted))
    }

    pub async fn session_of(&self, account_id: Uuid) -> Option<Session> {
        self.state.lock().await.sessions.get(&account_id).cloned()
    }

    pub async fn account_count(&self) -> usize {
        self.state.lock().await.accounts.len()
    }
}

#[async_trait]
impl TransactionRunner for MemoryStore {
    async fn begin(&self) -> AppResult<Box<dyn UnitOfWork>> {
        let guard = self.state.clone().lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(MemoryUnitOfWork {
            guard,
            working,
            writes: self.writes.clone(),
            fail_point: self.fail_point.clone(),
        }))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

pub struct MemoryUnitOfWork {
    guard: OwnedMutexGuard<StoreState>,
    working: StoreState,
    writes: Arc<AtomicUsize>,
    fail_point: Arc<std::sync::Mutex<Option<FailPoint>>>,
}

impl MemoryUnitOfWork {
    fn write(&self, point: FailPoint) -> AppResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if *self.fail_point.lock().unwrap() == Some(point) {
            return Err(AppError::internal(format!("injected failure on {:?}", point)));
        }
        Ok(())
    }

    fn live_account_mut(&mut self, id: Uuid) -> Option<&mut StoredAccount> {
        self.working
            .accounts
            .iter_mut()
            .find(|stored| stored.account.id() == id && !stored.deleted)
    }

    fn name_taken_by_other(&self, account: &Account) -> bool {
        self.working
            .accounts
            .iter()
            .any(|stored| stored.account.name() == account.name() && stored.account.id() != account.id())
    }
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    fn accounts(&mut self) -> &mut dyn AccountRepository {
        self
    }

    fn sessions(&mut self) -> &mut dyn SessionRepository {
        self
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let MemoryUnitOfWork {
            mut guard, working, ..
        } = *self;
        *guard = working;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
impl AccountRepository for MemoryUnitOfWork {
    async fn create(&mut self, account: &Account) -> AppResult<()> {
        self.write(FailPoint::AccountCreate)?;
        if self.name_taken_by_other(account) {
            return Err(AppError::Conflict);
        }
        self.working.accounts.push(StoredAccount {
            account: account.clone(),
            deleted: false,
        });
        Ok(())
    }

    async fn update(&mut self, account: &Account) -> AppResult<()> {
        self.write(FailPoint::AccountUpdate)?;
        if self.name_taken_by_other(account) {
            return Err(AppError::Conflict);
        }
        if let Some(stored) = self.live_account_mut(account.id()) {
            stored.account = account.clone();
        }
        Ok(())
    }

    async fn delete(&mut self, account: &Account) -> AppResult<()> {
        self.write(FailPoint::AccountDelete)?;
        if let Some(stored) = self.live_account_mut(account.id()) {
            stored.deleted = true;
        }
        Ok(())
    }

    async fn find_by_id(&mut self, id: Uuid) -> AppResult<Option<Account>> {
        Ok(self.live_account_mut(id).map(|stored| stored.account.clone()))
    }

    async fn find_by_name(&mut self, name: &str) -> AppResult<Option<Account>> {
        Ok(self
            .working
            .accounts
            .iter()
            .find(|stored| stored.account.name() == name && !stored.deleted)
            .map(|stored| stored.account.clone()))
    }

    async fn find_by_name_including_deleted(&mut self, name: &str) -> AppResult<Option<Account>> {
        Ok(self
            .working
            .accounts
            .iter()
            .find(|stored| stored.account.name() == name)
            .map(|stored| stored.account.clone()))
    }
}

#[async_trait]
impl SessionRepository for MemoryUnitOfWork {
    async fn save(&mut self, session: &Session) -> AppResult<()> {
        self.write(FailPoint::SessionSave)?;
        self.working
            .sessions
            .insert(session.account_id(), session.clone());
        Ok(())
    }

    async fn delete(&mut self, session: &Session) -> AppResult<()> {
        self.write(FailPoint::SessionDelete)?;
        self.working.sessions.remove(&session.account_id());
        Ok(())
    }

    async fn find_by_account_id(&mut self, account_id: Uuid) -> AppResult<Option<Session>> {
        Ok(self.working.sessions.get(&account_id).cloned())
    }

    async fn find_by_token_not_expired(&mut self, token: &str) -> AppResult<Option<Session>> {
        let now = Utc::now();
        Ok(self
            .working
            .sessions
            .values()
            .find(|session| session.token() == token && !session.is_expired(now))
            .cloned())
    }
}
