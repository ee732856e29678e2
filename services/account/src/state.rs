//! Application state shared across handlers

use std::sync::Arc;

use crate::{
    repositories::TransactionRunner,
    usecases::{AccountUsecase, SessionUsecase},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TransactionRunner>,
    pub account_usecase: Arc<dyn AccountUsecase>,
    pub session_usecase: Arc<dyn SessionUsecase>,
}
