//! Account and session management service
//!
//! Accounts register with a name and a password, log in to obtain a session
//! token, and present that token as `Authorization: Session <token>` on
//! protected endpoints.

pub mod config;
pub mod database;
pub mod error;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repositories;
pub mod routes;
pub mod schema;
pub mod service;
pub mod state;
pub mod token;
pub mod usecases;
pub mod validation;

#[cfg(test)]
mod testing;
