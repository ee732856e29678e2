//! Account service domain models

pub mod account;
pub mod session;

// Re-export for convenience
pub use account::Account;
pub use session::Session;
