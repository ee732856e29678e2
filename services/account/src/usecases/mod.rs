//! Account and session usecases
//!
//! Each usecase call owns exactly one unit of work: validation that needs no
//! storage runs before it is opened, and any failure inside it rolls back
//! every write of the call.

pub mod account;
pub mod dto;
pub mod session;

pub use account::{AccountInteractor, AccountUsecase};
pub use dto::{AccountDto, SessionDto};
pub use session::{SessionInteractor, SessionUsecase};
