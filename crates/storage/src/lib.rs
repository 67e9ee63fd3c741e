#![forbid(unsafe_code)]

pub mod ledger;
pub mod repository;
pub mod sqlite;

pub use ledger::LEDGER_KEY;
pub use repository::{InMemoryLedger, ProgressLedger, Storage, StorageError};
