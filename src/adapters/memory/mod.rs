//! In-memory adapters for testing.

mod account_repository;

pub use account_repository::MemoryAccountRepository;
