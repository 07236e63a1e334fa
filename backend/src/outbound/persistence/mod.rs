//! Persistence adapters for the user record store.
//!
//! The registry keeps its records in process memory; adapters here only
//! translate between the store and the [`UserRepository`] port.
//!
//! [`UserRepository`]: crate::domain::ports::UserRepository

mod in_memory_user_repository;

pub use in_memory_user_repository::InMemoryUserRepository;
