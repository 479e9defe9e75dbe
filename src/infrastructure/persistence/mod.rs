//! SQLite repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries with bound parameters.

pub mod sqlite_mapping_repository;

pub use sqlite_mapping_repository::SqliteMappingRepository;
