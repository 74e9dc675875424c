//! Persistence adapters. libsql-backed quiz history.

pub mod sqlite_repo;

pub use sqlite_repo::SqliteRepo;
