//! Postgres-backed store implementations
//!
//! Runtime-checked sqlx queries against the two session cache tables (see
//! `migrations/001_session_cache.sql`).

pub mod selection_repository;
pub mod summary_repository;

pub use selection_repository::SelectionRepository;
pub use summary_repository::SummaryRepository;
