//! conso-cache — session-scoped consolidation cache
//!
//! Maintains a short-lived, per-session cache of per-company financial
//! summaries fetched from an external accounting API, and serves instant
//! consolidated views over a selected subset of those companies without
//! re-contacting the API.
//!
//! The expensive path (`load_session`) fans out to every company in
//! parallel with isolated failures and writes one time-bounded generation
//! of rows. The cheap path (`consolidate`) is a pure read-and-reduce over
//! the live rows, safe to run on every interaction.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use conso_cache::accounting::{AccountingClient, Credential, StaticTokenProvider};
//! use conso_cache::config::CacheConfig;
//! use conso_cache::database::{SelectionRepository, SummaryRepository};
//! use conso_cache::session::SessionCacheService;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = CacheConfig::from_env();
//! let pool = sqlx::PgPool::connect(&std::env::var("DATABASE_URL")?).await?;
//!
//! let tokens = StaticTokenProvider::new()
//!     .with_credential("tenant-a", Credential::named("token", "Acme Ltd"));
//!
//! let service = SessionCacheService::new(
//!     Arc::new(tokens),
//!     Arc::new(AccountingClient::new(&config)?),
//!     Arc::new(SummaryRepository::new(pool.clone())),
//!     Arc::new(SelectionRepository::new(pool)),
//!     config,
//! );
//!
//! let report = service.load_session("session-1", &["tenant-a".into()]).await?;
//! let view = service.consolidate("session-1", None).await?;
//! # let _ = (report, view);
//! # Ok(())
//! # }
//! ```

pub mod accounting;
pub mod config;
pub mod database;
pub mod error;
pub mod session;
pub mod summary;

pub use config::CacheConfig;
pub use error::{ConsolidateError, LoadError, StoreError};
pub use session::{SessionCacheService, SessionDataStore, SelectionStore};
pub use summary::{
    CompanySummary, ConsolidatedView, DisplaySelection, SessionFreshness, SessionLoadReport,
};
