//! Error taxonomy for the session cache
//!
//! Company-level load failures (`NoCredential`, `Fetch`) are recoverable:
//! they become durable error rows and never abort the sibling fan-out.
//! `Persist` means the cache itself is unavailable and is allowed to
//! propagate. Consolidation errors are terminal, user-facing conditions.

use thiserror::Error;

/// Storage-boundary errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Errors raised while loading one company's data into the session cache.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The token provider has no credential for this company.
    #[error("no credential available for company {0}")]
    NoCredential(String),

    /// Credential resolution or report retrieval failed outright.
    #[error("fetch failed for company {company}: {source}")]
    Fetch {
        company: String,
        #[source]
        source: anyhow::Error,
    },

    /// The summary row could not be written. Unlike the variants above this
    /// one propagates: the outcome cannot be recorded either way.
    #[error("failed to persist summary row: {0}")]
    Persist(#[from] StoreError),
}

/// Errors raised on the read-and-aggregate path.
#[derive(Error, Debug)]
pub enum ConsolidateError {
    /// The resolved selection is empty; the caller must pick companies.
    #[error("no companies selected for consolidation")]
    NoSelection,

    /// No unexpired rows matched the selection. Covers both "never loaded"
    /// and "expired"; the remedy is the same either way: reload.
    #[error("no live data for session, reload required")]
    NoLiveData,

    #[error(transparent)]
    Store(#[from] StoreError),
}
