//! Session cache lifecycle
//!
//! Loading is the expensive, rarely-run path: one parallel fetch per
//! company into a time-bounded generation of rows. Consolidation is the
//! cheap, frequently-run path: a pure read-and-reduce over the live rows.
//! `SessionCacheService` ties the two together with the selection store and
//! the freshness probe.

pub mod consolidate;
pub mod loader;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::accounting::{AccountingDataSource, TokenProvider};
use crate::config::CacheConfig;
use crate::error::{ConsolidateError, LoadError, StoreError};
use crate::summary::{
    CompanySummary, ConsolidatedView, DisplaySelection, SessionFreshness, SessionLoadReport,
};

pub use consolidate::Consolidator;
pub use loader::{CompanyOutcome, SessionLoader};

/// Live-row probe result: row count and earliest expiry.
#[derive(Debug, Clone)]
pub struct LiveStatus {
    pub companies_count: i64,
    pub earliest_expiry: Option<DateTime<Utc>>,
}

/// Durable store for per-company summary rows. Expiry is enforced by the
/// read methods (filter on `expires_at`), never by deletion; expired rows
/// linger until the next reload's leading delete.
#[async_trait]
pub trait SessionDataStore: Send + Sync {
    /// Delete every row belonging to the session, expired or not. Returns
    /// the number of rows removed.
    async fn delete_session(&self, session_id: &str) -> Result<u64, StoreError>;

    /// Insert one summary row. Rows are never updated in place.
    async fn insert_summary(&self, summary: &CompanySummary) -> Result<(), StoreError>;

    /// All live rows for the session whose tenant is in `tenant_ids`.
    async fn live_summaries(
        &self,
        session_id: &str,
        tenant_ids: &[String],
    ) -> Result<Vec<CompanySummary>, StoreError>;

    /// Count of live rows and their earliest expiry.
    async fn live_status(&self, session_id: &str) -> Result<LiveStatus, StoreError>;
}

/// Durable single-row-per-session selection state.
#[async_trait]
pub trait SelectionStore: Send + Sync {
    /// Atomic insert-or-replace keyed by session id.
    async fn set_selection(
        &self,
        session_id: &str,
        tenant_ids: &[String],
        view: &str,
    ) -> Result<(), StoreError>;

    /// The stored selection, or `None` when the session has never set one.
    async fn get_selection(&self, session_id: &str)
        -> Result<Option<DisplaySelection>, StoreError>;
}

/// Facade over the session cache operations exposed to callers.
pub struct SessionCacheService {
    loader: SessionLoader,
    consolidator: Consolidator,
    data: Arc<dyn SessionDataStore>,
    selections: Arc<dyn SelectionStore>,
}

impl SessionCacheService {
    pub fn new(
        tokens: Arc<dyn TokenProvider>,
        accounting: Arc<dyn AccountingDataSource>,
        data: Arc<dyn SessionDataStore>,
        selections: Arc<dyn SelectionStore>,
        config: CacheConfig,
    ) -> Self {
        let loader = SessionLoader::new(
            tokens,
            accounting,
            Arc::clone(&data),
            Arc::clone(&selections),
            config.session_ttl,
        );
        let consolidator = Consolidator::new(Arc::clone(&data), Arc::clone(&selections));

        Self {
            loader,
            consolidator,
            data,
            selections,
        }
    }

    /// Reload the session's cache from the accounting API. Partial success
    /// is normal; the report carries the counts.
    pub async fn load_session(
        &self,
        session_id: &str,
        company_ids: &[String],
    ) -> Result<SessionLoadReport, LoadError> {
        self.loader.load_session(session_id, company_ids).await
    }

    /// Consolidated view over the selected companies' live rows. Pass
    /// `None` to use the stored selection.
    pub async fn consolidate(
        &self,
        session_id: &str,
        selection: Option<&[String]>,
    ) -> Result<ConsolidatedView, ConsolidateError> {
        self.consolidator.consolidate(session_id, selection).await
    }

    pub async fn set_selection(
        &self,
        session_id: &str,
        tenant_ids: &[String],
        view: &str,
    ) -> Result<(), StoreError> {
        self.selections
            .set_selection(session_id, tenant_ids, view)
            .await
    }

    /// Stored selection, or the empty overview default when none exists.
    pub async fn get_selection(&self, session_id: &str) -> Result<DisplaySelection, StoreError> {
        Ok(self
            .selections
            .get_selection(session_id)
            .await?
            .unwrap_or_else(|| DisplaySelection::default_for(session_id)))
    }

    /// Whether the session currently has any unexpired rows, and when the
    /// earliest of them lapses.
    pub async fn has_valid_data(&self, session_id: &str) -> Result<SessionFreshness, StoreError> {
        let status = self.data.live_status(session_id).await?;
        Ok(SessionFreshness {
            has_data: status.companies_count > 0,
            companies_count: status.companies_count,
            expires_at: status.earliest_expiry,
        })
    }
}
