//! Company and session loaders
//!
//! `SessionLoader::load_session` establishes a new generation: one shared
//! expiry, a leading delete of the previous generation, then a concurrent
//! fan-out of per-company loads joined without short-circuit. Each company
//! load isolates its own failures into a durable error row.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use futures::future::join_all;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::accounting::{AccountingDataSource, TokenProvider};
use crate::error::LoadError;
use crate::summary::extract::{reduce_balance_position, reduce_cash_position};
use crate::summary::{CompanySummary, SessionLoadReport, DEFAULT_VIEW};

use super::{SelectionStore, SessionDataStore};

/// Outcome of one company load. `Failed` means the failure was recorded as
/// a durable error row; persist failures surface as `Err` instead.
#[derive(Debug)]
pub enum CompanyOutcome {
    Loaded(CompanySummary),
    Failed { tenant_id: String, message: String },
}

impl CompanyOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, CompanyOutcome::Loaded(_))
    }
}

pub struct SessionLoader {
    tokens: Arc<dyn TokenProvider>,
    accounting: Arc<dyn AccountingDataSource>,
    store: Arc<dyn SessionDataStore>,
    selections: Arc<dyn SelectionStore>,
    ttl: Duration,
}

impl SessionLoader {
    pub fn new(
        tokens: Arc<dyn TokenProvider>,
        accounting: Arc<dyn AccountingDataSource>,
        store: Arc<dyn SessionDataStore>,
        selections: Arc<dyn SelectionStore>,
        ttl: Duration,
    ) -> Self {
        Self {
            tokens,
            accounting,
            store,
            selections,
            ttl,
        }
    }

    /// Reload the whole session. One expiry for the generation, delete
    /// before fan-out, join on every company regardless of individual
    /// outcome, then reset the selection to all requested companies.
    pub async fn load_session(
        &self,
        session_id: &str,
        company_ids: &[String],
    ) -> Result<SessionLoadReport, LoadError> {
        let expires_at = Utc::now() + self.ttl;

        info!(
            session_id,
            companies = company_ids.len(),
            %expires_at,
            "reloading session cache"
        );

        // The delete must complete before any insert of the new generation.
        let removed = self.store.delete_session(session_id).await?;
        debug!(session_id, removed, "cleared previous generation");

        let outcomes = join_all(
            company_ids
                .iter()
                .map(|id| self.load_company(session_id, id, expires_at)),
        )
        .await;

        let mut successful = 0usize;
        for outcome in &outcomes {
            match outcome {
                Ok(CompanyOutcome::Loaded(_)) => successful += 1,
                Ok(CompanyOutcome::Failed { tenant_id, message }) => {
                    warn!(session_id, tenant_id = %tenant_id, message = %message, "company load failed");
                }
                Err(err) => {
                    warn!(session_id, error = %err, "company outcome could not be persisted");
                }
            }
        }

        self.selections
            .set_selection(session_id, company_ids, DEFAULT_VIEW)
            .await?;

        info!(
            session_id,
            total = company_ids.len(),
            successful,
            "session cache reloaded"
        );

        Ok(SessionLoadReport {
            session_id: session_id.to_string(),
            total_companies: company_ids.len(),
            successful_companies: successful,
            expires_at,
        })
    }

    /// Load one company and persist exactly one row, success or failure.
    /// Only a storage failure escapes as `Err`.
    pub async fn load_company(
        &self,
        session_id: &str,
        tenant_id: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<CompanyOutcome, LoadError> {
        match self.fetch_summary(session_id, tenant_id, expires_at).await {
            Ok(summary) => {
                self.store.insert_summary(&summary).await?;
                Ok(CompanyOutcome::Loaded(summary))
            }
            Err(err) => {
                let message = err.to_string();
                let row = CompanySummary::failed(session_id, tenant_id, &message, expires_at);
                self.store.insert_summary(&row).await?;
                Ok(CompanyOutcome::Failed {
                    tenant_id: tenant_id.to_string(),
                    message,
                })
            }
        }
    }

    /// Resolve the credential, fetch both reports concurrently, reduce.
    /// A single report's failure is treated as absent data, never as a
    /// reason to drop the other report.
    async fn fetch_summary(
        &self,
        session_id: &str,
        tenant_id: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<CompanySummary, LoadError> {
        let credential = self
            .tokens
            .credential(tenant_id)
            .await
            .map_err(|source| LoadError::Fetch {
                company: tenant_id.to_string(),
                source,
            })?
            .ok_or_else(|| LoadError::NoCredential(tenant_id.to_string()))?;

        let as_of = Utc::now().date_naive();

        let (balance, cash) = tokio::join!(
            self.accounting
                .fetch_balance_position(&credential, tenant_id, as_of),
            self.accounting.fetch_cash_position(&credential, tenant_id),
        );

        let balance = match balance {
            Ok(rows) => Some(reduce_balance_position(&rows)),
            Err(err) => {
                warn!(tenant_id, error = %err, "balance-position fetch failed, treating as absent");
                None
            }
        };
        let cash = match cash {
            Ok(rows) => Some(reduce_cash_position(&rows)),
            Err(err) => {
                warn!(tenant_id, error = %err, "cash-position fetch failed, treating as absent");
                None
            }
        };

        let has_data = balance.is_some() || cash.is_some();
        let balance = balance.unwrap_or_default();
        let cash = cash.unwrap_or_default();

        debug!(
            tenant_id,
            assets = %balance.total_assets,
            cash = %cash.total_cash,
            has_data,
            "company summary reduced"
        );

        Ok(CompanySummary {
            session_id: session_id.to_string(),
            tenant_id: tenant_id.to_string(),
            tenant_name: credential
                .tenant_name
                .clone()
                .unwrap_or_else(|| tenant_id.to_string()),
            total_assets: balance.total_assets,
            total_liabilities: balance.total_liabilities,
            total_equity: balance.total_equity,
            total_cash: cash.total_cash,
            // Reserved fields, emitted as 0 rather than omitted.
            total_revenue: Decimal::ZERO,
            total_expenses: Decimal::ZERO,
            net_profit: Decimal::ZERO,
            is_balanced: balance.is_balanced,
            has_data,
            load_error: None,
            expires_at,
        })
    }
}
