//! Shared test infrastructure
//!
//! In-memory store implementations plus a scripted accounting stub, so the
//! cache lifecycle can be exercised end to end without Postgres or a live
//! accounting API.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::bail;
use async_trait::async_trait;
use chrono::{Duration, Utc};

use conso_cache::accounting::types::{Credential, ReportRow};
use conso_cache::accounting::{AccountingDataSource, StaticTokenProvider};
use conso_cache::config::CacheConfig;
use conso_cache::error::StoreError;
use conso_cache::session::{LiveStatus, SelectionStore, SessionCacheService, SessionDataStore};
use conso_cache::summary::{CompanySummary, DisplaySelection};

// ============================================================================
// In-memory stores
// ============================================================================

#[derive(Default)]
pub struct MemoryData {
    rows: Mutex<Vec<CompanySummary>>,
}

impl MemoryData {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every stored row, live or expired. Test-side inspection only.
    pub fn all_rows(&self) -> Vec<CompanySummary> {
        self.rows.lock().unwrap().clone()
    }

    /// Insert a row directly, bypassing the loader.
    pub fn push_row(&self, row: CompanySummary) {
        self.rows.lock().unwrap().push(row);
    }
}

#[async_trait]
impl SessionDataStore for MemoryData {
    async fn delete_session(&self, session_id: &str) -> Result<u64, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.session_id != session_id);
        Ok((before - rows.len()) as u64)
    }

    async fn insert_summary(&self, summary: &CompanySummary) -> Result<(), StoreError> {
        self.rows.lock().unwrap().push(summary.clone());
        Ok(())
    }

    async fn live_summaries(
        &self,
        session_id: &str,
        tenant_ids: &[String],
    ) -> Result<Vec<CompanySummary>, StoreError> {
        let now = Utc::now();
        let mut rows: Vec<CompanySummary> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| {
                r.session_id == session_id
                    && tenant_ids.contains(&r.tenant_id)
                    && r.expires_at > now
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.tenant_name.cmp(&b.tenant_name));
        Ok(rows)
    }

    async fn live_status(&self, session_id: &str) -> Result<LiveStatus, StoreError> {
        let now = Utc::now();
        let rows = self.rows.lock().unwrap();
        let live: Vec<_> = rows
            .iter()
            .filter(|r| r.session_id == session_id && r.expires_at > now)
            .collect();
        Ok(LiveStatus {
            companies_count: live.len() as i64,
            earliest_expiry: live.iter().map(|r| r.expires_at).min(),
        })
    }
}

#[derive(Default)]
pub struct MemorySelections {
    rows: Mutex<HashMap<String, DisplaySelection>>,
}

impl MemorySelections {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl SelectionStore for MemorySelections {
    async fn set_selection(
        &self,
        session_id: &str,
        tenant_ids: &[String],
        view: &str,
    ) -> Result<(), StoreError> {
        self.rows.lock().unwrap().insert(
            session_id.to_string(),
            DisplaySelection {
                session_id: session_id.to_string(),
                selected_tenant_ids: tenant_ids.to_vec(),
                current_view: view.to_string(),
                last_updated: Utc::now(),
            },
        );
        Ok(())
    }

    async fn get_selection(
        &self,
        session_id: &str,
    ) -> Result<Option<DisplaySelection>, StoreError> {
        Ok(self.rows.lock().unwrap().get(session_id).cloned())
    }
}

// ============================================================================
// Scripted accounting stub
// ============================================================================

type Scripted = HashMap<String, Result<Vec<ReportRow>, String>>;

/// Returns scripted report rows (or failures) per company. Companies with
/// no script get an empty, successful report.
#[derive(Default)]
pub struct ScriptedAccounting {
    balance: Scripted,
    cash: Scripted,
}

impl ScriptedAccounting {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_balance(mut self, company_id: &str, rows: Vec<ReportRow>) -> Self {
        self.balance.insert(company_id.to_string(), Ok(rows));
        self
    }

    pub fn with_cash(mut self, company_id: &str, rows: Vec<ReportRow>) -> Self {
        self.cash.insert(company_id.to_string(), Ok(rows));
        self
    }

    pub fn with_balance_failure(mut self, company_id: &str, message: &str) -> Self {
        self.balance
            .insert(company_id.to_string(), Err(message.to_string()));
        self
    }

    pub fn with_cash_failure(mut self, company_id: &str, message: &str) -> Self {
        self.cash
            .insert(company_id.to_string(), Err(message.to_string()));
        self
    }
}

#[async_trait]
impl AccountingDataSource for ScriptedAccounting {
    async fn fetch_balance_position(
        &self,
        _credential: &Credential,
        company_id: &str,
        _as_of: chrono::NaiveDate,
    ) -> anyhow::Result<Vec<ReportRow>> {
        match self.balance.get(company_id) {
            Some(Ok(rows)) => Ok(rows.clone()),
            Some(Err(message)) => bail!("{message}"),
            None => Ok(Vec::new()),
        }
    }

    async fn fetch_cash_position(
        &self,
        _credential: &Credential,
        company_id: &str,
    ) -> anyhow::Result<Vec<ReportRow>> {
        match self.cash.get(company_id) {
            Some(Ok(rows)) => Ok(rows.clone()),
            Some(Err(message)) => bail!("{message}"),
            None => Ok(Vec::new()),
        }
    }
}

// ============================================================================
// Report builders and harness
// ============================================================================

/// Balance-position report with one row per section.
pub fn balance_report(assets: &str, liabilities: &str, equity: &str) -> Vec<ReportRow> {
    vec![
        ReportRow::section("Assets", vec![ReportRow::row(&["Accounts", assets])]),
        ReportRow::section(
            "Liabilities",
            vec![ReportRow::row(&["Payables", liabilities])],
        ),
        ReportRow::section("Equity", vec![ReportRow::row(&["Capital", equity])]),
    ]
}

/// Cash-position report: one bank section, closing balances in column 4.
pub fn cash_report(accounts: &[(&str, &str)]) -> Vec<ReportRow> {
    let rows = accounts
        .iter()
        .map(|&(label, closing)| ReportRow::row(&[label, "0", "0", "0", closing]))
        .collect();
    vec![ReportRow::section("Bank Accounts", rows)]
}

pub struct TestHarness {
    pub service: SessionCacheService,
    pub data: Arc<MemoryData>,
    pub selections: Arc<MemorySelections>,
}

fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Wire a service against in-memory stores with the given TTL. A negative
/// TTL produces rows that are already expired at read time.
pub fn harness(
    tokens: StaticTokenProvider,
    accounting: ScriptedAccounting,
    ttl_minutes: i64,
) -> TestHarness {
    init_tracing();
    let data = MemoryData::new();
    let selections = MemorySelections::new();
    let config = CacheConfig::default().with_ttl(Duration::minutes(ttl_minutes));

    let service = SessionCacheService::new(
        Arc::new(tokens),
        Arc::new(accounting),
        data.clone(),
        selections.clone(),
        config,
    );

    TestHarness {
        service,
        data,
        selections,
    }
}

pub fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
