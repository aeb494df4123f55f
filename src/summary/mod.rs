//! Session cache domain types
//!
//! One `CompanySummary` row per (session, company) per generation, plus the
//! per-session display selection and the consolidated view produced from
//! live rows.

pub mod extract;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// View tag a fresh selection starts on.
pub const DEFAULT_VIEW: &str = "overview";

/// One company's cached financial summary. Written exactly once per reload,
/// never updated in place; `expires_at` is shared by the whole generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanySummary {
    pub session_id: String,
    pub tenant_id: String,
    pub tenant_name: String,
    pub total_assets: Decimal,
    /// Stored as an absolute value.
    pub total_liabilities: Decimal,
    pub total_equity: Decimal,
    pub total_cash: Decimal,
    /// Reserved, always 0 for now.
    pub total_revenue: Decimal,
    /// Reserved, always 0 for now.
    pub total_expenses: Decimal,
    /// Reserved, always 0 for now.
    pub net_profit: Decimal,
    pub is_balanced: bool,
    /// True iff at least one underlying report was retrieved.
    pub has_data: bool,
    /// Present only on rows recording a failed load.
    pub load_error: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl CompanySummary {
    /// Error row recording a failed load: all financials zeroed, no data.
    pub fn failed(
        session_id: &str,
        tenant_id: &str,
        message: &str,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            session_id: session_id.to_string(),
            tenant_id: tenant_id.to_string(),
            tenant_name: tenant_id.to_string(),
            total_assets: Decimal::ZERO,
            total_liabilities: Decimal::ZERO,
            total_equity: Decimal::ZERO,
            total_cash: Decimal::ZERO,
            total_revenue: Decimal::ZERO,
            total_expenses: Decimal::ZERO,
            net_profit: Decimal::ZERO,
            is_balanced: false,
            has_data: false,
            load_error: Some(message.to_string()),
            expires_at,
        }
    }
}

/// Which companies a session is currently displaying, and on which view.
/// One row per session, upsert semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySelection {
    pub session_id: String,
    pub selected_tenant_ids: Vec<String>,
    pub current_view: String,
    pub last_updated: DateTime<Utc>,
}

impl DisplaySelection {
    /// Default returned when a session has no stored selection yet.
    pub fn default_for(session_id: &str) -> Self {
        Self {
            session_id: session_id.to_string(),
            selected_tenant_ids: Vec::new(),
            current_view: DEFAULT_VIEW.to_string(),
            last_updated: Utc::now(),
        }
    }
}

/// Result of one `load_session` invocation. The success count is
/// informational; callers proceed to consolidation even on partial success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionLoadReport {
    pub session_id: String,
    pub total_companies: usize,
    pub successful_companies: usize,
    pub expires_at: DateTime<Utc>,
}

/// Field-wise sums across the selected live rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsolidatedTotals {
    pub total_assets: Decimal,
    pub total_liabilities: Decimal,
    pub total_equity: Decimal,
    pub total_cash: Decimal,
    pub total_revenue: Decimal,
    pub total_expenses: Decimal,
    pub net_profit: Decimal,
}

/// Per-company projection of a live summary row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidatedCompany {
    pub tenant_id: String,
    pub tenant_name: String,
    pub total_assets: Decimal,
    pub total_liabilities: Decimal,
    pub total_equity: Decimal,
    pub total_cash: Decimal,
    pub net_profit: Decimal,
    pub is_balanced: bool,
    pub has_data: bool,
    pub load_error: Option<String>,
}

impl From<&CompanySummary> for ConsolidatedCompany {
    fn from(row: &CompanySummary) -> Self {
        Self {
            tenant_id: row.tenant_id.clone(),
            tenant_name: row.tenant_name.clone(),
            total_assets: row.total_assets,
            total_liabilities: row.total_liabilities,
            total_equity: row.total_equity,
            total_cash: row.total_cash,
            net_profit: row.net_profit,
            is_balanced: row.is_balanced,
            has_data: row.has_data,
            load_error: row.load_error.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsolidationCounts {
    pub companies: usize,
    pub balanced: usize,
    pub with_data: usize,
    pub with_errors: usize,
}

/// The consolidated view: totals, per-company detail, and counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidatedView {
    pub session_id: String,
    pub totals: ConsolidatedTotals,
    pub companies: Vec<ConsolidatedCompany>,
    pub counts: ConsolidationCounts,
}

/// Freshness probe result: whether the session has any live rows, how many,
/// and the earliest expiry among them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionFreshness {
    pub has_data: bool,
    pub companies_count: i64,
    pub expires_at: Option<DateTime<Utc>>,
}
