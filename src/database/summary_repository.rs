//! Summary row repository
//!
//! One row per (session, company) per generation in `session_company_data`.
//! Liveness is a read-time filter on `expires_at`; the only delete is the
//! whole-session clear at the start of a reload.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::error::StoreError;
use crate::session::{LiveStatus, SessionDataStore};
use crate::summary::CompanySummary;

pub struct SummaryRepository {
    pool: PgPool,
}

impl SummaryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Private FromRow types — converted to domain types via From
// ============================================================================

#[derive(sqlx::FromRow)]
struct SummaryRow {
    session_id: String,
    tenant_id: String,
    tenant_name: String,
    total_assets: Decimal,
    total_liabilities: Decimal,
    total_equity: Decimal,
    total_cash: Decimal,
    total_revenue: Decimal,
    total_expenses: Decimal,
    net_profit: Decimal,
    is_balanced: bool,
    has_data: bool,
    load_error: Option<String>,
    expires_at: DateTime<Utc>,
}

impl From<SummaryRow> for CompanySummary {
    fn from(r: SummaryRow) -> Self {
        Self {
            session_id: r.session_id,
            tenant_id: r.tenant_id,
            tenant_name: r.tenant_name,
            total_assets: r.total_assets,
            total_liabilities: r.total_liabilities,
            total_equity: r.total_equity,
            total_cash: r.total_cash,
            total_revenue: r.total_revenue,
            total_expenses: r.total_expenses,
            net_profit: r.net_profit,
            is_balanced: r.is_balanced,
            has_data: r.has_data,
            load_error: r.load_error,
            expires_at: r.expires_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct StatusRow {
    companies_count: i64,
    earliest_expiry: Option<DateTime<Utc>>,
}

#[async_trait]
impl SessionDataStore for SummaryRepository {
    async fn delete_session(&self, session_id: &str) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM session_company_data WHERE session_id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn insert_summary(&self, summary: &CompanySummary) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO session_company_data
                (session_id, tenant_id, tenant_name,
                 total_assets, total_liabilities, total_equity, total_cash,
                 total_revenue, total_expenses, net_profit,
                 is_balanced, has_data, load_error, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(&summary.session_id)
        .bind(&summary.tenant_id)
        .bind(&summary.tenant_name)
        .bind(summary.total_assets)
        .bind(summary.total_liabilities)
        .bind(summary.total_equity)
        .bind(summary.total_cash)
        .bind(summary.total_revenue)
        .bind(summary.total_expenses)
        .bind(summary.net_profit)
        .bind(summary.is_balanced)
        .bind(summary.has_data)
        .bind(&summary.load_error)
        .bind(summary.expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn live_summaries(
        &self,
        session_id: &str,
        tenant_ids: &[String],
    ) -> Result<Vec<CompanySummary>, StoreError> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT session_id, tenant_id, tenant_name,
                   total_assets, total_liabilities, total_equity, total_cash,
                   total_revenue, total_expenses, net_profit,
                   is_balanced, has_data, load_error, expires_at
            FROM session_company_data
            WHERE session_id = $1
              AND tenant_id = ANY($2)
              AND expires_at > now()
            ORDER BY tenant_name
            "#,
        )
        .bind(session_id)
        .bind(tenant_ids.to_vec())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CompanySummary::from).collect())
    }

    async fn live_status(&self, session_id: &str) -> Result<LiveStatus, StoreError> {
        let status = sqlx::query_as::<_, StatusRow>(
            r#"
            SELECT COUNT(*) AS companies_count,
                   MIN(expires_at) AS earliest_expiry
            FROM session_company_data
            WHERE session_id = $1
              AND expires_at > now()
            "#,
        )
        .bind(session_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(LiveStatus {
            companies_count: status.companies_count,
            earliest_expiry: status.earliest_expiry,
        })
    }
}
