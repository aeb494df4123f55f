//! Accounting API boundary
//!
//! The session cache only ever talks to the outside world through these two
//! traits: credential resolution and report retrieval. Both take the company
//! identifier (and credential) per call so the fan-out can run concurrently
//! without shared client state.

pub mod client;
pub mod token;
pub mod types;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

pub use client::AccountingClient;
pub use token::StaticTokenProvider;
pub use types::{Credential, ReportCell, ReportResponse, ReportRow, ReportRowType};

/// Resolves the per-company credential needed to call the accounting API.
/// A missing credential is a normal outcome, not an error.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn credential(&self, company_id: &str) -> Result<Option<Credential>>;
}

/// Fetches raw financial report data for one company.
#[async_trait]
pub trait AccountingDataSource: Send + Sync {
    /// Balance position (assets / liabilities / equity) as of a date.
    async fn fetch_balance_position(
        &self,
        credential: &Credential,
        company_id: &str,
        as_of: NaiveDate,
    ) -> Result<Vec<ReportRow>>;

    /// Cash position across the company's accounts.
    async fn fetch_cash_position(
        &self,
        credential: &Credential,
        company_id: &str,
    ) -> Result<Vec<ReportRow>>;
}
