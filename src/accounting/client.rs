//! HTTP client for the accounting API
//!
//! Thin reqwest wrapper: bearer auth per call, fixed timeout, JSON report
//! envelopes decoded into `ReportRow` trees.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;

use super::types::{Credential, ReportResponse, ReportRow};
use super::AccountingDataSource;
use crate::config::CacheConfig;

pub struct AccountingClient {
    client: Client,
    base_url: String,
}

impl AccountingClient {
    pub fn new(config: &CacheConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to build accounting API client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_report(
        &self,
        credential: &Credential,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<ReportRow>> {
        let url = format!("{}/{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&credential.access_token)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", path))?;

        let status = response.status();
        if !status.is_success() {
            bail!("Accounting API returned {} for {}", status, path);
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", path))?;

        let report: ReportResponse = serde_json::from_str(&body)
            .with_context(|| format!("Failed to decode report from {}", path))?;

        Ok(report.rows)
    }
}

#[async_trait]
impl AccountingDataSource for AccountingClient {
    async fn fetch_balance_position(
        &self,
        credential: &Credential,
        company_id: &str,
        as_of: NaiveDate,
    ) -> Result<Vec<ReportRow>> {
        let path = format!("companies/{}/reports/balance-position", company_id);
        self.fetch_report(
            credential,
            &path,
            &[("asOf", as_of.format("%Y-%m-%d").to_string())],
        )
        .await
    }

    async fn fetch_cash_position(
        &self,
        credential: &Credential,
        company_id: &str,
    ) -> Result<Vec<ReportRow>> {
        let path = format!("companies/{}/reports/cash-position", company_id);
        self.fetch_report(credential, &path, &[]).await
    }
}
