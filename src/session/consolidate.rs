//! Consolidated view reduction
//!
//! Pure read path: resolve the selection, read the live rows, sum. No
//! external calls and no writes, safe to run on every UI interaction.

use std::sync::Arc;

use tracing::debug;

use crate::error::ConsolidateError;
use crate::summary::{
    ConsolidatedCompany, ConsolidatedTotals, ConsolidatedView, ConsolidationCounts,
};

use super::{SelectionStore, SessionDataStore};

pub struct Consolidator {
    store: Arc<dyn SessionDataStore>,
    selections: Arc<dyn SelectionStore>,
}

impl Consolidator {
    pub fn new(store: Arc<dyn SessionDataStore>, selections: Arc<dyn SelectionStore>) -> Self {
        Self { store, selections }
    }

    /// Reduce the selected companies' live rows into totals, per-company
    /// detail, and counts. An explicit `selection` overrides the stored
    /// one; a session with neither selection nor live rows gets a
    /// specific, actionable error.
    pub async fn consolidate(
        &self,
        session_id: &str,
        selection: Option<&[String]>,
    ) -> Result<ConsolidatedView, ConsolidateError> {
        let selected: Vec<String> = match selection {
            Some(ids) => ids.to_vec(),
            None => self
                .selections
                .get_selection(session_id)
                .await?
                .map(|s| s.selected_tenant_ids)
                .unwrap_or_default(),
        };

        if selected.is_empty() {
            return Err(ConsolidateError::NoSelection);
        }

        let rows = self.store.live_summaries(session_id, &selected).await?;
        if rows.is_empty() {
            // "Never loaded" and "expired" are indistinguishable on purpose:
            // both call for a reload.
            return Err(ConsolidateError::NoLiveData);
        }

        let mut totals = ConsolidatedTotals::default();
        let mut counts = ConsolidationCounts {
            companies: rows.len(),
            ..Default::default()
        };

        for row in &rows {
            totals.total_assets += row.total_assets;
            totals.total_liabilities += row.total_liabilities;
            totals.total_equity += row.total_equity;
            totals.total_cash += row.total_cash;
            totals.total_revenue += row.total_revenue;
            totals.total_expenses += row.total_expenses;
            totals.net_profit += row.net_profit;

            if row.is_balanced {
                counts.balanced += 1;
            }
            if row.has_data {
                counts.with_data += 1;
            }
            if row.load_error.is_some() {
                counts.with_errors += 1;
            }
        }

        debug!(
            session_id,
            companies = counts.companies,
            with_errors = counts.with_errors,
            "consolidated live rows"
        );

        Ok(ConsolidatedView {
            session_id: session_id.to_string(),
            totals,
            companies: rows.iter().map(ConsolidatedCompany::from).collect(),
            counts,
        })
    }
}
