//! Wire types for the accounting API boundary
//!
//! Reports come back as a shallow hierarchy: `Section` rows carry a title
//! and child rows, `Row` entries carry positional cells. Cell 0 is the
//! label; which cell holds the amount depends on the report (see
//! `summary::extract`).

use serde::{Deserialize, Serialize};

/// Per-company credential resolved by the token provider and threaded
/// through every fetch. There is deliberately no "current tenant" state on
/// the client; concurrent fan-out would corrupt it.
#[derive(Debug, Clone)]
pub struct Credential {
    pub access_token: String,
    /// Display name of the tenant, when the provider knows it.
    pub tenant_name: Option<String>,
}

impl Credential {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            tenant_name: None,
        }
    }

    pub fn named(access_token: impl Into<String>, tenant_name: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            tenant_name: Some(tenant_name.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportRowType {
    Section,
    Row,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReportCell {
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReportRow {
    pub row_type: ReportRowType,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub cells: Vec<ReportCell>,
    #[serde(default)]
    pub rows: Vec<ReportRow>,
}

impl ReportRow {
    /// Convenience constructor for a section with child rows.
    pub fn section(title: impl Into<String>, rows: Vec<ReportRow>) -> Self {
        Self {
            row_type: ReportRowType::Section,
            title: Some(title.into()),
            cells: Vec::new(),
            rows,
        }
    }

    /// Convenience constructor for a leaf row from raw cell values.
    pub fn row(cells: &[&str]) -> Self {
        Self {
            row_type: ReportRowType::Row,
            title: None,
            cells: cells
                .iter()
                .map(|v| ReportCell {
                    value: (*v).to_string(),
                })
                .collect(),
            rows: Vec::new(),
        }
    }

    /// Label cell (position 0), empty string when missing.
    pub fn label(&self) -> &str {
        self.cells.first().map(|c| c.value.as_str()).unwrap_or("")
    }
}

/// Envelope the report endpoints respond with.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReportResponse {
    #[serde(default)]
    pub rows: Vec<ReportRow>,
}
