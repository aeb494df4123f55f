//! In-memory token provider
//!
//! Holds a fixed map of company id to credential. Suitable for wiring where
//! credentials were already exchanged upstream, and for tests.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;

use super::types::Credential;
use super::TokenProvider;

#[derive(Debug, Default)]
pub struct StaticTokenProvider {
    credentials: HashMap<String, Credential>,
}

impl StaticTokenProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(
        mut self,
        company_id: impl Into<String>,
        credential: Credential,
    ) -> Self {
        self.credentials.insert(company_id.into(), credential);
        self
    }

    pub fn insert(&mut self, company_id: impl Into<String>, credential: Credential) {
        self.credentials.insert(company_id.into(), credential);
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn credential(&self, company_id: &str) -> Result<Option<Credential>> {
        Ok(self.credentials.get(company_id).cloned())
    }
}
