//! Claim records exchanged with the remote service

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use portal_shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Claim as returned by `GetClaims` / `GetClaim` / `CreateClaim`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "snake_case", deserialize = "PascalCase"))]
pub struct Claim {
    pub id: String,
    pub claim_number: String,
    pub status: String,
    pub open_date: String,
    #[serde(default)]
    pub description: String,
    pub policy_id: String,
    #[serde(default)]
    pub contract_name: String,
}

/// Listing filter; page bounds are clamped before dispatch
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClaimFilter {
    pub policy_id: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub claim_type: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for ClaimFilter {
    fn default() -> Self {
        Self {
            policy_id: None,
            status: None,
            claim_type: None,
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl ClaimFilter {
    pub fn to_params(&self) -> Map<String, Value> {
        let mut params = Map::new();
        if let Some(policy_id) = &self.policy_id {
            params.insert("PolicyId".into(), Value::from(policy_id.as_str()));
        }
        if let Some(status) = &self.status {
            params.insert("Status".into(), Value::from(status.as_str()));
        }
        if let Some(claim_type) = &self.claim_type {
            params.insert("Type".into(), Value::from(claim_type.as_str()));
        }
        params.insert("Page".into(), Value::from(self.page.max(1)));
        params.insert("PageSize".into(), Value::from(clamp_page_size(self.page_size)));
        params
    }
}

/// Claim submission
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewClaim {
    pub policy_id: String,
    pub description: String,
    pub open_date: Option<String>,
}

impl NewClaim {
    pub fn to_params(&self) -> Map<String, Value> {
        let mut params = Map::new();
        params.insert("PolicyId".into(), Value::from(self.policy_id.as_str()));
        params.insert("Description".into(), Value::from(self.description.as_str()));
        if let Some(open_date) = &self.open_date {
            params.insert("OpenDate".into(), Value::from(open_date.as_str()));
        }
        params
    }
}

pub(crate) fn default_page() -> u32 {
    1
}

pub(crate) fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

pub(crate) fn clamp_page_size(page_size: u32) -> u32 {
    page_size.clamp(1, MAX_PAGE_SIZE)
}
