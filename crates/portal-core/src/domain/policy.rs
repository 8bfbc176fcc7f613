//! Policy records exchanged with the remote service

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::claim::{clamp_page_size, default_page, default_page_size};

/// Policy row of `GetPolicies`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "snake_case", deserialize = "PascalCase"))]
pub struct PolicySummary {
    pub id: String,
    #[serde(default)]
    pub contract_name: String,
    pub policy_number: String,
    pub status: String,
    pub payment: String,
    #[serde(default)]
    pub next_payment: Option<String>,
    pub effective_date: String,
    pub expiration_date: String,
    #[serde(rename(serialize = "type", deserialize = "Type"))]
    pub policy_type: String,
}

/// Policy returned by `GetPolicy`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "snake_case", deserialize = "PascalCase"))]
pub struct PolicyDetail {
    pub id: String,
    #[serde(default)]
    pub contract_name: String,
    pub policy_number: String,
    pub status: String,
    pub payment: String,
    pub payment_frequency: String,
    #[serde(default)]
    pub next_payment: Option<String>,
    pub effective_date: String,
    pub expiration_date: String,
    #[serde(default)]
    pub manager: String,
    #[serde(rename(serialize = "type", deserialize = "Type"))]
    pub policy_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PolicyFilter {
    #[serde(rename = "type")]
    pub policy_type: Option<String>,
    pub status: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for PolicyFilter {
    fn default() -> Self {
        Self {
            policy_type: None,
            status: None,
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl PolicyFilter {
    pub fn to_params(&self) -> Map<String, Value> {
        let mut params = Map::new();
        if let Some(policy_type) = &self.policy_type {
            params.insert("Type".into(), Value::from(policy_type.as_str()));
        }
        if let Some(status) = &self.status {
            params.insert("Status".into(), Value::from(status.as_str()));
        }
        params.insert("Page".into(), Value::from(self.page.max(1)));
        params.insert("PageSize".into(), Value::from(clamp_page_size(self.page_size)));
        params
    }
}
