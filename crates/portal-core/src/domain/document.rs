//! Document metadata exchanged with the remote service

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::claim::{clamp_page_size, default_page, default_page_size};

/// Document row of `GetDocuments`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "snake_case", deserialize = "PascalCase"))]
pub struct DocumentSummary {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub policy_id: Option<String>,
    #[serde(default)]
    pub claim_id: Option<String>,
    #[serde(default)]
    pub billing: Option<String>,
    #[serde(rename(serialize = "type", deserialize = "Type"))]
    pub doc_type: String,
}

/// Document returned by `GetDocument`, with its download location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "snake_case", deserialize = "PascalCase"))]
pub struct DocumentDetail {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub policy_id: Option<String>,
    #[serde(default)]
    pub claim_id: Option<String>,
    #[serde(default)]
    pub billing: Option<String>,
    #[serde(rename(serialize = "type", deserialize = "Type"))]
    pub doc_type: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DocumentFilter {
    pub policy_id: Option<String>,
    pub claim_id: Option<String>,
    pub billing: Option<String>,
    #[serde(rename = "type")]
    pub doc_type: Option<String>,
    pub category: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for DocumentFilter {
    fn default() -> Self {
        Self {
            policy_id: None,
            claim_id: None,
            billing: None,
            doc_type: None,
            category: None,
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl DocumentFilter {
    pub fn to_params(&self) -> Map<String, Value> {
        let mut params = Map::new();
        let optional = [
            ("PolicyId", &self.policy_id),
            ("ClaimId", &self.claim_id),
            ("Billing", &self.billing),
            ("Type", &self.doc_type),
            ("Category", &self.category),
        ];
        for (name, value) in optional {
            if let Some(value) = value {
                params.insert(name.into(), Value::from(value.as_str()));
            }
        }
        params.insert("Page".into(), Value::from(self.page.max(1)));
        params.insert("PageSize".into(), Value::from(clamp_page_size(self.page_size)));
        params
    }
}
