//! Claim operations on the remote service

use serde_json::Value;
use tracing::info;

use crate::domain::{Claim, ClaimFilter, NewClaim};
use crate::error::DispatchError;
use crate::ports::ActionParams;
use crate::services::{decode_record, decode_records, ActionDispatcher};

const GET_CLAIMS: &str = "GetClaims";
const GET_CLAIM: &str = "GetClaim";
const CREATE_CLAIM: &str = "CreateClaim";

#[derive(Clone)]
pub struct ClaimService {
    dispatcher: ActionDispatcher,
}

impl ClaimService {
    pub fn new(dispatcher: ActionDispatcher) -> Self {
        Self { dispatcher }
    }

    pub async fn list_claims(&self, filter: &ClaimFilter) -> Result<Vec<Claim>, DispatchError> {
        let result = self.dispatcher.run(GET_CLAIMS, filter.to_params()).await?;
        decode_records(GET_CLAIMS, "Claim", result)
    }

    pub async fn get_claim(&self, id: &str) -> Result<Claim, DispatchError> {
        let mut params = ActionParams::new();
        params.insert("ClaimId".into(), Value::from(id));
        let result = self.dispatcher.run(GET_CLAIM, params).await?;
        decode_record(GET_CLAIM, "Claim", result)
    }

    pub async fn create_claim(&self, claim: &NewClaim) -> Result<Claim, DispatchError> {
        let result = self.dispatcher.run(CREATE_CLAIM, claim.to_params()).await?;
        let created: Claim = decode_record(CREATE_CLAIM, "Claim", result)?;
        info!("Claim {} created for policy {}", created.claim_number, created.policy_id);
        Ok(created)
    }
}
