//! Policy operations on the remote service

use serde_json::Value;

use crate::domain::{PolicyDetail, PolicyFilter, PolicySummary};
use crate::error::DispatchError;
use crate::ports::ActionParams;
use crate::services::{decode_record, decode_records, ActionDispatcher};

const GET_POLICIES: &str = "GetPolicies";
const GET_POLICY: &str = "GetPolicy";

#[derive(Clone)]
pub struct PolicyService {
    dispatcher: ActionDispatcher,
}

impl PolicyService {
    pub fn new(dispatcher: ActionDispatcher) -> Self {
        Self { dispatcher }
    }

    pub async fn list_policies(&self, filter: &PolicyFilter) -> Result<Vec<PolicySummary>, DispatchError> {
        let result = self.dispatcher.run(GET_POLICIES, filter.to_params()).await?;
        decode_records(GET_POLICIES, "Policy", result)
    }

    pub async fn get_policy(&self, id: &str) -> Result<PolicyDetail, DispatchError> {
        let mut params = ActionParams::new();
        params.insert("PolicyId".into(), Value::from(id));
        let result = self.dispatcher.run(GET_POLICY, params).await?;
        decode_record(GET_POLICY, "Policy", result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Credentials, SessionPolicy};
    use crate::testing::ScriptedRemote;
    use crate::services::SessionBroker;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    fn service(remote: &Arc<ScriptedRemote>) -> PolicyService {
        let broker = SessionBroker::new(
            remote.clone(),
            Credentials::new("portal", "secret"),
            SessionPolicy::without_liveness_check(Duration::from_secs(1500)),
        );
        PolicyService::new(ActionDispatcher::new(broker, remote.clone()))
    }

    #[tokio::test]
    async fn test_list_policies_reads_bare_array() {
        let remote = Arc::new(ScriptedRemote::new());
        remote.push_invoke(Ok(json!([{
            "Id": "HOM123",
            "PolicyNumber": "HOM123",
            "Type": "Home",
            "Status": "Active",
            "Payment": "45.00",
            "NextPayment": "2024-07-01",
            "EffectiveDate": "2024-01-01",
            "ExpirationDate": "2025-01-01",
            "ContractName": "Home Insurance Basic"
        }])));

        let policies = service(&remote).list_policies(&PolicyFilter::default()).await.unwrap();

        assert_eq!(policies.len(), 1);
        assert_eq!(policies[0].policy_type, "Home");
    }

    #[tokio::test]
    async fn test_get_policy_decodes_payment_terms() {
        let remote = Arc::new(ScriptedRemote::new());
        remote.push_invoke(Ok(json!({"Policy": {
            "Id": "AUT456",
            "PolicyNumber": "AUT456",
            "Type": "Auto",
            "Status": "Expired",
            "Payment": "300.00",
            "PaymentFrequency": "Annual",
            "NextPayment": null,
            "EffectiveDate": "2023-01-01",
            "ExpirationDate": "2024-01-01",
            "Manager": "Carlos Vidal",
            "ContractName": "Auto Insurance Plus"
        }})));

        let policy = service(&remote).get_policy("AUT456").await.unwrap();

        assert_eq!(policy.payment_frequency, "Annual");
        assert_eq!(policy.next_payment, None);
        assert_eq!(policy.manager, "Carlos Vidal");
        assert_eq!(remote.invokes(), 1);
    }
}
