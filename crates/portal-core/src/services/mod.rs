//! Domain services (session management and remote business operations)

pub mod session_broker;
pub mod action_dispatcher;
pub mod claim_service;
pub mod policy_service;
pub mod document_service;

pub use session_broker::SessionBroker;
pub use action_dispatcher::ActionDispatcher;
pub use claim_service::ClaimService;
pub use policy_service::PolicyService;
pub use document_service::DocumentService;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::DispatchError;

/// Decode a list result. The remote service wraps repeated records in their
/// element name (`{"Claim": [...]}`) and a single record is not an array.
/// A wrapper holding only scalar siblings such as `{"Total": "0"}` is an empty page.
pub(crate) fn decode_records<T: DeserializeOwned>(
    operation: &str,
    element: &str,
    result: Value,
) -> Result<Vec<T>, DispatchError> {
    let items = match result {
        Value::Null => Vec::new(),
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove(element) {
            Some(Value::Array(items)) => items,
            Some(Value::Null) => Vec::new(),
            Some(single) => vec![single],
            None if map.contains_key("Id") => vec![Value::Object(map)],
            None if map.values().all(|v| !v.is_array() && !v.is_object()) => Vec::new(),
            None => {
                return Err(DispatchError::decode(
                    operation,
                    format!("no {} element in list result", element),
                ))
            }
        },
        other => {
            return Err(DispatchError::decode(
                operation,
                format!("expected a list of {} records, got {}", element, other),
            ))
        }
    };

    items
        .into_iter()
        .map(|item| decode_record(operation, element, item))
        .collect()
}

/// Decode a single-record result, unwrapping `{"Claim": {...}}` if present.
pub(crate) fn decode_record<T: DeserializeOwned>(
    operation: &str,
    element: &str,
    result: Value,
) -> Result<T, DispatchError> {
    let record = match result {
        Value::Object(mut map) if map.len() == 1 && map.contains_key(element) => {
            map.remove(element).unwrap_or(Value::Null)
        }
        other => other,
    };
    serde_json::from_value(record)
        .map_err(|e| DispatchError::decode(operation, format!("invalid {} record: {}", element, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Claim;
    use serde_json::json;

    fn claim(id: &str) -> Value {
        json!({
            "Id": id,
            "ClaimNumber": id,
            "Status": "Open",
            "OpenDate": "2024-05-01",
            "Description": "Water damage",
            "PolicyId": "HOM123"
        })
    }

    #[test]
    fn test_paging_wrapper_without_records_is_empty() {
        let claims: Vec<Claim> = decode_records("GetClaims", "Claim", json!({"Total": "0"})).unwrap();
        assert!(claims.is_empty());
    }

    #[test]
    fn test_wrapped_single_record_is_one_item() {
        let claims: Vec<Claim> =
            decode_records("GetClaims", "Claim", json!({"Claim": claim("CLM001"), "Total": "1"})).unwrap();
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].id, "CLM001");
    }

    #[test]
    fn test_bare_record_is_one_item() {
        let claims: Vec<Claim> = decode_records("GetClaims", "Claim", claim("CLM002")).unwrap();
        assert_eq!(claims[0].id, "CLM002");
    }

    #[test]
    fn test_wrapper_with_other_element_is_decode_error() {
        let err = decode_records::<Claim>("GetClaims", "Claim", json!({"Policy": [claim("X")]})).unwrap_err();
        assert!(matches!(err, DispatchError::RemoteOperation { ref code, .. } if code == "DecodeError"));
    }

    #[test]
    fn test_record_unwraps_element_name() {
        let claim: Claim = decode_record("GetClaim", "Claim", json!({"Claim": claim("CLM003")})).unwrap();
        assert_eq!(claim.id, "CLM003");
    }
}
