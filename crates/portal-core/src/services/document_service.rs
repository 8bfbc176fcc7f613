//! Document lookups on the remote service

use serde_json::Value;

use crate::domain::{DocumentDetail, DocumentFilter, DocumentSummary};
use crate::error::DispatchError;
use crate::ports::ActionParams;
use crate::services::{decode_record, decode_records, ActionDispatcher};

const GET_DOCUMENTS: &str = "GetDocuments";
const GET_DOCUMENT: &str = "GetDocument";

#[derive(Clone)]
pub struct DocumentService {
    dispatcher: ActionDispatcher,
}

impl DocumentService {
    pub fn new(dispatcher: ActionDispatcher) -> Self {
        Self { dispatcher }
    }

    pub async fn list_documents(&self, filter: &DocumentFilter) -> Result<Vec<DocumentSummary>, DispatchError> {
        let result = self.dispatcher.run(GET_DOCUMENTS, filter.to_params()).await?;
        decode_records(GET_DOCUMENTS, "Document", result)
    }

    pub async fn get_document(&self, id: &str) -> Result<DocumentDetail, DispatchError> {
        let mut params = ActionParams::new();
        params.insert("DocumentId".into(), Value::from(id));
        let result = self.dispatcher.run(GET_DOCUMENT, params).await?;
        decode_record(GET_DOCUMENT, "Document", result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Credentials, SessionPolicy};
    use crate::error::RemoteFault;
    use crate::services::SessionBroker;
    use crate::testing::ScriptedRemote;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    fn service(remote: &Arc<ScriptedRemote>) -> DocumentService {
        let broker = SessionBroker::new(
            remote.clone(),
            Credentials::new("portal", "secret"),
            SessionPolicy::without_liveness_check(Duration::from_secs(1500)),
        );
        DocumentService::new(ActionDispatcher::new(broker, remote.clone()))
    }

    #[tokio::test]
    async fn test_list_documents_unwraps_repeated_element() {
        let remote = Arc::new(ScriptedRemote::new());
        remote.push_invoke(Ok(json!({"Document": [
            {"Id": "DOC001", "Name": "Policy Contract.pdf", "Category": "contract",
             "PolicyId": "HOM123", "Type": "pdf"},
            {"Id": "DOC002", "Name": "Coverage Certificate.pdf", "Category": "certificate",
             "PolicyId": "AUT456", "Type": "pdf"}
        ]})));

        let documents = service(&remote).list_documents(&DocumentFilter::default()).await.unwrap();

        assert_eq!(documents.len(), 2);
        assert_eq!(documents[1].category, "certificate");
    }

    #[tokio::test]
    async fn test_get_document_missing_is_business_error_without_retry() {
        let remote = Arc::new(ScriptedRemote::new());
        remote.push_invoke(Err(RemoteFault::business("NotFound", "Document DOC404 not found")));

        let err = service(&remote).get_document("DOC404").await.unwrap_err();

        assert!(matches!(err, DispatchError::RemoteOperation { ref code, .. } if code == "NotFound"));
        assert_eq!(remote.invokes(), 1);
        assert_eq!(remote.opens(), 1);
    }

    #[tokio::test]
    async fn test_get_document_reads_url() {
        let remote = Arc::new(ScriptedRemote::new());
        remote.push_invoke(Ok(json!({"Document": {
            "Id": "DOC001",
            "Name": "Policy Contract.pdf",
            "Category": "contract",
            "PolicyId": "HOM123",
            "Type": "pdf",
            "Url": "https://files.example.com/DOC001.pdf"
        }})));

        let document = service(&remote).get_document("DOC001").await.unwrap();

        assert_eq!(document.url, "https://files.example.com/DOC001.pdf");
    }
}
