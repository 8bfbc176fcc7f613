// ============================================================================
// Portal Infrastructure - SOAP Remote Client
// File: crates/portal-infrastructure/src/remote/soap_client.rs
// ============================================================================
//! `RemoteClient` over SOAP 1.1 / HTTP

use std::time::Duration;

use async_trait::async_trait;
use quick_xml::escape::escape;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};

use portal_core::error::RemoteFault;
use portal_core::ports::{ActionParams, RemoteClient};
use portal_core::{Credentials, SecurityContext, SessionId};
use portal_shared::config::RemoteSettings;

use super::envelope;

const OPEN_SESSION: &str = "OpenSession";
const CHECK_SESSION: &str = "CheckSession";
const CLOSE_SESSION: &str = "CloseSession";

#[derive(Clone)]
pub struct SoapRemoteClient {
    client: Client,
    endpoint: String,
    namespace: String,
}

impl SoapRemoteClient {
    /// Fails when the HTTP client cannot be built with the call timeout.
    pub fn new(
        endpoint: impl Into<String>,
        namespace: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            endpoint: endpoint.into(),
            namespace: namespace.into(),
        })
    }

    pub fn from_settings(settings: &RemoteSettings) -> Result<Self, reqwest::Error> {
        Self::new(
            settings.endpoint.clone(),
            settings.namespace.clone(),
            Duration::from_secs(settings.timeout_secs),
        )
    }

    fn soap_action(&self, operation: &str) -> String {
        format!("\"{}{}\"", self.namespace, operation)
    }

    /// Post one envelope and return the parsed body payload or the fault it carries
    async fn call(&self, operation: &str, body: &str) -> Result<envelope::XmlElement, RemoteFault> {
        let request = envelope::request(&self.namespace, operation, body);

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "text/xml; charset=utf-8")
            .header("SOAPAction", self.soap_action(operation))
            .body(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RemoteFault::transport(format!("{} timed out", operation))
                } else {
                    RemoteFault::transport(format!("{} request failed: {}", operation, e))
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RemoteFault::transport(format!("{} reply unreadable: {}", operation, e)))?;
        debug!("{} answered HTTP {} ({} bytes)", operation, status, text.len());

        // Faults usually arrive with HTTP 500, so the body is read before the status.
        let root = match envelope::parse(&text) {
            Ok(root) => root,
            Err(_) if !status.is_success() => {
                return Err(RemoteFault::transport(format!("{} returned HTTP {}", operation, status)))
            }
            Err(e) => {
                return Err(RemoteFault::transport(format!("{} reply is not XML: {}", operation, e)))
            }
        };

        match envelope::body_payload(&root) {
            Ok(_) if !status.is_success() => {
                Err(RemoteFault::transport(format!("{} returned HTTP {}", operation, status)))
            }
            Ok(payload) => Ok(payload.clone()),
            Err(fault) => Err(fault),
        }
    }
}

#[async_trait]
impl RemoteClient for SoapRemoteClient {
    #[instrument(skip(self, credentials), fields(principal = %credentials.principal()))]
    async fn open_session(&self, credentials: &Credentials) -> Result<SessionId, RemoteFault> {
        let body = format!(
            "<logon>{}</logon><password>{}</password>",
            escape(credentials.principal()),
            escape(credentials.secret())
        );
        let payload = self.call(OPEN_SESSION, &body).await?;

        payload
            .find("SessionId")
            .map(|e| e.text.trim())
            .filter(|id| !id.is_empty())
            .map(SessionId::from)
            .ok_or_else(|| RemoteFault::transport("OpenSession reply carries no SessionId"))
    }

    async fn check_session(&self, context: &SecurityContext) -> Result<bool, RemoteFault> {
        let body = envelope::security_context_xml(context);
        match self.call(CHECK_SESSION, &body).await {
            Ok(_) => Ok(true),
            Err(RemoteFault::Transport { message }) => Err(RemoteFault::Transport { message }),
            Err(fault) => {
                debug!("CheckSession refused {}: {}", context.session_id.redacted(), fault);
                Ok(false)
            }
        }
    }

    #[instrument(skip(self, context, params), fields(session = %context.session_id.redacted()))]
    async fn invoke(
        &self,
        operation: &str,
        context: &SecurityContext,
        params: &ActionParams,
    ) -> Result<Value, RemoteFault> {
        let body = format!(
            "{}{}",
            envelope::security_context_xml(context),
            envelope::params_xml(params)
        );
        let payload = self.call(operation, &body).await?;
        Ok(envelope::result_value(&payload))
    }

    async fn close_session(&self, context: &SecurityContext) -> Result<(), RemoteFault> {
        let body = envelope::security_context_xml(context);
        self.call(CLOSE_SESSION, &body).await.map(|_| ())
    }
}
