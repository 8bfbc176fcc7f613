use std::sync::Arc;

use portal_core::ports::IdentityProvider;
use portal_core::services::{ClaimService, DocumentService, PolicyService};
use portal_core::SessionBroker;

#[derive(Clone)]
pub struct AppState {
    pub claims: ClaimService,
    pub policies: PolicyService,
    pub documents: DocumentService,
    pub broker: SessionBroker,
    pub identity: Arc<dyn IdentityProvider>,
}
