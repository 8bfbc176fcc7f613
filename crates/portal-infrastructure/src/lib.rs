//! # Portal Infrastructure
//! 
//! Adapters for the legacy SOAP service and the hosted identity provider.

pub mod remote;
pub mod identity;

pub use remote::SoapRemoteClient;
pub use identity::GoTrueIdentityProvider;
