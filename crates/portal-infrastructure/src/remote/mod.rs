//! Legacy remote service adapter (SOAP over HTTP)

pub mod envelope;
pub mod soap_client;

pub use soap_client::SoapRemoteClient;
