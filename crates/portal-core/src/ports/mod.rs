//! Port traits for the two back ends (remote RPC service, identity provider)

pub mod remote_client;
pub mod identity_provider;

pub use remote_client::{ActionParams, RemoteClient};
pub use identity_provider::IdentityProvider;

#[cfg(any(test, feature = "mock"))]
pub use remote_client::MockRemoteClient;
#[cfg(any(test, feature = "mock"))]
pub use identity_provider::MockIdentityProvider;
