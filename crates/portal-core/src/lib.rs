//! # Portal Core
//! 
//! Domain types, port traits, and the session broker / action dispatcher that
//! every call to the legacy remote service goes through.

pub mod domain;
pub mod ports;
pub mod services;
pub mod error;

#[cfg(test)]
mod testing;

// Re-export domain entities
pub use domain::*;
pub use error::{DispatchError, IdentityError, RemoteFault, SessionAcquisitionError};
pub use services::{ActionDispatcher, SessionBroker};
