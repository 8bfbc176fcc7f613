//! # Portal API
//! 
//! HTTP handlers, DTOs, the response envelope, and error-to-status mapping.

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;
