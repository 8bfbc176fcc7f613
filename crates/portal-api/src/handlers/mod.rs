pub mod auth;
pub mod claims;
pub mod documents;
pub mod health;
pub mod policies;
