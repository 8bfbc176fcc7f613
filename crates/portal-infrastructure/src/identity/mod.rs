//! Identity provider adapter (GoTrue REST API)

pub mod gotrue;

pub use gotrue::GoTrueIdentityProvider;
