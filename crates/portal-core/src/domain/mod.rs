//! Domain entities

pub mod credentials;
pub mod session;
pub mod claim;
pub mod policy;
pub mod identity;
pub mod document;

pub use credentials::Credentials;
pub use session::{SecurityContext, Session, SessionId, SessionPolicy, SessionState, SessionStatus};
pub use claim::{Claim, ClaimFilter, NewClaim};
pub use policy::{PolicyDetail, PolicyFilter, PolicySummary};
pub use identity::{AuthSession, AuthUser, NewAccount, OtpVerification};
pub use document::{DocumentDetail, DocumentFilter, DocumentSummary};

