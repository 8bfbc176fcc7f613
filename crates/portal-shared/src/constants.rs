//! Application-wide constants

/// Legacy session lifetime used by the remote service façade (25 minutes).
pub const DEFAULT_SESSION_TTL_SECS: u64 = 25 * 60;
pub const DEFAULT_LIVENESS_INTERVAL_SECS: u64 = DEFAULT_SESSION_TTL_SECS / 2;
pub const DEFAULT_REMOTE_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_IDENTITY_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;
