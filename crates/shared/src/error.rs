use thiserror::Error;

/// The single user-visible failure message for a member load.
pub const MEMBER_LOAD_FAILED: &str =
    "Failed to load members. Please make sure the backend server is running and reachable.";

/// Cause of a failed load cycle. Every variant collapses into the same
/// user-visible failure; the variant only feeds logs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("unexpected response status {0}")]
    Status(u16),
    #[error("malformed members payload: {0}")]
    Decode(String),
}

impl LoadError {
    pub fn user_message(&self) -> &'static str {
        MEMBER_LOAD_FAILED
    }
}
