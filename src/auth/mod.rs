mod client;
mod gate;

pub use client::{AuthClient, Session, SignUpOutcome};
pub use gate::{gate, GateDecision, DASHBOARD_PATH, LOGIN_PATH, VERIFY_EMAIL_PATH};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Authentication is not configured")]
    NotConfigured,

    #[error("Please provide an email and password")]
    MissingCredentials,

    /// The auth provider refused the request (bad credentials, taken email, ...)
    #[error("{0}")]
    Rejected(String),

    #[error("Authentication service unavailable: {0}")]
    Http(#[from] reqwest::Error),

    /// The auth provider failed or answered something other than JSON
    #[error("Authentication service unavailable: {0}")]
    Unavailable(String),
}
