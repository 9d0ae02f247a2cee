//! Per-navigation route policy.
//!
//! Stateless: the only inputs are whether a session is present and the
//! requested path.

pub const LOGIN_PATH: &str = "/login";
pub const SIGNUP_PATH: &str = "/signup";
pub const VERIFY_EMAIL_PATH: &str = "/verify-email";
pub const DASHBOARD_PATH: &str = "/dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Pass,
    Redirect(&'static str),
}

fn under(path: &str, prefix: &str) -> bool {
    path.starts_with(prefix)
}

/// Decide whether a navigation to `path` goes through or is redirected
pub fn gate(session_present: bool, path: &str) -> GateDecision {
    let auth_page = under(path, LOGIN_PATH) || under(path, SIGNUP_PATH);

    if !session_present && !auth_page && !under(path, VERIFY_EMAIL_PATH) {
        return GateDecision::Redirect(LOGIN_PATH);
    }

    if session_present && (auth_page || path == "/") {
        return GateDecision::Redirect(DASHBOARD_PATH);
    }

    GateDecision::Pass
}
