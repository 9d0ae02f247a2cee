use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::auth::{gate, GateDecision, SignUpOutcome, DASHBOARD_PATH, LOGIN_PATH, VERIFY_EMAIL_PATH};
use crate::server::{error::ErrorServer, state::ServerState};

#[derive(Debug, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
struct AuthRedirect {
    redirect: &'static str,
}

/// API routes answer for themselves; unknown ones are a plain 404
const API_PREFIX: &str = "/api/";

/// Value of the `name` cookie, if present and non-empty
pub fn session_token(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// `Set-Cookie` value carrying `token`; an empty token with max age 0 clears it
pub fn session_cookie(name: &str, token: &str, max_age: u64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        name, token, max_age
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Route gate for pages: redirects according to session presence
pub async fn route_gate(State(state): State<Arc<ServerState>>, req: Request, next: Next) -> Response {
    if req.uri().path().starts_with(API_PREFIX) {
        return next.run(req).await;
    }

    let session_present = session_token(req.headers(), state.session_cookie()).is_some();

    match gate(session_present, req.uri().path()) {
        GateDecision::Pass => next.run(req).await,
        GateDecision::Redirect(to) => Redirect::to(to).into_response(),
    }
}

fn credentials(payload: Result<Json<Credentials>, JsonRejection>) -> Result<Credentials, ErrorServer> {
    payload
        .map(|Json(credentials)| credentials)
        .map_err(|e| ErrorServer::bad_request(e.body_text()))
}

fn redirect_with_cookie(state: &ServerState, token: &str, max_age: u64, to: &'static str) -> Response {
    let cookie = session_cookie(state.session_cookie(), token, max_age, state.secure_cookies());
    ([(header::SET_COOKIE, cookie)], Json(AuthRedirect { redirect: to })).into_response()
}

pub async fn login(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Response, ErrorServer> {
    let credentials = credentials(payload)?;
    let session = state
        .auth()?
        .sign_in(&credentials.email, &credentials.password)
        .await?;
    info!("Signed in {}", session.email.as_deref().unwrap_or("user"));

    Ok(redirect_with_cookie(
        &state,
        &session.access_token,
        session.expires_in,
        DASHBOARD_PATH,
    ))
}

pub async fn signup(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Response, ErrorServer> {
    let credentials = credentials(payload)?;
    let outcome = state
        .auth()?
        .sign_up(&credentials.email, &credentials.password)
        .await?;

    Ok(match outcome {
        SignUpOutcome::SignedIn(session) => redirect_with_cookie(
            &state,
            &session.access_token,
            session.expires_in,
            DASHBOARD_PATH,
        ),
        SignUpOutcome::ConfirmationSent => Json(AuthRedirect {
            redirect: VERIFY_EMAIL_PATH,
        })
        .into_response(),
    })
}

pub async fn logout(State(state): State<Arc<ServerState>>, headers: HeaderMap) -> Response {
    if let (Some(token), Ok(auth)) = (
        session_token(&headers, state.session_cookie()),
        state.auth(),
    ) {
        if let Err(e) = auth.sign_out(&token).await {
            warn!("Sign-out failed upstream: {}", e);
        }
    }

    redirect_with_cookie(&state, "", 0, LOGIN_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_session_token_from_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; distill-session=abc.def; other=1"),
        );
        assert_eq!(
            session_token(&headers, "distill-session").as_deref(),
            Some("abc.def")
        );
        assert_eq!(session_token(&headers, "missing"), None);
    }

    #[test]
    fn test_empty_session_cookie_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("distill-session="));
        assert_eq!(session_token(&headers, "distill-session"), None);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("distill-session", "tok", 3600, true);
        assert_eq!(
            cookie,
            "distill-session=tok; Path=/; HttpOnly; SameSite=Lax; Max-Age=3600; Secure"
        );
        assert!(session_cookie("s", "", 0, false).ends_with("Max-Age=0"));
    }
}
