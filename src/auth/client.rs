use log::debug;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

use crate::auth::AuthError;
use crate::config::AuthConfig;

/// Fallback session lifetime when the provider does not say
const DEFAULT_EXPIRES_IN: u64 = 3600;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    /// Seconds until the token expires
    pub expires_in: u64,
    pub user_id: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    SignedIn(Session),
    /// Account created; the user has to confirm their email first
    ConfirmationSent,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<u64>,
    user: Option<UserResponse>,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: Option<String>,
    email: Option<String>,
}

impl TokenResponse {
    fn into_session(self) -> Option<Session> {
        let access_token = self.access_token.filter(|token| !token.is_empty())?;
        let (user_id, email) = self
            .user
            .map(|user| (user.id, user.email))
            .unwrap_or_default();
        Some(Session {
            access_token,
            expires_in: self.expires_in.unwrap_or(DEFAULT_EXPIRES_IN),
            user_id,
            email,
        })
    }
}

/// Email/password client for a Supabase-compatible GoTrue API
pub struct AuthClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl AuthClient {
    pub fn new(config: &AuthConfig, timeout: Duration) -> Result<Self, AuthError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        check_credentials(email, password)?;

        let response = self
            .client
            .post(self.endpoint("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let token: TokenResponse = parse_response(response).await?;
        token
            .into_session()
            .ok_or_else(|| AuthError::Rejected("No session returned".to_string()))
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, AuthError> {
        check_credentials(email, password)?;

        let response = self
            .client
            .post(self.endpoint("signup"))
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let token: TokenResponse = parse_response(response).await?;
        Ok(match token.into_session() {
            Some(session) => SignUpOutcome::SignedIn(session),
            None => SignUpOutcome::ConfirmationSent,
        })
    }

    /// Revoke `access_token` on the provider side
    pub async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let response = self
            .client
            .post(self.endpoint("logout"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body: Value = response.json().await.unwrap_or(Value::Null);
            debug!("logout answered {}: {:?}", status, body);
            return Err(AuthError::Rejected(rejection_message(&body)));
        }
        Ok(())
    }
}

fn check_credentials(email: &str, password: &str) -> Result<(), AuthError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    Ok(())
}

async fn parse_response(response: Response) -> Result<TokenResponse, AuthError> {
    let status = response.status();
    if status.is_server_error() {
        debug!("auth provider answered {}", status);
        return Err(AuthError::Unavailable(status.to_string()));
    }

    let body: Value = response
        .json()
        .await
        .map_err(|e| AuthError::Unavailable(format!("unexpected response ({})", e)))?;
    if !status.is_success() {
        debug!("auth provider answered {}: {:?}", status, body);
        return Err(AuthError::Rejected(rejection_message(&body)));
    }
    serde_json::from_value(body).map_err(|e| AuthError::Rejected(e.to_string()))
}

/// GoTrue has used several error shapes over time
fn rejection_message(body: &Value) -> String {
    ["error_description", "msg", "message", "error"]
        .iter()
        .find_map(|key| body[*key].as_str())
        .unwrap_or("Authentication failed")
        .to_string()
}
