//! Remote login client
//!
//! Talks to `POST {api_url}/auth/login`. Success bodies must match the
//! response schema exactly; anything else is a transport failure rather
//! than a partially trusted session.

use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::credentials::Credential;
use crate::error::AuthError;
use crate::session::{Identity, Role, Session};

const LOGIN_PATH: &str = "/auth/login";
const GENERIC_FAILURE: &str = "Login failed";

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
    role: Role,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    user: Identity,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

pub struct RemoteAuthClient {
    http: reqwest::Client,
    login_url: String,
}

impl RemoteAuthClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            login_url: format!("{}{}", base_url.trim_end_matches('/'), LOGIN_PATH),
        })
    }

    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    /// Exchange a credential for a session. Never retries.
    pub async fn login(&self, credential: &Credential) -> Result<Session, AuthError> {
        let body = LoginRequest {
            email: &credential.identifier,
            password: &credential.secret,
            role: credential.role.unwrap_or(Role::User),
        };

        debug!("POST {} for {}", self.login_url, credential.identifier);
        let response = self
            .http
            .post(&self.login_url)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(transport_error)?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .and_then(|body| body.message)
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());
            debug!("Login rejected with status {}: {}", status, message);
            return Err(AuthError::InvalidCredentials(message));
        }

        let parsed: LoginResponse = serde_json::from_slice(&bytes)
            .map_err(|e| AuthError::Transport(format!("malformed login response: {e}")))?;

        if parsed.token.is_empty() {
            return Err(AuthError::Transport(
                "malformed login response: empty token".into(),
            ));
        }

        Ok(Session::authenticated(parsed.user, parsed.token))
    }
}

fn transport_error(err: reqwest::Error) -> AuthError {
    if err.is_timeout() {
        AuthError::Transport(format!("request timed out: {err}"))
    } else if err.is_connect() {
        AuthError::Transport(format!("connection failed: {err}"))
    } else {
        AuthError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_url_joins_path() {
        let client = RemoteAuthClient::new("http://127.0.0.1:9/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.login_url(), "http://127.0.0.1:9/auth/login");
    }

    #[test]
    fn test_request_body_shape() {
        let body = LoginRequest {
            email: "a@b.c",
            password: "pw",
            role: Role::Admin,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"email": "a@b.c", "password": "pw", "role": "admin"})
        );
    }

    #[test]
    fn test_response_requires_token_and_user() {
        assert!(serde_json::from_str::<LoginResponse>(r#"{"token":"t"}"#).is_err());
        assert!(
            serde_json::from_str::<LoginResponse>(
                r#"{"user":{"id":1,"name":"n","email":"e","role":"user"}}"#
            )
            .is_err()
        );
    }
}
