use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::{PazarError, Result};
use crate::session::{LoginResponse, Session, User};

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// Logs in against `POST /auth/login` and updates the shared [`Session`]
pub struct AuthClient {
    client: Client,
    base_url: String,
    session: Arc<Session>,
}

impl AuthClient {
    pub fn new(config: &ClientConfig, session: Arc<Session>) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Post credentials; on success the session becomes authenticated
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(PazarError::Validation(
                "email and password are required".to_string(),
            ));
        }

        let url = format!("{}/auth/login", self.base_url);
        tracing::debug!("POST {} as {}", url, email);

        let response = self
            .client
            .post(&url)
            .json(&Credentials { email, password })
            .send()
            .await?;

        // Rejected logins come back as 401 with a LoginResponse body
        let status = response.status();
        let text = response.text().await?;
        let body: LoginResponse = match serde_json::from_str(&text) {
            Ok(body) => body,
            Err(_) if !status.is_success() => {
                return Err(PazarError::Auth(format!("HTTP {} from /auth/login", status)));
            }
            Err(e) => return Err(e.into()),
        };

        self.session.login(body)
    }

    pub fn logout(&self) -> Result<()> {
        self.session.logout()
    }
}
