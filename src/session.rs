//! Process-wide authentication state.
//!
//! A [`Session`] is created once from a [`SessionStore`], changes only
//! through [`Session::login`] and [`Session::logout`], and pushes every
//! change to subscribers over a `tokio::sync::watch` channel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

use crate::error::{PazarError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Seller,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub role: Role,
}

/// Body returned by `POST /auth/login`
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Persisted form of an authenticated session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    pub user: User,
    pub since: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    Anonymous,
    Authenticated(StoredSession),
}

impl AuthState {
    pub fn user(&self) -> Option<&User> {
        match self {
            AuthState::Anonymous => None,
            AuthState::Authenticated(session) => Some(&session.user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }
}

/// Where the session survives between process runs
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<StoredSession>>;
    fn save(&self, session: &StoredSession) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Store that lives as long as the process
#[derive(Default)]
pub struct MemoryStore {
    slot: Mutex<Option<StoredSession>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: StoredSession) -> Self {
        Self {
            slot: Mutex::new(Some(session)),
        }
    }

    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<StoredSession>>> {
        self.slot
            .lock()
            .map_err(|_| PazarError::Other("session store lock poisoned".to_string()))
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Result<Option<StoredSession>> {
        Ok(self.slot()?.clone())
    }

    fn save(&self, session: &StoredSession) -> Result<()> {
        *self.slot()? = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot()? = None;
        Ok(())
    }
}

pub struct Session {
    store: Arc<dyn SessionStore>,
    state: watch::Sender<AuthState>,
}

impl Session {
    /// Read persisted state and start publishing it
    pub fn initialize(store: Arc<dyn SessionStore>) -> Result<Self> {
        let initial = match store.load()? {
            Some(stored) => {
                tracing::info!("Restored session for {}", stored.user.email);
                AuthState::Authenticated(stored)
            }
            None => AuthState::Anonymous,
        };

        let (state, _) = watch::channel(initial);
        Ok(Self { store, state })
    }

    /// Apply a login response from the auth endpoint
    pub fn login(&self, response: LoginResponse) -> Result<User> {
        if !response.success {
            return Err(PazarError::Auth(
                response.message.unwrap_or_else(|| "Login failed".to_string()),
            ));
        }

        let token = response
            .token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| PazarError::Auth("login response carried no token".to_string()))?;
        let email = response
            .email
            .ok_or_else(|| PazarError::Auth("login response carried no email".to_string()))?;

        let user = User {
            email,
            role: response.role.unwrap_or(Role::User),
        };
        let stored = StoredSession {
            token,
            user: user.clone(),
            since: Utc::now(),
        };

        self.store.save(&stored)?;
        self.state.send_replace(AuthState::Authenticated(stored));
        tracing::info!("Logged in as {} ({:?})", user.email, user.role);

        Ok(user)
    }

    pub fn logout(&self) -> Result<()> {
        self.store.clear()?;
        let previous = self.state.send_replace(AuthState::Anonymous);
        if let Some(user) = previous.user() {
            tracing::info!("Logged out {}", user.email);
        }
        Ok(())
    }

    pub fn current(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Receiver that wakes on every login/logout
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// `Authorization` header value for API calls
    pub fn bearer_header(&self) -> Option<String> {
        match &*self.state.borrow() {
            AuthState::Authenticated(session) => Some(format!("Bearer {}", session.token)),
            AuthState::Anonymous => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.state
            .borrow()
            .user()
            .is_some_and(|u| u.role == Role::Admin)
    }
}
