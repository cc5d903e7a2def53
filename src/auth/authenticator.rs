//! Authenticator implementation
//!
//! Applies credentials to requests and tracks the signed-in user.

use super::types::{AuthConfig, AuthSession, Location};
use crate::error::{Error, Result};
use reqwest::RequestBuilder;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Authenticator handles applying authentication to HTTP requests
#[derive(Debug, Clone, Default)]
pub struct Authenticator {
    /// Static credentials
    config: AuthConfig,
    /// Signed-in user, shared between clones
    session: Arc<RwLock<Option<AuthSession>>>,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self {
            config,
            session: Arc::new(RwLock::new(None)),
        }
    }

    /// Create an authenticator that is already signed in
    pub fn with_session(config: AuthConfig, session: AuthSession) -> Self {
        Self {
            config,
            session: Arc::new(RwLock::new(Some(session))),
        }
    }

    /// Record a signed-in user
    pub async fn sign_in(&self, session: AuthSession) {
        debug!(uid = %session.uid, "Signed in");
        *self.session.write().await = Some(session);
    }

    /// Forget the signed-in user
    pub async fn sign_out(&self) {
        *self.session.write().await = None;
    }

    /// The signed-in user, or `Unauthenticated`
    pub async fn current_session(&self) -> Result<AuthSession> {
        let session = self.session.read().await;
        match session.as_ref() {
            Some(session) if !session.is_expired() => Ok(session.clone()),
            _ => Err(Error::Unauthenticated),
        }
    }

    /// Apply authentication to a request builder.
    ///
    /// A signed-in user's token takes precedence over a configured bearer
    /// token; API keys are always applied.
    pub async fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        let session_token = {
            let session = self.session.read().await;
            session
                .as_ref()
                .filter(|s| !s.is_expired())
                .and_then(|s| s.token.clone())
        };

        let req = match &self.config {
            AuthConfig::None => req,

            AuthConfig::ApiKey {
                location,
                header_name,
                query_param,
                value,
            } => match location {
                Location::Header => {
                    let header = header_name.as_deref().unwrap_or("X-Api-Key");
                    req.header(header, value.as_str())
                }
                Location::Query => {
                    let param = query_param.as_deref().unwrap_or("key");
                    req.query(&[(param, value.as_str())])
                }
            },

            AuthConfig::Bearer { token } => {
                if session_token.is_none() {
                    return Ok(req.bearer_auth(token));
                }
                req
            }
        };

        match session_token {
            Some(token) => Ok(req.bearer_auth(token)),
            None => Ok(req),
        }
    }

    /// Get the static config
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}
