//! Remote Data Gateway: typed client for the hosted backend.
//!
//! The backend exposes a PostgREST-style data surface under `/rest/v1` and a
//! GoTrue-style auth surface under `/auth/v1`. This module is the only place
//! that knows about either; everything above it works with core types.

use crate::config::TuiConfig;
use chrono::{DateTime, Utc};
use colloquy_core::{Agent, AgentId, ColorScheme, EntityIdType, IconGlyph, UserId, UserProfile};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
    #[error("Config error: {0}")]
    Config(String),
}

/// A signed-in session as returned by the auth surface.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub access_token: String,
    pub user: UserProfile,
}

#[derive(Clone)]
pub struct Gateway {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl Gateway {
    pub fn new(config: &TuiConfig) -> Result<Self, GatewayError> {
        let timeout = Duration::from_millis(config.request_timeout_ms);
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
        })
    }

    // ------------------------------------------------------------------------
    // Data surface
    // ------------------------------------------------------------------------

    /// Fetch all agent rows ordered by creation time ascending.
    pub async fn list_agents(&self) -> Result<Vec<Agent>, GatewayError> {
        let rows: Vec<AgentRow> = self
            .get_json("/rest/v1/agents?select=*&order=created_at.asc", None)
            .await?;
        debug!(count = rows.len(), "fetched agent catalog");
        Ok(rows.into_iter().map(AgentRow::into_agent).collect())
    }

    /// Fetch the agent ids the given user has favorited.
    pub async fn list_favorite_agent_ids(
        &self,
        token: &str,
        user_id: UserId,
    ) -> Result<Vec<AgentId>, GatewayError> {
        let path = format!(
            "/rest/v1/user_favorites?select=agent_id&user_id=eq.{}",
            user_id.as_uuid()
        );
        let rows: Vec<FavoriteRow> = self.get_json(&path, Some(token)).await?;
        Ok(rows
            .into_iter()
            .map(|row| AgentId::new(row.agent_id))
            .collect())
    }

    /// Insert a (user, agent) favorite edge.
    pub async fn insert_favorite(
        &self,
        token: &str,
        user_id: UserId,
        agent_id: AgentId,
    ) -> Result<(), GatewayError> {
        let body = FavoriteInsert {
            user_id: user_id.as_uuid(),
            agent_id: agent_id.as_uuid(),
        };
        let url = format!("{}/rest/v1/user_favorites", self.base_url);
        let response = self
            .client
            .post(url)
            .headers(self.headers(Some(token)))
            .header("Prefer", "return=minimal")
            .json(&body)
            .send()
            .await?;
        self.expect_success(response).await
    }

    /// Delete the (user, agent) favorite edge.
    pub async fn delete_favorite(
        &self,
        token: &str,
        user_id: UserId,
        agent_id: AgentId,
    ) -> Result<(), GatewayError> {
        let url = format!(
            "{}/rest/v1/user_favorites?user_id=eq.{}&agent_id=eq.{}",
            self.base_url,
            user_id.as_uuid(),
            agent_id.as_uuid()
        );
        let response = self
            .client
            .delete(url)
            .headers(self.headers(Some(token)))
            .send()
            .await?;
        self.expect_success(response).await
    }

    // ------------------------------------------------------------------------
    // Auth surface
    // ------------------------------------------------------------------------

    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, GatewayError> {
        let url = format!("{}/auth/v1/token?grant_type=password", self.base_url);
        let body = PasswordGrant { email, password };
        let response = self
            .client
            .post(url)
            .headers(self.headers(None))
            .json(&body)
            .send()
            .await?;
        let token: TokenResponse = self.parse_response(response).await?;
        token.into_session()
    }

    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<AuthSession, GatewayError> {
        let url = format!("{}/auth/v1/signup", self.base_url);
        let body = SignUpRequest {
            email,
            password,
            data: display_name.map(|name| SignUpMetadata { full_name: name }),
        };
        let response = self
            .client
            .post(url)
            .headers(self.headers(None))
            .json(&body)
            .send()
            .await?;
        let token: TokenResponse = self.parse_response(response).await?;
        token.into_session()
    }

    pub async fn sign_out(&self, token: &str) -> Result<(), GatewayError> {
        let url = format!("{}/auth/v1/logout", self.base_url);
        let response = self
            .client
            .post(url)
            .headers(self.headers(Some(token)))
            .send()
            .await?;
        self.expect_success(response).await
    }

    /// Resolve a persisted access token back into a user, if still valid.
    pub async fn current_user(&self, token: &str) -> Result<UserProfile, GatewayError> {
        let user: AuthUser = self.get_json("/auth/v1/user", Some(token)).await?;
        Ok(user.into_profile())
    }

    // ------------------------------------------------------------------------
    // Request plumbing
    // ------------------------------------------------------------------------

    fn headers(&self, token: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("apikey"),
            HeaderValue::from_str(&self.anon_key).unwrap_or_else(|_| HeaderValue::from_static("")),
        );
        let bearer = format!("Bearer {}", token.unwrap_or(&self.anon_key));
        headers.insert(
            HeaderName::from_static("authorization"),
            HeaderValue::from_str(&bearer).unwrap_or_else(|_| HeaderValue::from_static("")),
        );
        headers
    }

    async fn get_json<T>(&self, path: &str, token: Option<&str>) -> Result<T, GatewayError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(url)
            .headers(self.headers(token))
            .send()
            .await?;
        self.parse_response(response).await
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, GatewayError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json::<T>().await?)
        } else {
            let text = response.text().await?;
            Err(GatewayError::InvalidResponse(describe_failure(
                status.as_u16(),
                &text,
            )))
        }
    }

    async fn expect_success(&self, response: reqwest::Response) -> Result<(), GatewayError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let text = response.text().await?;
            Err(GatewayError::InvalidResponse(describe_failure(
                status.as_u16(),
                &text,
            )))
        }
    }
}

/// Extract the server's own message from an error body when possible.
fn describe_failure(status: u16, body: &str) -> String {
    if let Ok(err) = serde_json::from_str::<ServerError>(body) {
        if let Some(message) = err.message() {
            return message;
        }
    }
    format!("HTTP {}: {}", status, body)
}

// ----------------------------------------------------------------------------
// Wire types
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct AgentRow {
    id: Uuid,
    name: String,
    description: String,
    expertise: String,
    color_scheme: String,
    icon: String,
    created_at: DateTime<Utc>,
}

impl AgentRow {
    fn into_agent(self) -> Agent {
        Agent {
            agent_id: AgentId::new(self.id),
            name: self.name,
            description: self.description,
            expertise: self.expertise,
            color_scheme: ColorScheme::from_db_str_or_default(&self.color_scheme),
            icon: IconGlyph::from_db_str_or_default(&self.icon),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct FavoriteRow {
    agent_id: Uuid,
}

#[derive(Debug, Serialize)]
struct FavoriteInsert {
    user_id: Uuid,
    agent_id: Uuid,
}

#[derive(Debug, Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<SignUpMetadata<'a>>,
}

#[derive(Debug, Serialize)]
struct SignUpMetadata<'a> {
    full_name: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    user: Option<AuthUser>,
}

impl TokenResponse {
    fn into_session(self) -> Result<AuthSession, GatewayError> {
        match (self.access_token, self.user) {
            (Some(access_token), Some(user)) => Ok(AuthSession {
                access_token,
                user: user.into_profile(),
            }),
            // Sign-up with email confirmation enabled returns no session.
            _ => Err(GatewayError::InvalidResponse(
                "no session returned; the account may require email confirmation".to_string(),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: Uuid,
    email: Option<String>,
    user_metadata: Option<serde_json::Value>,
}

impl AuthUser {
    fn into_profile(self) -> UserProfile {
        let display_name = self
            .user_metadata
            .as_ref()
            .and_then(|meta| meta.get("full_name"))
            .and_then(|name| name.as_str())
            .map(str::to_string);
        UserProfile {
            user_id: UserId::new(self.id),
            email: self.email.unwrap_or_default(),
            display_name,
        }
    }
}

/// Error body shapes used by the two backend surfaces.
#[derive(Debug, Deserialize)]
struct ServerError {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
}

impl ServerError {
    fn message(&self) -> Option<String> {
        self.message
            .clone()
            .or_else(|| self.msg.clone())
            .or_else(|| self.error_description.clone())
    }
}
