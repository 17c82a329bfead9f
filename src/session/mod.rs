//! Authenticated actor sessions.
//!
//! An `AuthSession` is created at login, persisted per role, handed to every
//! workflow operation and destroyed at logout or when the backend rejects
//! the token.

mod jwt;
mod store;

pub use jwt::{extract_claim, extract_email_from_jwt, extract_subject_from_jwt};
pub use store::SessionStore;

use crate::domain::WorkflowError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};
use uuid::Uuid;

/// Marketplace role a session acts as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Brand,
    Creator,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Brand => "brand",
            Self::Creator => "creator",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub session_id: Uuid,
    pub role: Role,
    token: String,
    /// Backend id of the brand or creator behind the token.
    pub actor_id: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AuthSession {
    /// Starts a session for `token`.
    ///
    /// When `actor_id` is not given it is read from the token's `sub`,
    /// `user_id` or `creator_id` claim.
    pub fn login(role: Role, token: &str, actor_id: Option<String>) -> Result<Self, WorkflowError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(WorkflowError::InvalidInput {
                message: "token must not be empty".to_string(),
            });
        }

        let actor_id = actor_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .or_else(|| extract_subject_from_jwt(token));

        Ok(Self {
            session_id: Uuid::new_v4(),
            role,
            token: token.to_string(),
            actor_id,
            email: extract_email_from_jwt(token),
            created_at: Utc::now(),
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Short hash of the token for logs.
    pub fn token_fingerprint(&self) -> String {
        crate::paths::fingerprint(&self.token)
    }

    pub fn require_role(&self, expected: Role) -> Result<(), WorkflowError> {
        if self.role != expected {
            return Err(WorkflowError::WrongRole {
                expected: expected.to_string(),
                actual: self.role.to_string(),
            });
        }
        Ok(())
    }

    /// The actor id, required for creator-side operations.
    pub fn require_actor_id(&self) -> Result<&str, WorkflowError> {
        self.actor_id
            .as_deref()
            .ok_or_else(|| WorkflowError::InvalidInput {
                message: "session has no actor id; log in again with --actor-id".to_string(),
            })
    }
}

impl Debug for AuthSession {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("session_id", &self.session_id)
            .field("role", &self.role)
            .field("token", &format_args!("<redacted {}>", self.token_fingerprint()))
            .field("actor_id", &self.actor_id)
            .field("email", &self.email)
            .field("created_at", &self.created_at)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
