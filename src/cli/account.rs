//! Login, logout and profile lookup.

use super::session_context;
use crate::api::auth_errors::auth_error_code;
use crate::api::auth_error_message;
use crate::domain::WorkflowError;
use crate::session::{AuthSession, Role, SessionStore};
use anyhow::Result;
use std::path::PathBuf;

pub(super) fn login(role: Role, token: &str, actor_id: Option<String>) -> Result<()> {
    let session = AuthSession::login(role, token, actor_id)?;
    SessionStore::save(&session)?;
    match &session.actor_id {
        Some(id) => println!("Logged in as {} ({})", role, id),
        None => println!("Logged in as {}", role),
    }
    if role == Role::Creator && session.actor_id.is_none() {
        println!("No creator id found in the token; pass --actor-id to submit work.");
    }
    Ok(())
}

pub(super) fn logout(role: Role) -> Result<()> {
    if SessionStore::clear(role)? {
        println!("Logged out of {}", role);
    } else {
        println!("No {} session to remove", role);
    }
    Ok(())
}

pub(super) async fn whoami(config: &Option<PathBuf>, role: Role) -> Result<()> {
    let (session, ctx) = session_context(config, role)?;
    match ctx.workflow.fetch_profile(&session).await {
        Ok(profile) => {
            println!("role:  {}", role);
            println!("id:    {}", profile.id.as_deref().unwrap_or("-"));
            println!("name:  {}", profile.name.as_deref().unwrap_or("-"));
            let email = profile.email.or(session.email);
            println!("email: {}", email.as_deref().unwrap_or("-"));
            Ok(())
        }
        Err(e) => anyhow::bail!(describe_auth_failure(&e)),
    }
}

/// Provider auth codes are shown through the fixed message table.
pub(super) fn describe_auth_failure(error: &WorkflowError) -> String {
    match error {
        WorkflowError::Api { message } if auth_error_code(message).is_some() => {
            auth_error_message(message)
        }
        other => other.to_string(),
    }
}
