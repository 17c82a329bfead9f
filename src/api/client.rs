//! Backend REST client.
//!
//! `CampaignApi` is the seam the workflow depends on; `HttpCampaignApi` is
//! the blocking ureq implementation. Async callers go through
//! `spawn_blocking`.

use crate::api::errors::ApiError;
use crate::api::normalize::{normalize_list, normalize_object};
use crate::api::types::{CreatorCampaign, Profile};
use crate::config::CollabConfig;
use crate::domain::{
    Amount, AmountDecision, AssignmentUpdate, Bid, Campaign, CampaignBrief, CampaignId,
    ContentSubmission, CreatorAssignment, ReviewDecision, ScriptSubmission,
};
use crate::session::AuthSession;
use crate::structured_logger::StructuredLogger;
use std::sync::Arc;

/// Every backend call the workflow makes.
pub trait CampaignApi: Send + Sync {
    fn brand_campaigns(&self, session: &AuthSession) -> Result<Vec<Campaign>, ApiError>;

    fn campaign_creators(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
    ) -> Result<Vec<CreatorAssignment>, ApiError>;

    fn respond_to_creators(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
        updates: &[AssignmentUpdate],
    ) -> Result<(), ApiError>;

    fn upload_brief(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
        brief: &CampaignBrief,
    ) -> Result<(), ApiError>;

    fn campaign_bids(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
    ) -> Result<Vec<Bid>, ApiError>;

    fn finalize_amounts(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
        decisions: &[AmountDecision],
    ) -> Result<(), ApiError>;

    fn campaign_scripts(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
    ) -> Result<Vec<ScriptSubmission>, ApiError>;

    fn review_scripts(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
        decisions: &[ReviewDecision],
    ) -> Result<(), ApiError>;

    fn campaign_content(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
    ) -> Result<Vec<ContentSubmission>, ApiError>;

    fn review_content(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
        decisions: &[ReviewDecision],
    ) -> Result<(), ApiError>;

    fn brand_profile(&self, session: &AuthSession) -> Result<Profile, ApiError>;

    fn creator_campaigns(&self, session: &AuthSession) -> Result<Vec<CreatorCampaign>, ApiError>;

    fn link_creator(&self, session: &AuthSession, campaign_id: &CampaignId)
        -> Result<(), ApiError>;

    fn submit_bid(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
        amount: Amount,
    ) -> Result<(), ApiError>;

    fn submit_script(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
        text: &str,
    ) -> Result<(), ApiError>;

    fn submit_content(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
        content_url: &str,
    ) -> Result<(), ApiError>;

    fn go_live(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
        live_url: &str,
    ) -> Result<(), ApiError>;

    fn creator_brief(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
    ) -> Result<CampaignBrief, ApiError>;

    fn creator_profile(&self, session: &AuthSession) -> Result<Profile, ApiError>;
}

type HttpResult = Result<ureq::http::Response<ureq::Body>, ureq::Error>;

pub struct HttpCampaignApi {
    agent: ureq::Agent,
    base_url: String,
    logger: Option<Arc<StructuredLogger>>,
}

impl HttpCampaignApi {
    pub fn new(config: &CollabConfig) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(config.timeout()))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            logger: None,
        }
    }

    pub fn with_logger(mut self, logger: Arc<StructuredLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, session: &AuthSession, path: &str) -> Result<String, ApiError> {
        let result = self
            .agent
            .get(&self.url(path))
            .header("Authorization", &session.bearer_header())
            .header("Accept", "application/json")
            .call();
        self.finish("GET", path, result)
    }

    fn post_json(
        &self,
        session: &AuthSession,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<String, ApiError> {
        let body_str = serde_json::to_string(body).map_err(|e| ApiError::Decode {
            message: format!("failed to serialize request body: {}", e),
        })?;
        let result = self
            .agent
            .post(&self.url(path))
            .header("Authorization", &session.bearer_header())
            .header("Content-Type", "application/json")
            .send(body_str.as_str());
        self.finish("POST", path, result)
    }

    fn post_form(
        &self,
        session: &AuthSession,
        path: &str,
        fields: &[(&str, String)],
    ) -> Result<String, ApiError> {
        let result = self
            .agent
            .post(&self.url(path))
            .header("Authorization", &session.bearer_header())
            .send_form(fields.iter().map(|(k, v)| (*k, v.as_str())));
        self.finish("POST", path, result)
    }

    fn post_empty(&self, session: &AuthSession, path: &str) -> Result<String, ApiError> {
        let result = self
            .agent
            .post(&self.url(path))
            .header("Authorization", &session.bearer_header())
            .send_empty();
        self.finish("POST", path, result)
    }

    fn finish(&self, method: &str, path: &str, result: HttpResult) -> Result<String, ApiError> {
        let outcome = read_response(result);

        let label = match &outcome {
            Ok(_) => "ok".to_string(),
            Err(ApiError::Http { status, .. }) => format!("http_{}", status),
            Err(ApiError::Network { .. }) => "network_error".to_string(),
            Err(ApiError::Decode { .. }) => "decode_error".to_string(),
        };
        tracing::debug!(method, path, outcome = %label, "API call finished");
        if let Some(logger) = &self.logger {
            logger.log_api_call(method, path, &label);
        }

        outcome
    }
}

fn read_response(result: HttpResult) -> Result<String, ApiError> {
    let mut response = result.map_err(|e| ApiError::Network {
        message: e.to_string(),
    })?;
    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| ApiError::Decode {
            message: format!("failed to read response body: {}", e),
        })?;

    if (200..300).contains(&status) {
        Ok(body)
    } else {
        Err(ApiError::Http { status, body })
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Decode {
        message: format!("failed to serialize request body: {}", e),
    })
}

/// Write endpoints answer with free-form bodies; only the status matters.
fn ack(body: String) -> Result<(), ApiError> {
    tracing::trace!(bytes = body.len(), "Write acknowledged");
    Ok(())
}

fn brief_form(campaign_id: &CampaignId, brief: &CampaignBrief) -> Vec<(&'static str, String)> {
    let optional = |value: &Option<String>| value.clone().unwrap_or_default();
    vec![
        ("campaign_id", campaign_id.to_string()),
        ("video_title", brief.video_title.clone()),
        ("primary_focus", brief.primary_focus.clone()),
        ("secondary_focus", optional(&brief.secondary_focus)),
        ("dos", optional(&brief.dos)),
        ("donts", optional(&brief.donts)),
        ("cta", brief.cta.clone()),
        ("sample_video_url", optional(&brief.sample_video_url)),
    ]
}

impl CampaignApi for HttpCampaignApi {
    fn brand_campaigns(&self, session: &AuthSession) -> Result<Vec<Campaign>, ApiError> {
        let body = self.get(session, "/brand/campaigns")?;
        normalize_list(&body, "campaigns")
    }

    fn campaign_creators(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
    ) -> Result<Vec<CreatorAssignment>, ApiError> {
        let body = self.get(session, &format!("/brand/campaigns/{}/creators", campaign_id))?;
        normalize_list(&body, "creators")
    }

    fn respond_to_creators(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
        updates: &[AssignmentUpdate],
    ) -> Result<(), ApiError> {
        let payload = serde_json::json!({ "updates": to_json(&updates)? });
        let path = format!("/brand/campaigns/{}/creators/respond", campaign_id);
        ack(self.post_json(session, &path, &payload)?)
    }

    fn upload_brief(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
        brief: &CampaignBrief,
    ) -> Result<(), ApiError> {
        let fields = brief_form(campaign_id, brief);
        ack(self.post_form(session, "/brand/campaigns/brief", &fields)?)
    }

    fn campaign_bids(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
    ) -> Result<Vec<Bid>, ApiError> {
        let body = self.get(session, &format!("/brand/campaigns/{}/bids", campaign_id))?;
        normalize_list(&body, "bids")
    }

    fn finalize_amounts(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
        decisions: &[AmountDecision],
    ) -> Result<(), ApiError> {
        let payload = serde_json::json!({ "decisions": to_json(&decisions)? });
        let path = format!("/brand/campaigns/{}/bids/finalize", campaign_id);
        ack(self.post_json(session, &path, &payload)?)
    }

    fn campaign_scripts(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
    ) -> Result<Vec<ScriptSubmission>, ApiError> {
        let body = self.get(session, &format!("/brand/campaigns/{}/scripts", campaign_id))?;
        normalize_list(&body, "scripts")
    }

    fn review_scripts(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
        decisions: &[ReviewDecision],
    ) -> Result<(), ApiError> {
        let payload = serde_json::json!({ "reviews": to_json(&decisions)? });
        let path = format!("/brand/campaigns/{}/scripts/review", campaign_id);
        ack(self.post_json(session, &path, &payload)?)
    }

    fn campaign_content(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
    ) -> Result<Vec<ContentSubmission>, ApiError> {
        let body = self.get(session, &format!("/brand/campaigns/{}/content", campaign_id))?;
        normalize_list(&body, "content")
    }

    fn review_content(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
        decisions: &[ReviewDecision],
    ) -> Result<(), ApiError> {
        let payload = serde_json::json!({ "reviews": to_json(&decisions)? });
        let path = format!("/brand/campaigns/{}/content/review", campaign_id);
        ack(self.post_json(session, &path, &payload)?)
    }

    fn brand_profile(&self, session: &AuthSession) -> Result<Profile, ApiError> {
        let body = self.get(session, "/brand/profile")?;
        normalize_object(&body, "profile")
    }

    fn creator_campaigns(&self, session: &AuthSession) -> Result<Vec<CreatorCampaign>, ApiError> {
        let body = self.get(session, "/creator/campaigns")?;
        normalize_list(&body, "campaigns")
    }

    fn link_creator(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
    ) -> Result<(), ApiError> {
        let path = format!("/creator/campaigns/{}/link", campaign_id);
        ack(self.post_empty(session, &path)?)
    }

    fn submit_bid(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
        amount: Amount,
    ) -> Result<(), ApiError> {
        let payload = serde_json::json!({ "bid_amount": amount.value() });
        let path = format!("/creator/campaigns/{}/bid", campaign_id);
        ack(self.post_json(session, &path, &payload)?)
    }

    fn submit_script(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
        text: &str,
    ) -> Result<(), ApiError> {
        let payload = serde_json::json!({ "content": text });
        let path = format!("/creator/campaigns/{}/script", campaign_id);
        ack(self.post_json(session, &path, &payload)?)
    }

    fn submit_content(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
        content_url: &str,
    ) -> Result<(), ApiError> {
        let payload = serde_json::json!({ "content_url": content_url });
        let path = format!("/creator/campaigns/{}/content", campaign_id);
        ack(self.post_json(session, &path, &payload)?)
    }

    fn go_live(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
        live_url: &str,
    ) -> Result<(), ApiError> {
        let payload = serde_json::json!({ "live_url": live_url });
        let path = format!("/creator/campaigns/{}/go-live", campaign_id);
        ack(self.post_json(session, &path, &payload)?)
    }

    fn creator_brief(
        &self,
        session: &AuthSession,
        campaign_id: &CampaignId,
    ) -> Result<CampaignBrief, ApiError> {
        let body = self.get(session, &format!("/creator/campaigns/{}/brief", campaign_id))?;
        normalize_object(&body, "brief")
    }

    fn creator_profile(&self, session: &AuthSession) -> Result<Profile, ApiError> {
        let body = self.get(session, "/creator/profile")?;
        normalize_object(&body, "profile")
    }
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
