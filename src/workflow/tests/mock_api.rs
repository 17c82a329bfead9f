//! In-memory backend that records every call and applies writes the way the
//! real backend would, so resyncs observe the new state.

use crate::api::{ApiError, CampaignApi, CreatorCampaign, Profile};
use crate::domain::{
    Amount, AmountDecision, AssignmentStatus, AssignmentUpdate, Bid, BidStatus, Campaign,
    CampaignBrief, CampaignId, CampaignReviewStatus, ContentStatus, ContentSubmission,
    CounterAction, CreatorAssignment, ReviewAction, ReviewDecision, ScriptStatus,
    ScriptSubmission,
};
use crate::session::AuthSession;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::oneshot;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub endpoint: &'static str,
    pub payload: Value,
}

#[derive(Default)]
pub struct MockState {
    pub campaigns: Vec<Campaign>,
    pub creators: Vec<CreatorAssignment>,
    pub bids: Vec<Bid>,
    pub scripts: Vec<ScriptSubmission>,
    pub content: Vec<ContentSubmission>,
    pub creator_campaigns: Vec<CreatorCampaign>,
    pub brief: Option<CampaignBrief>,
    pub failures: HashMap<&'static str, ApiError>,
    pub calls: Vec<RecordedCall>,
}

/// Test side of a parked call: `arrived` fires once the call has read its
/// response data, and the call returns after `release` is sent.
pub struct Hold {
    pub arrived: oneshot::Receiver<()>,
    pub release: oneshot::Sender<()>,
}

struct Parked {
    arrived: oneshot::Sender<()>,
    release: oneshot::Receiver<()>,
}

#[derive(Default)]
pub struct MockApi {
    pub state: Mutex<MockState>,
    holds: Mutex<HashMap<&'static str, Parked>>,
}

impl MockApi {
    pub fn new(state: MockState) -> Self {
        Self {
            state: Mutex::new(state),
            holds: Mutex::default(),
        }
    }

    /// Parks the next call to `endpoint` after it has taken its response.
    pub fn hold_next(&self, endpoint: &'static str) -> Hold {
        let (arrived_tx, arrived_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        self.holds.lock().unwrap().insert(
            endpoint,
            Parked {
                arrived: arrived_tx,
                release: release_rx,
            },
        );
        Hold {
            arrived: arrived_rx,
            release: release_tx,
        }
    }

    // Runs on the blocking pool, so waiting here does not stall the runtime.
    fn pause_if_held(&self, endpoint: &'static str) {
        let parked = self.holds.lock().unwrap().remove(endpoint);
        if let Some(parked) = parked {
            let _ = parked.arrived.send(());
            let _ = parked.release.blocking_recv();
        }
    }

    pub fn fail(&self, endpoint: &'static str, error: ApiError) {
        self.state.lock().unwrap().failures.insert(endpoint, error);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn calls_to(&self, endpoint: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.endpoint == endpoint)
            .collect()
    }

    /// Records the call and returns the state, or the configured failure.
    fn enter(
        &self,
        endpoint: &'static str,
        payload: Value,
    ) -> Result<std::sync::MutexGuard<'_, MockState>, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RecordedCall { endpoint, payload });
        if let Some(error) = state.failures.get(endpoint).cloned() {
            return Err(error);
        }
        Ok(state)
    }
}

pub fn network_error() -> ApiError {
    ApiError::Network {
        message: "connection reset".to_string(),
    }
}

fn review_target<S>(action: ReviewAction, approve: S, reject: S, revise: S) -> S {
    match action {
        ReviewAction::Approve => approve,
        ReviewAction::Reject => reject,
        ReviewAction::RequestRevision => revise,
    }
}

impl CampaignApi for MockApi {
    fn brand_campaigns(&self, _session: &AuthSession) -> Result<Vec<Campaign>, ApiError> {
        let campaigns = self.enter("brand_campaigns", Value::Null)?.campaigns.clone();
        self.pause_if_held("brand_campaigns");
        Ok(campaigns)
    }

    fn campaign_creators(
        &self,
        _session: &AuthSession,
        campaign_id: &CampaignId,
    ) -> Result<Vec<CreatorAssignment>, ApiError> {
        Ok(self
            .enter("campaign_creators", json!(campaign_id))?
            .creators
            .clone())
    }

    fn respond_to_creators(
        &self,
        _session: &AuthSession,
        campaign_id: &CampaignId,
        updates: &[AssignmentUpdate],
    ) -> Result<(), ApiError> {
        let mut state = self.enter("respond_to_creators", json!(updates))?;
        for update in updates {
            if let Some(a) = state
                .creators
                .iter_mut()
                .find(|a| a.creator_id == update.creator_id)
            {
                a.status = update.status.clone();
                a.comment = update.comment.clone();
            }
        }
        if let Some(c) = state.campaigns.iter_mut().find(|c| &c.id == campaign_id) {
            c.review_status = CampaignReviewStatus::CreatorsInReview;
        }
        Ok(())
    }

    fn upload_brief(
        &self,
        _session: &AuthSession,
        campaign_id: &CampaignId,
        brief: &CampaignBrief,
    ) -> Result<(), ApiError> {
        let mut state = self.enter("upload_brief", json!(brief))?;
        if let Some(c) = state.campaigns.iter_mut().find(|c| &c.id == campaign_id) {
            c.brief_completed = true;
        }
        state.brief = Some(brief.clone());
        Ok(())
    }

    fn campaign_bids(
        &self,
        _session: &AuthSession,
        campaign_id: &CampaignId,
    ) -> Result<Vec<Bid>, ApiError> {
        Ok(self.enter("campaign_bids", json!(campaign_id))?.bids.clone())
    }

    fn finalize_amounts(
        &self,
        _session: &AuthSession,
        _campaign_id: &CampaignId,
        decisions: &[AmountDecision],
    ) -> Result<(), ApiError> {
        let mut state = self.enter("finalize_amounts", json!(decisions))?;
        for decision in decisions {
            if let Some(bid) = state
                .bids
                .iter_mut()
                .find(|b| b.creator_id == decision.creator_id)
            {
                bid.status = match decision.action {
                    CounterAction::AcceptCounter => BidStatus::AmountFinalized,
                    CounterAction::RejectCounter => BidStatus::AmountRejected,
                };
            }
        }
        Ok(())
    }

    fn campaign_scripts(
        &self,
        _session: &AuthSession,
        campaign_id: &CampaignId,
    ) -> Result<Vec<ScriptSubmission>, ApiError> {
        let scripts = self
            .enter("campaign_scripts", json!(campaign_id))?
            .scripts
            .clone();
        self.pause_if_held("campaign_scripts");
        Ok(scripts)
    }

    fn review_scripts(
        &self,
        _session: &AuthSession,
        _campaign_id: &CampaignId,
        decisions: &[ReviewDecision],
    ) -> Result<(), ApiError> {
        let mut state = self.enter("review_scripts", json!(decisions))?;
        for decision in decisions {
            if let Some(s) = state
                .scripts
                .iter_mut()
                .find(|s| s.creator_id == decision.creator_id)
            {
                s.status = review_target(
                    decision.action,
                    ScriptStatus::Approved,
                    ScriptStatus::Rejected,
                    ScriptStatus::RevisionRequested,
                );
                s.feedback = decision.feedback.clone();
            }
        }
        Ok(())
    }

    fn campaign_content(
        &self,
        _session: &AuthSession,
        campaign_id: &CampaignId,
    ) -> Result<Vec<ContentSubmission>, ApiError> {
        Ok(self
            .enter("campaign_content", json!(campaign_id))?
            .content
            .clone())
    }

    fn review_content(
        &self,
        _session: &AuthSession,
        _campaign_id: &CampaignId,
        decisions: &[ReviewDecision],
    ) -> Result<(), ApiError> {
        let mut state = self.enter("review_content", json!(decisions))?;
        for decision in decisions {
            if let Some(c) = state
                .content
                .iter_mut()
                .find(|c| c.creator_id == decision.creator_id)
            {
                c.status = review_target(
                    decision.action,
                    ContentStatus::Approved,
                    ContentStatus::Rejected,
                    ContentStatus::RevisionRequested,
                );
                c.feedback = decision.feedback.clone();
            }
        }
        Ok(())
    }

    fn brand_profile(&self, _session: &AuthSession) -> Result<Profile, ApiError> {
        self.enter("brand_profile", Value::Null)?;
        Ok(Profile {
            id: Some("brand-1".to_string()),
            name: Some("Acme Shoes".to_string()),
            email: None,
        })
    }

    fn creator_campaigns(&self, _session: &AuthSession) -> Result<Vec<CreatorCampaign>, ApiError> {
        Ok(self
            .enter("creator_campaigns", Value::Null)?
            .creator_campaigns
            .clone())
    }

    fn link_creator(&self, _session: &AuthSession, campaign_id: &CampaignId) -> Result<(), ApiError> {
        self.enter("link_creator", json!(campaign_id))?;
        Ok(())
    }

    fn submit_bid(
        &self,
        _session: &AuthSession,
        campaign_id: &CampaignId,
        amount: Amount,
    ) -> Result<(), ApiError> {
        let mut state = self.enter("submit_bid", json!({ "bid_amount": amount }))?;
        if let Some(c) = state
            .creator_campaigns
            .iter_mut()
            .find(|c| &c.campaign.id == campaign_id)
        {
            c.bid_amount = Some(amount);
            c.bid_status = Some(BidStatus::Submitted);
        }
        Ok(())
    }

    fn submit_script(
        &self,
        _session: &AuthSession,
        campaign_id: &CampaignId,
        text: &str,
    ) -> Result<(), ApiError> {
        let mut state = self.enter("submit_script", json!({ "content": text }))?;
        if let Some(c) = state
            .creator_campaigns
            .iter_mut()
            .find(|c| &c.campaign.id == campaign_id)
        {
            c.script_status = Some(ScriptStatus::Pending);
        }
        Ok(())
    }

    fn submit_content(
        &self,
        _session: &AuthSession,
        campaign_id: &CampaignId,
        content_url: &str,
    ) -> Result<(), ApiError> {
        let mut state = self.enter("submit_content", json!({ "content_url": content_url }))?;
        if let Some(c) = state
            .creator_campaigns
            .iter_mut()
            .find(|c| &c.campaign.id == campaign_id)
        {
            c.content_status = Some(ContentStatus::Pending);
        }
        Ok(())
    }

    fn go_live(
        &self,
        _session: &AuthSession,
        campaign_id: &CampaignId,
        live_url: &str,
    ) -> Result<(), ApiError> {
        let mut state = self.enter("go_live", json!({ "live_url": live_url }))?;
        if let Some(c) = state
            .creator_campaigns
            .iter_mut()
            .find(|c| &c.campaign.id == campaign_id)
        {
            c.content_status = Some(ContentStatus::Live);
            c.live_url = Some(live_url.to_string());
        }
        Ok(())
    }

    fn creator_brief(
        &self,
        _session: &AuthSession,
        campaign_id: &CampaignId,
    ) -> Result<CampaignBrief, ApiError> {
        let state = self.enter("creator_brief", json!(campaign_id))?;
        state.brief.clone().ok_or(ApiError::Http {
            status: 404,
            body: r#"{"detail":"Brief not found"}"#.to_string(),
        })
    }

    fn creator_profile(&self, _session: &AuthSession) -> Result<Profile, ApiError> {
        self.enter("creator_profile", Value::Null)?;
        Ok(Profile {
            id: Some("c1".to_string()),
            name: Some("Asha".to_string()),
            email: Some("asha@example.in".to_string()),
        })
    }
}

pub fn creator_listing(campaign: Campaign) -> CreatorCampaign {
    CreatorCampaign {
        campaign,
        assignment_status: Some(AssignmentStatus::Accepted),
        bid_amount: None,
        proposed_amount: None,
        bid_status: None,
        script_status: None,
        script_feedback: None,
        content_status: None,
        content_feedback: None,
        live_url: None,
    }
}
