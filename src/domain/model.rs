//! Campaign entities as the backend reports them, plus the decision shapes
//! the client submits.
//!
//! Entities serialize under their canonical field names and decode through
//! the tolerant shapes in [`crate::domain::wire`].

use crate::domain::status::{
    AssignmentStatus, BidStatus, CampaignReviewStatus, ContentStatus, ScriptStatus,
};
use crate::domain::transitions::{CounterAction, ReviewAction};
use crate::domain::types::{Amount, CampaignId, CreatorId};
use crate::domain::wire::{RawAssignment, RawBid, RawBrief, RawCampaign, RawContent, RawScript};
use serde::{Deserialize, Serialize};

/// Campaign metadata and lifecycle status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCampaign")]
pub struct Campaign {
    pub id: CampaignId,
    pub name: String,
    pub description: Option<String>,
    pub total_budget: Option<Amount>,
    pub creator_count: Option<u32>,
    pub categories: Vec<String>,
    pub go_live_date: Option<String>,
    pub review_status: CampaignReviewStatus,
    pub brief_completed: bool,
    pub brief: Option<CampaignBrief>,
}

impl Campaign {
    /// Brief fields and bids only mean something once the roster is final.
    pub fn creators_are_final(&self) -> bool {
        self.review_status == CampaignReviewStatus::CreatorsAreFinal
    }

    pub fn assignment_editable(&self) -> bool {
        self.review_status == CampaignReviewStatus::CreatorsPending
    }
}

/// Creative brief attached to a campaign once creators are final.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawBrief")]
pub struct CampaignBrief {
    pub campaign_id: Option<CampaignId>,
    pub video_title: String,
    pub primary_focus: String,
    pub secondary_focus: Option<String>,
    pub dos: Option<String>,
    pub donts: Option<String>,
    pub cta: String,
    pub sample_video_url: Option<String>,
}

impl CampaignBrief {
    /// Names of required fields that are blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.video_title.trim().is_empty() {
            missing.push("video_title");
        }
        if self.primary_focus.trim().is_empty() {
            missing.push("primary_focus");
        }
        if self.cta.trim().is_empty() {
            missing.push("cta");
        }
        if self
            .sample_video_url
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .is_empty()
        {
            missing.push("sample_video_url");
        }
        missing
    }
}

/// A creator proposed for a campaign and the brand's decision on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAssignment")]
pub struct CreatorAssignment {
    pub creator_id: CreatorId,
    pub name: String,
    pub handle: Option<String>,
    pub followers: Option<u64>,
    pub engagement_rate: Option<f64>,
    pub status: AssignmentStatus,
    pub comment: Option<String>,
}

/// A creator's bid and the negotiation state around it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBid")]
pub struct Bid {
    pub creator_id: CreatorId,
    pub creator_name: Option<String>,
    pub bid_amount: Option<Amount>,
    pub proposed_amount: Option<Amount>,
    pub status: BidStatus,
    pub negotiation_deadline: Option<String>,
}

/// A creator's script and its review state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawScript")]
pub struct ScriptSubmission {
    pub creator_id: CreatorId,
    pub creator_name: Option<String>,
    pub content: String,
    pub submitted_at: Option<String>,
    pub status: ScriptStatus,
    pub feedback: Option<String>,
}

/// A creator's content upload, its review state and its go-live record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawContent")]
pub struct ContentSubmission {
    pub creator_id: CreatorId,
    pub creator_name: Option<String>,
    pub content_url: Option<String>,
    pub submitted_at: Option<String>,
    pub status: ContentStatus,
    pub feedback: Option<String>,
    pub live_url: Option<String>,
    pub went_live_at: Option<String>,
}

/// One row of a brand's creator review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentUpdate {
    pub creator_id: CreatorId,
    pub status: AssignmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Brand response to one creator's counter-offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountDecision {
    pub creator_id: CreatorId,
    pub action: CounterAction,
}

/// Brand decision on one creator's script or content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewDecision {
    pub creator_id: CreatorId,
    pub action: ReviewAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl ReviewDecision {
    /// Feedback trimmed, with blank treated as absent.
    pub fn feedback_text(&self) -> Option<&str> {
        self.feedback
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    /// True when the decision carries everything its action needs.
    pub fn is_complete(&self) -> bool {
        !self.action.requires_feedback() || self.feedback_text().is_some()
    }
}

#[cfg(test)]
#[path = "tests/model_tests.rs"]
mod tests;
