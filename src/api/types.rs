//! Wire shapes that exist only at the API boundary.

use crate::domain::{
    Amount, AssignmentStatus, Bid, BidStatus, Campaign, ContentStatus, ContentSubmission,
    CreatorId, ScriptStatus, ScriptSubmission,
};
use serde::{Deserialize, Serialize};

/// A campaign as listed for a creator, with that creator's own progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCreatorCampaign")]
pub struct CreatorCampaign {
    #[serde(flatten)]
    pub campaign: Campaign,
    pub assignment_status: Option<AssignmentStatus>,
    pub bid_amount: Option<Amount>,
    pub proposed_amount: Option<Amount>,
    pub bid_status: Option<BidStatus>,
    pub script_status: Option<ScriptStatus>,
    pub script_feedback: Option<String>,
    pub content_status: Option<ContentStatus>,
    pub content_feedback: Option<String>,
    pub live_url: Option<String>,
}

#[derive(Deserialize)]
struct RawCreatorCampaign {
    #[serde(flatten)]
    campaign: Campaign,
    assignment_status: Option<AssignmentStatus>,
    creator_status: Option<AssignmentStatus>,
    bid_amount: Option<Amount>,
    my_bid_amount: Option<Amount>,
    proposed_amount: Option<Amount>,
    #[serde(rename = "proposedAmount")]
    proposed_amount_camel: Option<Amount>,
    bid_status: Option<BidStatus>,
    script_status: Option<ScriptStatus>,
    script_feedback: Option<String>,
    content_status: Option<ContentStatus>,
    content_feedback: Option<String>,
    live_url: Option<String>,
    #[serde(rename = "liveUrl")]
    live_url_camel: Option<String>,
}

impl From<RawCreatorCampaign> for CreatorCampaign {
    fn from(raw: RawCreatorCampaign) -> Self {
        Self {
            campaign: raw.campaign,
            assignment_status: raw.assignment_status.or(raw.creator_status),
            bid_amount: raw.bid_amount.or(raw.my_bid_amount),
            proposed_amount: raw.proposed_amount.or(raw.proposed_amount_camel),
            bid_status: raw.bid_status,
            script_status: raw.script_status,
            script_feedback: raw.script_feedback,
            content_status: raw.content_status,
            content_feedback: raw.content_feedback,
            live_url: raw.live_url.or(raw.live_url_camel),
        }
    }
}

impl CreatorCampaign {
    /// The creator's bid as a domain record, if one exists.
    pub fn own_bid(&self, creator_id: &CreatorId) -> Option<Bid> {
        let status = self.bid_status.clone().filter(|s| !s.as_str().is_empty())?;
        Some(Bid {
            creator_id: creator_id.clone(),
            creator_name: None,
            bid_amount: self.bid_amount,
            proposed_amount: self.proposed_amount,
            status,
            negotiation_deadline: None,
        })
    }

    pub fn own_script(&self, creator_id: &CreatorId) -> Option<ScriptSubmission> {
        let status = self
            .script_status
            .clone()
            .filter(|s| !s.as_str().is_empty())?;
        Some(ScriptSubmission {
            creator_id: creator_id.clone(),
            creator_name: None,
            content: String::new(),
            submitted_at: None,
            status,
            feedback: self.script_feedback.clone(),
        })
    }

    pub fn own_content(&self, creator_id: &CreatorId) -> Option<ContentSubmission> {
        let status = self
            .content_status
            .clone()
            .filter(|s| !s.as_str().is_empty())?;
        Some(ContentSubmission {
            creator_id: creator_id.clone(),
            creator_name: None,
            content_url: None,
            submitted_at: None,
            status,
            feedback: self.content_feedback.clone(),
            live_url: self.live_url.clone(),
            went_live_at: None,
        })
    }
}

/// Account profile for the signed-in brand or creator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawProfile")]
pub struct Profile {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Deserialize)]
struct RawProfile {
    id: Option<String>,
    user_id: Option<String>,
    creator_id: Option<String>,
    brand_id: Option<String>,
    #[serde(rename = "_id")]
    mongo_id: Option<String>,
    name: Option<String>,
    full_name: Option<String>,
    brand_name: Option<String>,
    email: Option<String>,
}

impl From<RawProfile> for Profile {
    fn from(raw: RawProfile) -> Self {
        Self {
            id: raw
                .id
                .or(raw.user_id)
                .or(raw.creator_id)
                .or(raw.brand_id)
                .or(raw.mongo_id),
            name: raw.name.or(raw.full_name).or(raw.brand_name),
            email: raw.email,
        }
    }
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;
