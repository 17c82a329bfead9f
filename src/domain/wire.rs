//! Incoming shapes for backend entities.
//!
//! Endpoints disagree on field spelling (`_id`, `campaign_id`, `reviewStatus`)
//! and some send more than one spelling in the same object. Each raw struct
//! names every spelling as its own field; the conversion picks the first one
//! present in a fixed order, so extra spellings never fail a row. Follower
//! and engagement metrics are display-only and fall back to absent when
//! unreadable.

use crate::domain::model::{
    Bid, Campaign, CampaignBrief, ContentSubmission, CreatorAssignment, ScriptSubmission,
};
use crate::domain::status::{
    AssignmentStatus, BidStatus, CampaignReviewStatus, ContentStatus, ScriptStatus,
};
use crate::domain::types::{Amount, CampaignId, CreatorId, LooseNumber};
use serde::Deserialize;

fn metric<T>(raw: Option<LooseNumber>, read: impl Fn(&LooseNumber) -> Option<T>) -> Option<T> {
    raw.as_ref().and_then(read)
}

#[derive(Deserialize)]
pub(crate) struct RawCampaign {
    id: Option<CampaignId>,
    campaign_id: Option<CampaignId>,
    #[serde(rename = "_id")]
    mongo_id: Option<CampaignId>,
    name: Option<String>,
    campaign_name: Option<String>,
    title: Option<String>,
    description: Option<String>,
    total_budget: Option<Amount>,
    budget: Option<Amount>,
    #[serde(rename = "totalBudget")]
    total_budget_camel: Option<Amount>,
    creator_count: Option<LooseNumber>,
    #[serde(rename = "creatorCount")]
    creator_count_camel: Option<LooseNumber>,
    no_of_creators: Option<LooseNumber>,
    categories: Option<Vec<String>>,
    go_live_date: Option<String>,
    #[serde(rename = "goLiveDate")]
    go_live_date_camel: Option<String>,
    review_status: Option<CampaignReviewStatus>,
    #[serde(rename = "reviewStatus")]
    review_status_camel: Option<CampaignReviewStatus>,
    brief_completed: Option<bool>,
    #[serde(rename = "briefCompleted")]
    brief_completed_camel: Option<bool>,
    brief: Option<CampaignBrief>,
}

impl TryFrom<RawCampaign> for Campaign {
    type Error = String;

    fn try_from(raw: RawCampaign) -> Result<Self, Self::Error> {
        let id = raw
            .id
            .or(raw.campaign_id)
            .or(raw.mongo_id)
            .ok_or("campaign has no id")?;
        let creator_count = raw
            .creator_count
            .or(raw.creator_count_camel)
            .or(raw.no_of_creators);
        Ok(Self {
            id,
            name: raw
                .name
                .or(raw.campaign_name)
                .or(raw.title)
                .unwrap_or_default(),
            description: raw.description,
            total_budget: raw.total_budget.or(raw.budget).or(raw.total_budget_camel),
            creator_count: metric(creator_count, LooseNumber::whole)
                .and_then(|n| u32::try_from(n).ok()),
            categories: raw.categories.unwrap_or_default(),
            go_live_date: raw.go_live_date.or(raw.go_live_date_camel),
            review_status: raw
                .review_status
                .or(raw.review_status_camel)
                .unwrap_or_default(),
            brief_completed: raw
                .brief_completed
                .or(raw.brief_completed_camel)
                .unwrap_or_default(),
            brief: raw.brief,
        })
    }
}

#[derive(Deserialize)]
pub(crate) struct RawBrief {
    campaign_id: Option<CampaignId>,
    video_title: Option<String>,
    #[serde(rename = "videoTitle")]
    video_title_camel: Option<String>,
    primary_focus: Option<String>,
    #[serde(rename = "primaryFocus")]
    primary_focus_camel: Option<String>,
    secondary_focus: Option<String>,
    #[serde(rename = "secondaryFocus")]
    secondary_focus_camel: Option<String>,
    dos: Option<String>,
    donts: Option<String>,
    cta: Option<String>,
    sample_video_url: Option<String>,
    #[serde(rename = "sampleVideoUrl")]
    sample_video_url_camel: Option<String>,
}

impl From<RawBrief> for CampaignBrief {
    fn from(raw: RawBrief) -> Self {
        Self {
            campaign_id: raw.campaign_id,
            video_title: raw
                .video_title
                .or(raw.video_title_camel)
                .unwrap_or_default(),
            primary_focus: raw
                .primary_focus
                .or(raw.primary_focus_camel)
                .unwrap_or_default(),
            secondary_focus: raw.secondary_focus.or(raw.secondary_focus_camel),
            dos: raw.dos,
            donts: raw.donts,
            cta: raw.cta.unwrap_or_default(),
            sample_video_url: raw.sample_video_url.or(raw.sample_video_url_camel),
        }
    }
}

#[derive(Deserialize)]
pub(crate) struct RawAssignment {
    creator_id: Option<CreatorId>,
    #[serde(rename = "creatorId")]
    creator_id_camel: Option<CreatorId>,
    name: Option<String>,
    creator_name: Option<String>,
    handle: Option<String>,
    username: Option<String>,
    instagram_handle: Option<String>,
    followers: Option<LooseNumber>,
    engagement_rate: Option<LooseNumber>,
    #[serde(rename = "engagementRate")]
    engagement_rate_camel: Option<LooseNumber>,
    status: Option<AssignmentStatus>,
    comment: Option<String>,
    brand_comment: Option<String>,
}

impl TryFrom<RawAssignment> for CreatorAssignment {
    type Error = String;

    fn try_from(raw: RawAssignment) -> Result<Self, Self::Error> {
        Ok(Self {
            creator_id: raw
                .creator_id
                .or(raw.creator_id_camel)
                .ok_or("creator row has no creator_id")?,
            name: raw.name.or(raw.creator_name).unwrap_or_default(),
            handle: raw.handle.or(raw.username).or(raw.instagram_handle),
            followers: metric(raw.followers, LooseNumber::whole),
            engagement_rate: metric(
                raw.engagement_rate.or(raw.engagement_rate_camel),
                LooseNumber::non_negative,
            ),
            status: raw.status.unwrap_or_default(),
            comment: raw.comment.or(raw.brand_comment),
        })
    }
}

#[derive(Deserialize)]
pub(crate) struct RawBid {
    creator_id: Option<CreatorId>,
    #[serde(rename = "creatorId")]
    creator_id_camel: Option<CreatorId>,
    creator_name: Option<String>,
    bid_amount: Option<Amount>,
    #[serde(rename = "bidAmount")]
    bid_amount_camel: Option<Amount>,
    amount: Option<Amount>,
    proposed_amount: Option<Amount>,
    #[serde(rename = "proposedAmount")]
    proposed_amount_camel: Option<Amount>,
    counter_amount: Option<Amount>,
    status: Option<BidStatus>,
    bid_status: Option<BidStatus>,
    negotiation_deadline: Option<String>,
    #[serde(rename = "negotiationDeadline")]
    negotiation_deadline_camel: Option<String>,
}

impl TryFrom<RawBid> for Bid {
    type Error = String;

    fn try_from(raw: RawBid) -> Result<Self, Self::Error> {
        Ok(Self {
            creator_id: raw
                .creator_id
                .or(raw.creator_id_camel)
                .ok_or("bid has no creator_id")?,
            creator_name: raw.creator_name,
            bid_amount: raw.bid_amount.or(raw.bid_amount_camel).or(raw.amount),
            proposed_amount: raw
                .proposed_amount
                .or(raw.proposed_amount_camel)
                .or(raw.counter_amount),
            status: raw.status.or(raw.bid_status).unwrap_or_default(),
            negotiation_deadline: raw
                .negotiation_deadline
                .or(raw.negotiation_deadline_camel),
        })
    }
}

#[derive(Deserialize)]
pub(crate) struct RawScript {
    creator_id: Option<CreatorId>,
    #[serde(rename = "creatorId")]
    creator_id_camel: Option<CreatorId>,
    creator_name: Option<String>,
    content: Option<String>,
    script: Option<String>,
    script_content: Option<String>,
    submitted_at: Option<String>,
    #[serde(rename = "submittedAt")]
    submitted_at_camel: Option<String>,
    status: Option<ScriptStatus>,
    script_status: Option<ScriptStatus>,
    feedback: Option<String>,
}

impl TryFrom<RawScript> for ScriptSubmission {
    type Error = String;

    fn try_from(raw: RawScript) -> Result<Self, Self::Error> {
        Ok(Self {
            creator_id: raw
                .creator_id
                .or(raw.creator_id_camel)
                .ok_or("script has no creator_id")?,
            creator_name: raw.creator_name,
            content: raw
                .content
                .or(raw.script)
                .or(raw.script_content)
                .unwrap_or_default(),
            submitted_at: raw.submitted_at.or(raw.submitted_at_camel),
            status: raw.status.or(raw.script_status).unwrap_or_default(),
            feedback: raw.feedback,
        })
    }
}

#[derive(Deserialize)]
pub(crate) struct RawContent {
    creator_id: Option<CreatorId>,
    #[serde(rename = "creatorId")]
    creator_id_camel: Option<CreatorId>,
    creator_name: Option<String>,
    content_url: Option<String>,
    file_url: Option<String>,
    #[serde(rename = "contentUrl")]
    content_url_camel: Option<String>,
    submitted_at: Option<String>,
    #[serde(rename = "submittedAt")]
    submitted_at_camel: Option<String>,
    status: Option<ContentStatus>,
    content_status: Option<ContentStatus>,
    feedback: Option<String>,
    live_url: Option<String>,
    #[serde(rename = "liveUrl")]
    live_url_camel: Option<String>,
    went_live_at: Option<String>,
    #[serde(rename = "wentLiveAt")]
    went_live_at_camel: Option<String>,
}

impl TryFrom<RawContent> for ContentSubmission {
    type Error = String;

    fn try_from(raw: RawContent) -> Result<Self, Self::Error> {
        Ok(Self {
            creator_id: raw
                .creator_id
                .or(raw.creator_id_camel)
                .ok_or("content has no creator_id")?,
            creator_name: raw.creator_name,
            content_url: raw.content_url.or(raw.file_url).or(raw.content_url_camel),
            submitted_at: raw.submitted_at.or(raw.submitted_at_camel),
            status: raw.status.or(raw.content_status).unwrap_or_default(),
            feedback: raw.feedback,
            live_url: raw.live_url.or(raw.live_url_camel),
            went_live_at: raw.went_live_at.or(raw.went_live_at_camel),
        })
    }
}

#[cfg(test)]
#[path = "tests/wire_tests.rs"]
mod tests;
